//! Browser side of the waveform engine: the wavesurfer.js binding and the
//! per-player session that routes its callbacks into the controller.

pub mod session;
pub mod wavesurfer;

pub use session::Session;
pub use wavesurfer::{WaveSurferEngine, WaveSurferFactory};
