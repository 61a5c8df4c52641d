//! Browser-independent core of the waveview player: file validation,
//! the engine lifecycle/transport state machine, zoom math, time
//! formatting and keyboard/wheel input mapping.
//!
//! The rendering engine itself is abstracted behind [`engine::WaveformEngine`]
//! so everything here runs (and is tested) natively.

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod input;
pub mod media;
pub mod time;
pub mod zoom;

pub use config::{EngineOptions, PlayerConfig, ZoomModifier};
pub use controller::{Phase, TransportSnapshot, WaveformController};
pub use dispatch::Dispatcher;
pub use engine::{EngineEvent, EngineFactory, EngineId, EventSink, WaveformEngine};
pub use error::{ConfigError, EngineError, SelectionError};
pub use media::{FileSelection, SelectedFile};
pub use zoom::ZoomDensity;
