use std::fmt;
use std::rc::Rc;

use crate::config::EngineOptions;
use crate::error::EngineError;
use crate::media::SelectedFile;

/// Identifies one engine instance for the lifetime of a controller.
/// Ids are never reused, so events from a destroyed instance can be told
/// apart from those of its replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineId(pub u64);

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Signals an engine delivers asynchronously after creation.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// Decoding finished; duration and seeking are valid from now on.
    Ready { duration: f64 },
    TimeUpdate { position: f64 },
    Play,
    Pause,
    /// Playback reached the end of the file.
    Finish,
    Error(EngineError),
}

/// Receives every engine callback, tagged with the engine that fired it.
pub type EventSink = Rc<dyn Fn(EngineId, EngineEvent)>;

/// One live rendering/playback engine bound to a single file.
pub trait WaveformEngine {
    fn play_pause(&mut self);
    fn set_time(&mut self, seconds: f64);
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn is_playing(&self) -> bool;
    fn zoom(&mut self, px_per_sec: f64);
    /// Release decoded audio, the rendered surface and every listener.
    fn destroy(self);
}

/// Builds engines. Implementations wire the engine's callbacks so that they
/// report back tagged with `id`.
pub trait EngineFactory {
    type Blob;
    type Engine: WaveformEngine;

    fn create(
        &mut self,
        id: EngineId,
        file: &SelectedFile<Self::Blob>,
        options: &EngineOptions,
    ) -> Result<Self::Engine, EngineError>;
}
