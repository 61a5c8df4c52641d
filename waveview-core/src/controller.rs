use crate::config::PlayerConfig;
use crate::engine::{EngineEvent, EngineFactory, EngineId, WaveformEngine};
use crate::input::TransportCommand;
use crate::media::SelectedFile;
use crate::time::format_progress;
use crate::zoom::ZoomDensity;

/// Lifecycle of the engine bound to the current file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No file has been loaded yet.
    Idle,
    /// Engine created, waiting for its ready signal. Also the resting state
    /// after a failure, until another file is loaded.
    Loading,
    /// Duration known, transport active.
    Ready,
    /// Engine torn down (unmount, or briefly while switching files).
    Destroyed,
}

/// View-facing copy of the transport state.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportSnapshot {
    pub phase: Phase,
    pub file_name: Option<String>,
    pub position: f64,
    pub duration: Option<f64>,
    pub zoom: ZoomDensity,
    pub playing: bool,
    pub fault: Option<String>,
}

impl TransportSnapshot {
    /// State shown before any file has been picked.
    pub fn idle(zoom: ZoomDensity) -> Self {
        Self {
            phase: Phase::Idle,
            file_name: None,
            position: 0.0,
            duration: None,
            zoom,
            playing: false,
            fault: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready && self.fault.is_none()
    }

    pub fn progress_text(&self) -> String {
        format_progress(self.position, self.duration)
    }
}

struct Bound<E> {
    id: EngineId,
    engine: E,
    /// Density the engine was constructed with.
    created_zoom: ZoomDensity,
}

/// Owns at most one engine instance and derives playback/zoom state from
/// its events.
pub struct WaveformController<F: EngineFactory> {
    factory: F,
    config: PlayerConfig,
    bound: Option<Bound<F::Engine>>,
    next_id: u64,
    phase: Phase,
    file_name: Option<String>,
    position: f64,
    duration: Option<f64>,
    zoom: ZoomDensity,
    playing: bool,
    fault: Option<String>,
}

impl<F: EngineFactory> WaveformController<F> {
    pub fn new(factory: F, config: PlayerConfig) -> Self {
        Self {
            factory,
            zoom: config.initial_zoom,
            config,
            bound: None,
            next_id: 0,
            phase: Phase::Idle,
            file_name: None,
            position: 0.0,
            duration: None,
            playing: false,
            fault: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn zoom(&self) -> ZoomDensity {
        self.zoom
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// Id of the live engine, if one exists.
    pub fn engine_id(&self) -> Option<EngineId> {
        self.bound.as_ref().map(|b| b.id)
    }

    pub fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            phase: self.phase,
            file_name: self.file_name.clone(),
            position: self.position,
            duration: self.duration,
            zoom: self.zoom,
            playing: self.playing,
            fault: self.fault.clone(),
        }
    }

    /// Bind a new file: destroy the current engine (if any), then create a
    /// fresh one. The old engine is always gone before the new one exists.
    pub fn load(&mut self, file: &SelectedFile<F::Blob>) {
        self.release();

        let id = EngineId(self.next_id);
        self.next_id += 1;

        self.phase = Phase::Loading;
        self.file_name = Some(file.name().to_string());
        self.position = 0.0;
        self.duration = None;
        self.playing = false;
        self.fault = None;

        let options = self.config.engine_options(self.zoom);
        match self.factory.create(id, file, &options) {
            Ok(engine) => {
                log::info!("Engine {} loading \"{}\"", id, file.name());
                self.bound = Some(Bound { id, engine, created_zoom: self.zoom });
            }
            Err(e) => {
                log::error!("Engine {} for \"{}\" could not be created: {}", id, file.name(), e);
                self.fault = Some(e.to_string());
            }
        }
    }

    /// Release the engine on unmount. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        let had_file = self.phase != Phase::Idle;
        self.release();
        if had_file {
            self.phase = Phase::Destroyed;
        }
        self.playing = false;
    }

    fn release(&mut self) {
        if let Some(bound) = self.bound.take() {
            log::info!("Destroying engine {}", bound.id);
            bound.engine.destroy();
            self.phase = Phase::Destroyed;
        }
    }

    /// Apply an engine callback. Events tagged with anything but the live
    /// engine's id are dropped.
    pub fn handle_event(&mut self, id: EngineId, event: EngineEvent) {
        if self.engine_id() != Some(id) {
            log::debug!("Ignoring {:?} from stale engine {}", event, id);
            return;
        }

        match event {
            EngineEvent::Ready { duration } => {
                if self.fault.is_some() {
                    log::debug!("Ignoring ready from failed engine {}", id);
                    return;
                }
                let duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    self.bound.as_ref().map_or(0.0, |b| b.engine.duration()).max(0.0)
                };
                self.duration = Some(duration);
                self.position = 0.0;
                self.phase = Phase::Ready;
                log::info!("Engine {} ready, duration {:.2}s", id, duration);
                let zoom = self.zoom;
                if let Some(bound) = self.bound.as_mut() {
                    if bound.created_zoom != zoom {
                        bound.engine.zoom(zoom.px_per_sec());
                    }
                }
            }
            EngineEvent::TimeUpdate { position } => {
                self.position = self.clamp_position(position);
                // Time only advances while playing; resync in case a
                // play/pause notification was missed.
                if let Some(bound) = self.bound.as_ref() {
                    self.playing = bound.engine.is_playing();
                }
            }
            EngineEvent::Play => self.playing = true,
            EngineEvent::Pause => self.playing = false,
            EngineEvent::Finish => {
                self.playing = false;
                if let Some(d) = self.duration {
                    self.position = d;
                }
            }
            EngineEvent::Error(e) => {
                log::error!("Engine {} failed: {}", id, e);
                self.fault = Some(e.to_string());
                self.playing = false;
                self.phase = Phase::Loading;
            }
        }
    }

    fn clamp_position(&self, t: f64) -> f64 {
        if !t.is_finite() || t < 0.0 {
            return 0.0;
        }
        match self.duration {
            Some(d) => t.min(d),
            None => t,
        }
    }

    fn usable_engine(&mut self) -> Option<&mut F::Engine> {
        if self.fault.is_some() {
            return None;
        }
        self.bound.as_mut().map(|b| &mut b.engine)
    }

    pub fn toggle_play_pause(&mut self) {
        match self.usable_engine() {
            Some(engine) => engine.play_pause(),
            None => log::debug!("play/pause ignored: no live engine"),
        }
    }

    /// Seek by `delta` seconds from the current position, clamped to the
    /// file. Returns the new position, or `None` when not ready.
    pub fn seek_relative(&mut self, delta: f64) -> Option<f64> {
        if self.phase != Phase::Ready || !delta.is_finite() {
            log::debug!("seek ignored in {:?}", self.phase);
            return None;
        }
        let duration = self.duration.unwrap_or(0.0);
        let fallback = self.position;
        let engine = self.usable_engine()?;
        let now = engine.current_time();
        let base = if now.is_finite() { now } else { fallback };
        let target = (base + delta).clamp(0.0, duration);
        engine.set_time(target);
        self.position = target;
        Some(target)
    }

    pub fn set_zoom(&mut self, px_per_sec: f64) -> ZoomDensity {
        self.zoom = ZoomDensity::new(px_per_sec);
        self.apply_zoom();
        self.zoom
    }

    pub fn zoom_by(&mut self, factor: f64) -> ZoomDensity {
        self.zoom = self.zoom.scaled(factor);
        self.apply_zoom();
        self.zoom
    }

    fn apply_zoom(&mut self) {
        let zoom = self.zoom;
        if self.phase != Phase::Ready {
            log::debug!("zoom {} px/s kept for next engine", zoom.readout());
            return;
        }
        if let Some(engine) = self.usable_engine() {
            engine.zoom(zoom.px_per_sec());
        }
    }

    pub fn apply(&mut self, command: TransportCommand) {
        match command {
            TransportCommand::TogglePlayPause => self.toggle_play_pause(),
            TransportCommand::SeekBy(delta) => {
                self.seek_relative(delta);
            }
            TransportCommand::ZoomBy(factor) => {
                self.zoom_by(factor);
            }
        }
    }
}

impl<F: EngineFactory> Drop for WaveformController<F> {
    fn drop(&mut self) {
        self.release();
    }
}
