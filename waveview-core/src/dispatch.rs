use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::config::PlayerConfig;
use crate::controller::{TransportSnapshot, WaveformController};
use crate::engine::{EngineEvent, EngineFactory, EngineId, EventSink};
use crate::input::TransportCommand;
use crate::media::SelectedFile;

/// Serializes access to a [`WaveformController`] and routes engine
/// callbacks into it.
///
/// Engines may call back synchronously from inside a controller call
/// (`timeupdate` during `setTime`). Such events are queued and applied once
/// the outer call returns, so the controller is never borrowed twice.
/// After every change the new snapshot is handed to `publish`, unless it
/// equals the last one published.
pub struct Dispatcher<F: EngineFactory> {
    controller: RefCell<WaveformController<F>>,
    pending: RefCell<VecDeque<(EngineId, EngineEvent)>>,
    published: RefCell<Option<TransportSnapshot>>,
    publish: Box<dyn Fn(&TransportSnapshot)>,
}

impl<F: EngineFactory + 'static> Dispatcher<F> {
    /// `make_factory` receives the sink its engines must report through.
    pub fn new(
        config: PlayerConfig,
        make_factory: impl FnOnce(EventSink) -> F,
        publish: impl Fn(&TransportSnapshot) + 'static,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let sink: EventSink = Rc::new(move |id: EngineId, event: EngineEvent| {
                if let Some(dispatcher) = weak.upgrade() {
                    dispatcher.deliver(id, event);
                }
            });
            Dispatcher {
                controller: RefCell::new(WaveformController::new(make_factory(sink), config)),
                pending: RefCell::new(VecDeque::new()),
                published: RefCell::new(None),
                publish: Box::new(publish),
            }
        })
    }

    fn with_controller<R>(&self, f: impl FnOnce(&mut WaveformController<F>) -> R) -> Option<R> {
        let result = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                log::warn!("Player busy, input dropped");
                return None;
            };
            f(&mut controller)
        };
        self.drain();
        self.publish();
        Some(result)
    }

    fn deliver(&self, id: EngineId, event: EngineEvent) {
        self.pending.borrow_mut().push_back((id, event));
        if self.controller.try_borrow_mut().is_err() {
            return;
        }
        self.drain();
        self.publish();
    }

    fn drain(&self) {
        loop {
            let Some((id, event)) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            match self.controller.try_borrow_mut() {
                Ok(mut controller) => controller.handle_event(id, event),
                Err(_) => {
                    self.pending.borrow_mut().push_front((id, event));
                    break;
                }
            }
        }
    }

    fn publish(&self) {
        let snap = match self.controller.try_borrow() {
            Ok(controller) => controller.snapshot(),
            Err(_) => return,
        };
        if self.published.borrow().as_ref() == Some(&snap) {
            return;
        }
        *self.published.borrow_mut() = Some(snap.clone());
        (self.publish)(&snap);
    }

    pub fn snapshot(&self) -> Option<TransportSnapshot> {
        self.controller.try_borrow().ok().map(|c| c.snapshot())
    }

    pub fn load(&self, file: &SelectedFile<F::Blob>) {
        self.with_controller(|c| c.load(file));
    }

    pub fn toggle_play_pause(&self) {
        self.with_controller(|c| c.toggle_play_pause());
    }

    pub fn seek_relative(&self, delta: f64) -> Option<f64> {
        self.with_controller(|c| c.seek_relative(delta)).flatten()
    }

    pub fn set_zoom(&self, px_per_sec: f64) {
        self.with_controller(|c| c.set_zoom(px_per_sec));
    }

    pub fn zoom_by(&self, factor: f64) {
        self.with_controller(|c| c.zoom_by(factor));
    }

    pub fn apply(&self, command: TransportCommand) {
        self.with_controller(|c| c.apply(command));
    }

    pub fn teardown(&self) {
        self.with_controller(|c| c.teardown());
        self.pending.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineOptions;
    use crate::controller::Phase;
    use crate::engine::WaveformEngine;
    use crate::error::EngineError;

    /// Engine that reports back synchronously, the way wavesurfer does for
    /// `setTime`, `playPause` and late signals during `destroy`.
    struct EchoEngine {
        id: EngineId,
        sink: EventSink,
        time: f64,
        playing: bool,
    }

    impl WaveformEngine for EchoEngine {
        fn play_pause(&mut self) {
            self.playing = !self.playing;
            let event = if self.playing { EngineEvent::Play } else { EngineEvent::Pause };
            (self.sink)(self.id, event);
        }
        fn set_time(&mut self, seconds: f64) {
            // Reported position snaps to the decoder's next frame.
            self.time = seconds + 0.25;
            (self.sink)(self.id, EngineEvent::TimeUpdate { position: self.time });
        }
        fn current_time(&self) -> f64 {
            self.time
        }
        fn duration(&self) -> f64 {
            0.0
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
        fn zoom(&mut self, _px_per_sec: f64) {}
        fn destroy(self) {
            (self.sink)(self.id, EngineEvent::Ready { duration: 99.0 });
        }
    }

    struct EchoFactory {
        sink: EventSink,
    }

    impl EngineFactory for EchoFactory {
        type Blob = ();
        type Engine = EchoEngine;

        fn create(
            &mut self,
            id: EngineId,
            _file: &SelectedFile<()>,
            _options: &EngineOptions,
        ) -> Result<EchoEngine, EngineError> {
            Ok(EchoEngine { id, sink: self.sink.clone(), time: 0.0, playing: false })
        }
    }

    type Published = Rc<RefCell<Vec<TransportSnapshot>>>;

    fn dispatcher() -> (Rc<Dispatcher<EchoFactory>>, EventSink, Published) {
        let published: Published = Rc::default();
        let log = published.clone();
        let mut outside = None;
        let d = Dispatcher::new(
            PlayerConfig::default(),
            |sink| {
                outside = Some(sink.clone());
                EchoFactory { sink }
            },
            move |snap| log.borrow_mut().push(snap.clone()),
        );
        (d, outside.unwrap(), published)
    }

    fn audio(name: &str) -> SelectedFile<()> {
        SelectedFile::new(name, "audio/wav", 1, ()).unwrap()
    }

    fn loaded_and_ready(duration: f64) -> (Rc<Dispatcher<EchoFactory>>, EventSink, Published) {
        let (d, sink, published) = dispatcher();
        d.load(&audio("clip.wav"));
        sink(EngineId(0), EngineEvent::Ready { duration });
        (d, sink, published)
    }

    #[test]
    fn test_reentrant_time_update_applied_after_call() {
        let (d, _sink, published) = loaded_and_ready(30.0);
        assert_eq!(d.seek_relative(5.0), Some(5.0));
        let snap = d.snapshot().unwrap();
        assert_eq!(snap.position, 5.25);
        assert_eq!(published.borrow().last(), Some(&snap));
    }

    #[test]
    fn test_reentrant_play_event_not_dropped() {
        let (d, _sink, published) = loaded_and_ready(30.0);
        d.toggle_play_pause();
        assert!(d.snapshot().unwrap().playing);
        assert!(published.borrow().last().unwrap().playing);
        d.toggle_play_pause();
        assert!(!d.snapshot().unwrap().playing);
    }

    #[test]
    fn test_stale_event_during_teardown_discarded() {
        let (d, _sink, _) = loaded_and_ready(30.0);
        d.teardown();
        let snap = d.snapshot().unwrap();
        assert_eq!(snap.phase, Phase::Destroyed);
        assert_eq!(snap.duration, Some(30.0));
    }

    #[test]
    fn test_stale_event_during_rebind_discarded() {
        let (d, _sink, _) = loaded_and_ready(30.0);
        d.load(&audio("next.wav"));
        let snap = d.snapshot().unwrap();
        assert_eq!(snap.phase, Phase::Loading);
        assert_eq!(snap.duration, None);
        assert_eq!(snap.file_name.as_deref(), Some("next.wav"));
    }

    #[test]
    fn test_unchanged_state_not_republished() {
        let (d, _sink, published) = loaded_and_ready(30.0);
        let before = published.borrow().len();
        d.set_zoom(80.0);
        d.seek_relative(f64::NAN);
        assert_eq!(published.borrow().len(), before);
        d.zoom_by(2.0);
        assert_eq!(published.borrow().len(), before + 1);
        assert_eq!(published.borrow().last().unwrap().zoom.px_per_sec(), 160.0);
    }

    #[test]
    fn test_sink_outliving_dispatcher_is_inert() {
        let (d, sink, _) = dispatcher();
        drop(d);
        sink(EngineId(0), EngineEvent::Play);
    }
}
