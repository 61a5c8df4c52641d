use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;
use waveview_core::{Dispatcher, PlayerConfig, TransportSnapshot};

use super::wavesurfer::WaveSurferFactory;

/// The controller of the mounted player, fed by wavesurfer callbacks.
pub type Session = Dispatcher<WaveSurferFactory>;

thread_local! {
    static SESSION: RefCell<Option<Rc<Session>>> = RefCell::new(None);
}

/// Build a session whose snapshots land in `transport`.
pub fn create(
    config: PlayerConfig,
    container: NodeRef<Div>,
    transport: RwSignal<TransportSnapshot>,
) -> Rc<Session> {
    Dispatcher::new(
        config,
        move |sink| WaveSurferFactory::new(container, sink),
        move |snap: &TransportSnapshot| {
            // The page may already be disposing its signals during unmount.
            if transport.try_set(snap.clone()).is_some() {
                log::debug!("Transport signal disposed, snapshot dropped");
            }
        },
    )
}

/// Make `session` the active one, tearing down any previous session.
pub fn install(session: Rc<Session>) {
    let previous = SESSION.with(|s| s.borrow_mut().replace(session));
    if let Some(old) = previous {
        log::debug!("Replacing active player session");
        old.teardown();
    }
}

/// Tear down and forget the active session.
pub fn uninstall() {
    if let Some(session) = SESSION.with(|s| s.borrow_mut().take()) {
        session.teardown();
    }
}

/// Run `f` against the active session, if a player is mounted.
pub fn with_session<R>(f: impl FnOnce(&Session) -> R) -> Option<R> {
    let session = SESSION.with(|s| s.borrow().clone())?;
    Some(f(&session))
}
