use js_sys::{Function, Promise, Reflect};
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use waveview_core::{
    EngineError, EngineEvent, EngineFactory, EngineId, EngineOptions, EventSink, SelectedFile,
    WaveformEngine,
};

#[wasm_bindgen]
extern "C" {
    /// wavesurfer.js v7, loaded as the `WaveSurfer` global by index.html.
    pub type WaveSurfer;

    #[wasm_bindgen(static_method_of = WaveSurfer, catch)]
    fn create(options: &JsValue) -> Result<WaveSurfer, JsValue>;

    #[wasm_bindgen(method, js_name = loadBlob)]
    fn load_blob(this: &WaveSurfer, blob: &web_sys::Blob) -> Promise;

    /// Returns an unsubscribe function, unused since `destroy` drops all listeners.
    #[wasm_bindgen(method)]
    fn on(this: &WaveSurfer, event: &str, listener: &Function) -> Function;

    #[wasm_bindgen(method, js_name = playPause)]
    fn play_pause(this: &WaveSurfer) -> Promise;

    #[wasm_bindgen(method, js_name = setTime)]
    fn set_time(this: &WaveSurfer, seconds: f64);

    #[wasm_bindgen(method, js_name = getCurrentTime)]
    fn get_current_time(this: &WaveSurfer) -> f64;

    #[wasm_bindgen(method, js_name = getDuration)]
    fn get_duration(this: &WaveSurfer) -> f64;

    #[wasm_bindgen(method, js_name = isPlaying)]
    fn is_playing(this: &WaveSurfer) -> bool;

    /// Throws if no audio is loaded yet.
    #[wasm_bindgen(method, catch)]
    fn zoom(this: &WaveSurfer, min_px_per_sec: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &WaveSurfer);
}

type Listener = Closure<dyn FnMut(JsValue)>;

/// Best-effort text for a thrown JS value.
pub fn js_error_text(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// One wavesurfer instance plus the closures it calls back into.
///
/// Dropping it tears the instance down, so a session that unwinds early
/// still releases the audio buffer and listeners.
pub struct WaveSurferEngine {
    id: EngineId,
    inner: Option<WaveSurfer>,
    _listeners: Vec<Listener>,
}

impl WaveSurferEngine {
    fn release(&mut self) {
        if let Some(ws) = self.inner.take() {
            log::debug!("wavesurfer {} destroyed", self.id);
            ws.destroy();
        }
    }
}

impl Drop for WaveSurferEngine {
    fn drop(&mut self) {
        self.release();
    }
}

impl WaveformEngine for WaveSurferEngine {
    fn play_pause(&mut self) {
        let Some(ws) = &self.inner else { return };
        let id = self.id;
        let promise = ws.play_pause();
        wasm_bindgen_futures::spawn_local(async move {
            // Autoplay policy rejections surface here rather than as an error event.
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("wavesurfer {}: play rejected: {}", id, js_error_text(&e));
            }
        });
    }

    fn set_time(&mut self, seconds: f64) {
        if let Some(ws) = &self.inner {
            ws.set_time(seconds);
        }
    }

    fn current_time(&self) -> f64 {
        self.inner.as_ref().map_or(0.0, |ws| ws.get_current_time())
    }

    fn duration(&self) -> f64 {
        self.inner.as_ref().map_or(0.0, |ws| ws.get_duration())
    }

    fn is_playing(&self) -> bool {
        self.inner.as_ref().is_some_and(|ws| ws.is_playing())
    }

    fn zoom(&mut self, px_per_sec: f64) {
        let Some(ws) = &self.inner else { return };
        if let Err(e) = ws.zoom(px_per_sec) {
            log::warn!("wavesurfer {}: zoom failed: {}", self.id, js_error_text(&e));
        }
    }

    fn destroy(mut self) {
        self.release();
    }
}

/// Creates wavesurfer instances inside the player's container element.
pub struct WaveSurferFactory {
    container: NodeRef<Div>,
    sink: EventSink,
}

impl WaveSurferFactory {
    pub fn new(container: NodeRef<Div>, sink: EventSink) -> Self {
        Self { container, sink }
    }

    fn listen(
        &self,
        ws: &WaveSurfer,
        id: EngineId,
        event: &str,
        map: impl Fn(JsValue) -> EngineEvent + 'static,
    ) -> Listener {
        let sink = self.sink.clone();
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| sink(id, map(arg)));
        ws.on(event, listener.as_ref().unchecked_ref());
        listener
    }
}

fn options_object(options: &EngineOptions, container: &web_sys::HtmlElement) -> Result<JsValue, EngineError> {
    let json = serde_json::to_string(options).map_err(|e| EngineError::Create(e.to_string()))?;
    let obj = js_sys::JSON::parse(&json).map_err(|e| EngineError::Create(js_error_text(&e)))?;
    Reflect::set(&obj, &JsValue::from_str("container"), container)
        .map_err(|e| EngineError::Create(js_error_text(&e)))?;
    Ok(obj)
}

impl EngineFactory for WaveSurferFactory {
    type Blob = web_sys::File;
    type Engine = WaveSurferEngine;

    fn create(
        &mut self,
        id: EngineId,
        file: &SelectedFile<web_sys::File>,
        options: &EngineOptions,
    ) -> Result<WaveSurferEngine, EngineError> {
        let container = self.container.get_untracked().ok_or(EngineError::ContainerMissing)?;
        let opts = options_object(options, &container)?;
        let ws = WaveSurfer::create(&opts).map_err(|e| EngineError::Create(js_error_text(&e)))?;

        let listeners = vec![
            self.listen(&ws, id, "ready", |arg| EngineEvent::Ready {
                duration: arg.as_f64().unwrap_or(0.0),
            }),
            self.listen(&ws, id, "timeupdate", |arg| EngineEvent::TimeUpdate {
                position: arg.as_f64().unwrap_or(0.0),
            }),
            self.listen(&ws, id, "play", |_| EngineEvent::Play),
            self.listen(&ws, id, "pause", |_| EngineEvent::Pause),
            self.listen(&ws, id, "finish", |_| EngineEvent::Finish),
            self.listen(&ws, id, "error", |arg| {
                EngineEvent::Error(EngineError::Playback(js_error_text(&arg)))
            }),
        ];

        let loading = ws.load_blob(file.blob());
        wasm_bindgen_futures::spawn_local(async move {
            // Decode failures are also emitted as "error", which is what the controller acts on.
            if let Err(e) = JsFuture::from(loading).await {
                log::debug!("wavesurfer {}: loadBlob rejected: {}", id, js_error_text(&e));
            }
        });

        Ok(WaveSurferEngine { id, inner: Some(ws), _listeners: listeners })
    }
}
