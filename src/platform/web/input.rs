//! DOM listeners
//!
//! Keys are heard on the window, mouse and touch on the canvas (so their default
//! action can be suppressed). Every closure added in `attach` is removed in `detach`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, Window};

use crate::input::{InputHost, RawInput};
use crate::instance;

type Mapper = fn(&Event) -> Option<RawInput>;

struct Listener {
    target: EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

pub struct WebInput {
    window: Window,
    canvas: HtmlCanvasElement,
    listeners: Vec<Listener>,
    /// Removed listeners. The pause key detaches from inside its own closure, so
    /// closures stay alive until the next attach.
    retired: Vec<Closure<dyn FnMut(Event)>>,
}

fn key_code(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::code)
}

impl WebInput {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        Self {
            window,
            canvas,
            listeners: Vec::new(),
            retired: Vec::new(),
        }
    }

    fn listen(&mut self, target: EventTarget, name: &'static str, map: Mapper, suppress: bool) {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if suppress {
                event.prevent_default();
            }
            let Some(raw) = map(&event) else { return };
            if let Some(handle) = instance::get() {
                handle.input(&raw);
            }
        });
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        self.listeners.push(Listener {
            target,
            name,
            closure,
        });
    }
}

impl InputHost for WebInput {
    fn attach(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        self.retired.clear();
        let window: EventTarget = self.window.clone().into();
        let canvas: EventTarget = self.canvas.clone().into();

        self.listen(window.clone(), "keydown", |e| key_code(e).map(RawInput::KeyDown), false);
        self.listen(window, "keyup", |e| key_code(e).map(RawInput::KeyUp), false);
        self.listen(canvas.clone(), "mousedown", |_| Some(RawInput::PointerDown), true);
        self.listen(canvas.clone(), "mouseup", |_| Some(RawInput::PointerUp), true);
        self.listen(canvas.clone(), "touchstart", |_| Some(RawInput::PointerDown), true);
        self.listen(canvas, "touchend", |_| Some(RawInput::PointerUp), true);
    }

    fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.name,
                listener.closure.as_ref().unchecked_ref(),
            );
            self.retired.push(listener.closure);
        }
    }
}

impl Drop for WebInput {
    fn drop(&mut self) {
        self.detach();
    }
}
