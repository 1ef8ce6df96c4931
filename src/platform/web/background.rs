//! Scrolling CSS background

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use crate::renderer::BackgroundMotion;

pub struct CssBackground {
    window: Window,
    element: HtmlElement,
    offset: Rc<Cell<f64>>,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
}

impl CssBackground {
    pub fn new(window: Window, element: HtmlElement) -> Self {
        Self {
            window,
            element,
            offset: Rc::new(Cell::new(0.0)),
            interval: None,
        }
    }
}

impl BackgroundMotion for CssBackground {
    fn start(&mut self, interval_ms: u32) {
        self.stop();

        let element = self.element.clone();
        let offset = self.offset.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            offset.set(offset.get() - 1.0);
            let _ = element
                .style()
                .set_property("background-position-x", &format!("{}px", offset.get()));
        });

        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms as i32,
            ) {
            Ok(id) => self.interval = Some((id, closure)),
            Err(err) => log::warn!("Background interval failed: {:?}", err),
        }
    }

    fn stop(&mut self) {
        if let Some((id, _closure)) = self.interval.take() {
            self.window.clear_interval_with_handle(id);
        }
    }
}

impl Drop for CssBackground {
    fn drop(&mut self) {
        self.stop();
    }
}
