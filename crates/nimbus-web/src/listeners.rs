use std::rc::Rc;

use nimbus_engine::{InputEvent, PointerButton};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

use crate::error::WebError;

/// Receives translated device events.
pub type InputSink = Rc<dyn Fn(InputEvent)>;

/// Tab index that makes the canvas focusable for keyboard input.
const CANVAS_TAB_INDEX: i32 = 1000;

/// DOM listeners attached to a canvas. Dropping this detaches them.
pub struct Listeners {
    target: HtmlCanvasElement,
    attached: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    /// Attach mouse, keyboard and touch listeners to `canvas`.
    ///
    /// The canvas is made focusable and focused so key events reach it, and
    /// its context menu is suppressed so the secondary button is usable.
    pub fn attach(canvas: &HtmlCanvasElement, sink: InputSink) -> Result<Self, WebError> {
        let mut listeners = Self {
            target: canvas.clone(),
            attached: Vec::new(),
        };

        listeners.on::<MouseEvent>("mousemove", &sink, |e| {
            Some(InputEvent::PointerMove {
                x: e.offset_x() as f32,
                y: e.offset_y() as f32,
            })
        })?;
        listeners.on::<MouseEvent>("mousedown", &sink, |e| {
            PointerButton::from_dom(e.button()).map(|button| InputEvent::PointerDown { button })
        })?;
        listeners.on::<MouseEvent>("mouseup", &sink, |e| {
            PointerButton::from_dom(e.button()).map(|button| InputEvent::PointerUp { button })
        })?;
        listeners.on::<MouseEvent>("click", &sink, |e| (e.button() == 0).then_some(InputEvent::Click))?;
        listeners.on::<MouseEvent>("contextmenu", &sink, |e| {
            e.prevent_default();
            None
        })?;

        listeners.on::<KeyboardEvent>("keydown", &sink, |e| Some(InputEvent::key_down(e.key())))?;
        listeners.on::<KeyboardEvent>("keyup", &sink, |e| Some(InputEvent::key_up(e.key())))?;

        let target = canvas.clone();
        listeners.on::<TouchEvent>("touchstart", &sink, move |e| {
            touch_point(&target, &e).map(|(x, y)| InputEvent::TouchStart { x, y })
        })?;
        let target = canvas.clone();
        listeners.on::<TouchEvent>("touchend", &sink, move |e| {
            touch_point(&target, &e).map(|(x, y)| InputEvent::TouchEnd { x, y })
        })?;

        canvas.set_tab_index(CANVAS_TAB_INDEX);
        canvas.focus()?;
        log::debug!("attached {} input listeners", listeners.attached.len());
        Ok(listeners)
    }

    fn on<E: JsCast>(
        &mut self,
        name: &'static str,
        sink: &InputSink,
        mut translate: impl FnMut(E) -> Option<InputEvent> + 'static,
    ) -> Result<(), WebError> {
        let sink = sink.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(input) = translate(event.unchecked_into::<E>()) {
                sink(input);
            }
        });
        self.target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        self.attached.push((name, closure));
        Ok(())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (name, closure) in &self.attached {
            if self
                .target
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("failed to detach {name} listener");
            }
        }
    }
}

/// First changed touch, in canvas coordinates.
fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
    let touch = event.changed_touches().get(0)?;
    let rect = canvas.get_bounding_client_rect();
    Some((
        (f64::from(touch.client_x()) - rect.left()) as f32,
        (f64::from(touch.client_y()) - rect.top()) as f32,
    ))
}
