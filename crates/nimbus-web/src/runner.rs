use std::cell::{Cell, RefCell};
use std::rc::Rc;

use nimbus_engine::{AssetManifest, AssetRegistry, Engine, InputEvent, LoopControl, Scene};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::canvas::WebCanvas;
use crate::error::{window, WebError};
use crate::listeners::{InputSink, Listeners};
use crate::loader::load_manifest_images;

/// A scene the browser host can build once its assets are loaded.
pub trait WebScene: Scene + Sized + 'static {
    /// Manifest JSON listing the images to load before the scene is built.
    fn manifest() -> Option<&'static str> {
        None
    }

    /// Build the scene from the loaded assets.
    fn build(assets: &AssetRegistry) -> Self;
}

/// Cancels a running loop. The current tick finishes; no further tick is scheduled.
#[derive(Clone)]
pub struct StopHandle {
    stopped: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

fn request_frame(callback: &FrameCallback) -> Result<i32, WebError> {
    Ok(window()?.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

/// Drive `engine` once per display refresh until it stops or `StopHandle::stop` is called.
///
/// The first callback only primes the frame clock.
pub fn run<S: Scene + 'static>(
    engine: Rc<RefCell<Engine<S>>>,
    mut canvas: WebCanvas,
) -> Result<StopHandle, WebError> {
    let handle = StopHandle {
        stopped: Rc::new(Cell::new(false)),
    };
    let stopped = handle.stopped.clone();

    let tick: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = tick.clone();

    *tick.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        if stopped.get() {
            engine.borrow_mut().stop();
            log::info!("loop cancelled");
            next.borrow_mut().take();
            return;
        }

        let control = engine.borrow_mut().frame(timestamp, &mut canvas);
        match control {
            LoopControl::Continue => {
                let scheduled = match next.borrow().as_ref() {
                    Some(callback) => request_frame(callback),
                    None => return,
                };
                if let Err(err) = scheduled {
                    log::error!("could not schedule next frame: {err}");
                }
            }
            LoopControl::Stop => {
                stopped.set(true);
                log::info!("loop stopped by scene");
                next.borrow_mut().take();
            }
        }
    }));

    if let Some(callback) = tick.borrow().as_ref() {
        request_frame(callback)?;
    }
    Ok(handle)
}

/// A scene running on a page: its loop and its input listeners.
pub struct App {
    stop: StopHandle,
    _listeners: Listeners,
}

impl App {
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}

/// Holds the one running app of a page, guarding against overlapping starts.
///
/// `begin` claims the slot before any await, so a second start issued while
/// the first is still loading is refused instead of launching a second loop.
pub struct LaunchSlot<T> {
    state: RefCell<SlotState<T>>,
}

enum SlotState<T> {
    Empty,
    Starting { stop_requested: bool },
    Running(T),
}

impl<T> LaunchSlot<T> {
    pub const fn new() -> Self {
        Self {
            state: RefCell::new(SlotState::Empty),
        }
    }

    /// Claim the slot. False if an app is running or starting.
    pub fn begin(&self) -> bool {
        let mut state = self.state.borrow_mut();
        match *state {
            SlotState::Empty => {
                *state = SlotState::Starting { stop_requested: false };
                true
            }
            _ => false,
        }
    }

    /// Store the started app. If a stop arrived while it was starting, the
    /// slot is emptied and the app is handed back to be stopped.
    pub fn finish(&self, app: T) -> Option<T> {
        let mut state = self.state.borrow_mut();
        match *state {
            SlotState::Starting { stop_requested: true } => {
                *state = SlotState::Empty;
                Some(app)
            }
            _ => {
                *state = SlotState::Running(app);
                None
            }
        }
    }

    /// Release a claim whose start failed.
    pub fn abort(&self) {
        let mut state = self.state.borrow_mut();
        if matches!(*state, SlotState::Starting { .. }) {
            *state = SlotState::Empty;
        }
    }

    /// Take the running app, leaving the slot empty. A start in progress is
    /// marked so that `finish` hands its app back instead of keeping it.
    pub fn take(&self) -> Option<T> {
        let mut state = self.state.borrow_mut();
        match std::mem::replace(&mut *state, SlotState::Empty) {
            SlotState::Running(app) => Some(app),
            SlotState::Starting { .. } => {
                *state = SlotState::Starting { stop_requested: true };
                None
            }
            SlotState::Empty => None,
        }
    }
}

impl<T> Default for LaunchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Load assets, build the scene, wire input and start the loop on `<canvas id=canvas_id>`.
pub async fn launch<S: WebScene>(canvas_id: &str) -> Result<App, WebError> {
    let mut canvas = WebCanvas::from_element_id(canvas_id, true)?;

    let mut assets = AssetRegistry::new();
    if let Some(json) = S::manifest() {
        let manifest = AssetManifest::from_json(json)?;
        load_manifest_images(&manifest, &mut assets, &mut canvas).await?;
    }

    let scene = S::build(&assets);
    let config = scene.config();
    log::set_max_level(config.level_filter());
    canvas.set_use_device_pixel_ratio(config.use_device_pixel_ratio);

    let engine = Rc::new(RefCell::new(Engine::new(scene)));
    engine.borrow_mut().init();

    let sink: InputSink = {
        let engine = engine.clone();
        Rc::new(move |event: InputEvent| match engine.try_borrow_mut() {
            Ok(mut engine) => engine.push_input(event),
            Err(_) => log::warn!("input dropped while a frame is running: {event:?}"),
        })
    };
    let listeners = Listeners::attach(canvas.element(), sink)?;

    let stop = run(engine, canvas)?;
    Ok(App {
        stop,
        _listeners: listeners,
    })
}
