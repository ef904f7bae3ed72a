pub mod canvas;
pub mod error;
pub mod listeners;
pub mod loader;
pub mod runner;

pub use canvas::WebCanvas;
pub use error::WebError;
pub use listeners::{InputSink, Listeners};
pub use loader::{load_audio, load_image, load_manifest_images};
pub use runner::{launch, run, App, LaunchSlot, StopHandle, WebScene};

/// Generate the `#[wasm_bindgen]` entry points for a scene.
///
/// Generates:
/// - `start(canvas_id)`: installs the panic hook and console logger, loads
///   the scene's assets, then starts the loop on the canvas
/// - `stop()`: cancels the loop after the current tick
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod scene;
/// use scene::SkyScene;
///
/// nimbus_web::export_scene!(SkyScene, "sky-demo");
/// ```
///
/// `$scene_type` must implement [`WebScene`]. The calling crate needs
/// `wasm-bindgen`, `wasm-bindgen-futures`, `console_log`,
/// `console_error_panic_hook` and `log` as dependencies.
#[macro_export]
macro_rules! export_scene {
    ($scene_type:ty, $scene_name:literal) => {
        thread_local! {
            static APP: $crate::LaunchSlot<$crate::App> = $crate::LaunchSlot::new();
        }

        #[wasm_bindgen]
        pub async fn start(canvas_id: String) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Trace);

            // Claimed before the first await so overlapping calls cannot both launch.
            if !APP.with(|slot| slot.begin()) {
                log::warn!("{}: already running or starting", $scene_name);
                return Ok(());
            }

            match $crate::launch::<$scene_type>(&canvas_id).await {
                Ok(app) => {
                    match APP.with(|slot| slot.finish(app)) {
                        Some(app) => {
                            app.stop();
                            log::info!("{}: stopped before it finished starting", $scene_name);
                        }
                        None => log::info!("{}: started on #{}", $scene_name, canvas_id),
                    }
                    Ok(())
                }
                Err(err) => {
                    APP.with(|slot| slot.abort());
                    Err(err.into())
                }
            }
        }

        #[wasm_bindgen]
        pub fn stop() {
            APP.with(|slot| {
                if let Some(app) = slot.take() {
                    app.stop();
                    log::info!("{}: stopped", $scene_name);
                }
            });
        }
    };
}
