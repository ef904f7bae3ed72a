use wasm_bindgen::prelude::*;

mod cloud;
mod rng;
mod scene;

pub use scene::SkyScene;

nimbus_web::export_scene!(SkyScene, "sky-demo");
