pub mod canvas;
pub mod draw;
pub mod headless;
