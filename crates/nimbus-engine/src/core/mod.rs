pub mod engine;
pub mod registry;
pub mod time;
