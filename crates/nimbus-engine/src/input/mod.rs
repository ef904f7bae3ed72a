pub mod events;
pub mod gesture;
pub mod query;
pub mod state;
