pub mod api;
pub mod core;
pub mod components;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::scene::{EngineConfig, Hooks, Scene, World};
pub use api::types::{Color, EntityId, ImageId};
pub use assets::manifest::{AssetManifest, ImageDescriptor, SoundDescriptor};
pub use assets::registry::AssetRegistry;
pub use components::behavior::{Behavior, UpdateContext};
pub use components::entity::Entity;
pub use components::hitbox::{Anchor, Hitbox, HitboxRef};
pub use components::sprite::{Frame, ImageFrame, SolidColor, Sprite};
pub use core::engine::{Engine, LoopControl};
pub use core::registry::{FlushStats, Registry};
pub use core::time::{FrameClock, FrameTime};
pub use error::AssetError;
pub use input::events::{InputEvent, PointerButton};
pub use input::gesture::{SwipeDirection, SwipeTracker};
pub use input::query::{QueryKind, Target, UnknownQuery};
pub use input::state::InputState;
pub use renderer::canvas::{Canvas2d, CanvasScope, TextStyle, Viewport};
pub use renderer::draw::draw_entity;
pub use renderer::headless::{DrawOp, HeadlessCanvas};

pub use glam::Vec2;
