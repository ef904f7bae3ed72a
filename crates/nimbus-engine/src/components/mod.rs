pub mod behavior;
pub mod entity;
pub mod hitbox;
pub mod sprite;
