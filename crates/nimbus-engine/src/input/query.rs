use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::components::entity::Entity;
use crate::components::hitbox::HitboxRef;

/// The condition an input query tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Primary button held (level-triggered).
    PointerDown,
    /// Secondary button held (level-triggered).
    SecondaryPointerDown,
    /// Pointer currently over the target.
    PointerOver,
    /// Primary click completed this tick (edge-triggered).
    Click,
    /// Key held (level-triggered).
    KeyHeld,
    /// Key went down this tick (edge-triggered).
    KeyJustPressed,
    /// Key not held.
    KeyReleased,
}

impl QueryKind {
    pub const ALL: [QueryKind; 7] = [
        QueryKind::PointerDown,
        QueryKind::SecondaryPointerDown,
        QueryKind::PointerOver,
        QueryKind::Click,
        QueryKind::KeyHeld,
        QueryKind::KeyJustPressed,
        QueryKind::KeyReleased,
    ];

    /// Wire name, as used by [`InputState::detect`](crate::InputState::detect).
    pub fn name(self) -> &'static str {
        match self {
            QueryKind::PointerDown => "mousedown",
            QueryKind::SecondaryPointerDown => "rightmousedown",
            QueryKind::PointerOver => "mouseover",
            QueryKind::Click => "click",
            QueryKind::KeyHeld => "keydown",
            QueryKind::KeyJustPressed => "keyjustpressed",
            QueryKind::KeyReleased => "keyup",
        }
    }

    /// Pointer kinds hit-test a region; keyboard kinds look up a key.
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            QueryKind::PointerDown
                | QueryKind::SecondaryPointerDown
                | QueryKind::PointerOver
                | QueryKind::Click
        )
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input query kind `{0}`")]
pub struct UnknownQuery(pub String);

impl FromStr for QueryKind {
    type Err = UnknownQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownQuery(s.to_string()))
    }
}

/// What a query is tested against.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// Any pointer position.
    Anywhere,
    /// Any hitbox of the entity.
    Entity(&'a Entity),
    /// A single hitbox.
    Hitbox(HitboxRef<'a>),
    /// A key identifier such as `"a"`, `"Enter"` or `" "`.
    Key(&'a str),
}

impl<'a> From<&'a Entity> for Target<'a> {
    fn from(entity: &'a Entity) -> Self {
        Target::Entity(entity)
    }
}

impl<'a> From<HitboxRef<'a>> for Target<'a> {
    fn from(hitbox: HitboxRef<'a>) -> Self {
        Target::Hitbox(hitbox)
    }
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(key: &'a str) -> Self {
        Target::Key(key)
    }
}
