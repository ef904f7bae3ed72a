/// Pointer buttons the sampler tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value. Middle and extra buttons are ignored.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Device events the engine understands.
/// Generic, with no scene-specific semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to canvas coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A pointer button went down.
    PointerDown { button: PointerButton },
    /// A pointer button was released.
    PointerUp { button: PointerButton },
    /// A primary click completed (down and up on the target).
    Click,
    /// A key went down. Auto-repeat delivers this again while held.
    KeyDown { key: String },
    /// A key was released.
    KeyUp { key: String },
    /// A touch began at canvas coordinates (x, y).
    TouchStart { x: f32, y: f32 },
    /// A touch ended at canvas coordinates (x, y).
    TouchEnd { x: f32, y: f32 },
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }
}
