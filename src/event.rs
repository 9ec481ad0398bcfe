//! Input event types consumed by the interaction controller.
//!
//! All payloads are closed enums; there are no stringly-typed key or
//! button names anywhere in the core.

/// Pointer button for down/up events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the core reacts to. Anything else is ignored by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Delete,
    Backspace,
    Space,
    /// `+` / `=` key (zoom in with a command modifier)
    Plus,
    /// `-` key (zoom out with a command modifier)
    Minus,
    /// `0` key (fit to surface with a command modifier)
    Key0,
    /// `1` key (100% zoom with a command modifier)
    Key1,
}

/// Modifier flags accompanying a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub command: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        command: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        command: false,
        alt: false,
    };

    pub const COMMAND: Self = Self {
        shift: false,
        command: true,
        alt: false,
    };
}
