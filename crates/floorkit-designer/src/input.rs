//! Toolkit-independent input events.
//!
//! The controller only sees these plain records, so the same logic drives a
//! real canvas or a headless test harness. Coordinates are screen pixels.

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Primary-button event with no modifiers.
    pub fn primary(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this press should pan the view instead of editing.
    pub fn is_pan_gesture(&self) -> bool {
        match self.button {
            PointerButton::Middle | PointerButton::Secondary => true,
            PointerButton::Primary => {
                self.modifiers.alt || self.modifiers.ctrl || self.modifiers.meta
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub x: f64,
    pub y: f64,
    /// Positive scrolls down (zoom out).
    pub delta_y: f64,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    /// A printable character, compared case-insensitively.
    Char(char),
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
