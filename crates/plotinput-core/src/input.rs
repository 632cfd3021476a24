//! Pointer and keyboard input as delivered by the hosting shell.
//!
//! Positions are in the component frame (origin at the component's top-left corner);
//! the router converts them to the device frame.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// A single modifier key, used to configure which modifier triggers what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKey {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
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

    /// Only the given key held.
    pub fn only(key: ModifierKey) -> Self {
        let mut m = Self::NONE;
        match key {
            ModifierKey::Shift => m.shift = true,
            ModifierKey::Ctrl => m.ctrl = true,
            ModifierKey::Alt => m.alt = true,
            ModifierKey::Meta => m.meta = true,
        }
        m
    }

    pub fn contains(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Meta => self.meta,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Scroll {
        position: Point,
        delta: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    pub fn down(position: impl Into<Point>, button: PointerButton) -> Self {
        PointerEvent::Down {
            position: position.into(),
            button,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn up(position: impl Into<Point>, button: PointerButton) -> Self {
        PointerEvent::Up {
            position: position.into(),
            button,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(position: impl Into<Point>) -> Self {
        PointerEvent::Move {
            position: position.into(),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn scroll(position: impl Into<Point>, delta: Vec2) -> Self {
        PointerEvent::Scroll {
            position: position.into(),
            delta,
            modifiers: Modifiers::NONE,
        }
    }

    /// Same event with the given modifiers held.
    pub fn with_modifiers(mut self, held: Modifiers) -> Self {
        match &mut self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Up { modifiers, .. }
            | PointerEvent::Move { modifiers, .. }
            | PointerEvent::Scroll { modifiers, .. } => *modifiers = held,
        }
        self
    }

    /// Component-frame position.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Scroll { position, .. } => *position,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Up { modifiers, .. }
            | PointerEvent::Move { modifiers, .. }
            | PointerEvent::Scroll { modifiers, .. } => *modifiers,
        }
    }
}

/// Keyboard keys the router distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Char(char),
    Named(String),
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_contains() {
        let m = Modifiers::only(ModifierKey::Ctrl);
        assert!(m.contains(ModifierKey::Ctrl));
        assert!(!m.contains(ModifierKey::Shift));
        assert!(Modifiers::default().is_empty());
    }

    #[test]
    fn test_pointer_event_accessors() {
        let e = PointerEvent::down((3.0, 4.0), PointerButton::Left)
            .with_modifiers(Modifiers::only(ModifierKey::Shift));
        assert_eq!(e.position(), Point::new(3.0, 4.0));
        assert!(e.modifiers().shift);
    }

    #[test]
    fn test_pointer_event_json_defaults_modifiers() {
        let json = r#"{"type":"down","position":{"x":1.0,"y":2.0},"button":"middle"}"#;
        let e: PointerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(e, PointerEvent::down((1.0, 2.0), PointerButton::Middle));
    }

    #[test]
    fn test_key_json() {
        let e: KeyEvent = serde_json::from_str(r#"{"key":{"char":"p"}}"#).unwrap();
        assert_eq!(e, KeyEvent::char('p'));
        let e: KeyEvent = serde_json::from_str(r#"{"key":"escape"}"#).unwrap();
        assert_eq!(e.key, Key::Escape);
    }
}
