//! Keyboard vocabulary shared by the focus trap and the roving navigators.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::KeyChordError;

/// Navigation-relevant keys, decoded from `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// `ArrowUp`.
    Up,
    /// `ArrowDown`.
    Down,
    /// `ArrowLeft`.
    Left,
    /// `ArrowRight`.
    Right,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `PageUp`.
    PageUp,
    /// `PageDown`.
    PageDown,
    /// `Enter`.
    Enter,
    /// Space bar (`" "` or legacy `"Spacebar"`).
    Space,
    /// `Escape` (or legacy `"Esc"`).
    Escape,
    /// `Tab`, with the Shift modifier state.
    Tab {
        /// Whether Shift was held.
        shift: bool,
    },
}

impl NavKey {
    /// Decodes a DOM `key` value. Returns `None` for keys the navigators ignore.
    pub fn from_key(key: &str, shift: bool) -> Option<Self> {
        let key = match key {
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab { shift },
            _ => return None,
        };
        Some(key)
    }

    /// Returns whether the key commits the current highlight.
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// A global keyboard shortcut such as `Ctrl+K` or `Mod+K`.
///
/// `Mod` matches either Ctrl or Meta so one config string works on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyChord {
    key: String,
    ctrl: bool,
    alt: bool,
    shift: bool,
    meta: bool,
    platform_mod: bool,
}

impl KeyChord {
    /// Returns the lower-cased key the chord fires on.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns whether an event with the given key and modifier state triggers the chord.
    pub fn matches(&self, key: &str, ctrl: bool, alt: bool, shift: bool, meta: bool) -> bool {
        if !key.eq_ignore_ascii_case(&self.key) {
            return false;
        }
        if alt != self.alt || shift != self.shift {
            return false;
        }
        if self.platform_mod {
            return (ctrl || meta) && !(self.ctrl && !ctrl) && !(self.meta && !meta);
        }
        ctrl == self.ctrl && meta == self.meta
    }

    /// Returns the `aria-keyshortcuts` token for the chord.
    pub fn aria_keyshortcuts(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl || self.platform_mod {
            parts.push("Control".to_string());
        }
        if self.meta {
            parts.push("Meta".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.key.to_ascii_uppercase());
        parts.join("+")
    }
}

impl Default for KeyChord {
    fn default() -> Self {
        Self {
            key: "k".to_string(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            platform_mod: true,
        }
    }
}

impl FromStr for KeyChord {
    type Err = KeyChordError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(KeyChordError::Empty);
        }

        let mut segments: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        // "Ctrl++" names the plus key.
        if trimmed.ends_with("++") {
            segments.truncate(segments.len().saturating_sub(2));
            segments.push("+");
        }
        let Some(key) = segments.pop().filter(|key| !key.is_empty()) else {
            return Err(KeyChordError::MissingKey(trimmed.to_string()));
        };

        let mut chord = Self {
            key: key.to_ascii_lowercase(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            platform_mod: false,
        };
        for modifier in segments {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "alt" | "option" => chord.alt = true,
                "shift" => chord.shift = true,
                "meta" | "cmd" | "command" | "super" => chord.meta = true,
                "mod" => chord.platform_mod = true,
                _ => {
                    return Err(KeyChordError::UnknownModifier {
                        modifier: modifier.to_string(),
                        chord: trimmed.to_string(),
                    })
                }
            }
        }
        Ok(chord)
    }
}

impl TryFrom<String> for KeyChord {
    type Error = KeyChordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyChord> for String {
    fn from(value: KeyChord) -> Self {
        value.to_string()
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.platform_mod {
            write!(f, "Mod+")?;
        }
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.meta {
            write!(f, "Meta+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_navigation_keys_and_ignores_text() {
        assert_eq!(NavKey::from_key("ArrowDown", false), Some(NavKey::Down));
        assert_eq!(NavKey::from_key(" ", false), Some(NavKey::Space));
        assert_eq!(NavKey::from_key("Esc", false), Some(NavKey::Escape));
        assert_eq!(
            NavKey::from_key("Tab", true),
            Some(NavKey::Tab { shift: true })
        );
        assert_eq!(NavKey::from_key("a", false), None);
        assert!(NavKey::Enter.is_activation());
        assert!(!NavKey::Escape.is_activation());
    }

    #[test]
    fn mod_chord_matches_ctrl_or_meta() {
        let chord: KeyChord = "Mod+K".parse().expect("parse");
        assert!(chord.matches("k", true, false, false, false));
        assert!(chord.matches("K", false, false, false, true));
        assert!(!chord.matches("k", false, false, false, false));
        assert!(!chord.matches("k", true, false, true, false));
    }

    #[test]
    fn explicit_ctrl_chord_rejects_meta() {
        let chord: KeyChord = "Ctrl+Shift+P".parse().expect("parse");
        assert!(chord.matches("p", true, false, true, false));
        assert!(!chord.matches("p", false, false, true, true));
        assert_eq!(chord.aria_keyshortcuts(), "Control+Shift+P");
    }

    #[test]
    fn parse_errors_are_reported() {
        assert_eq!("".parse::<KeyChord>(), Err(KeyChordError::Empty));
        assert_eq!(
            "Ctrl+".parse::<KeyChord>(),
            Err(KeyChordError::MissingKey("Ctrl+".to_string()))
        );
        assert!(matches!(
            "Hyper+K".parse::<KeyChord>(),
            Err(KeyChordError::UnknownModifier { .. })
        ));
    }

    #[test]
    fn chord_deserializes_from_config_string() {
        let chord: KeyChord = serde_json::from_str("\"Alt+J\"").expect("deserialize");
        assert!(chord.matches("j", false, true, false, false));
        assert_eq!(serde_json::to_string(&chord).expect("serialize"), "\"Alt+J\"");
    }
}
