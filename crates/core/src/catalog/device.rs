use indexmap::IndexMap;
use std::sync::Arc;

use crate::error::BuildError;

/// Codes are handed out in declaration order starting here.
pub const FIRST_COMMAND_CODE: u32 = 3001;

const KEYPAD_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const KEYPAD_DIGITS: &str = "0123456789";
const KEYPAD_SYMBOLS: &[&str] = &["SPC", "DASH", "POINT", "SLASH"];

/// One clickable cockpit device (panel, MFD, keypad).
#[derive(Debug, Clone)]
pub struct Device {
    pub name: Arc<str>,
    pub id: u32,
    actions: IndexMap<Arc<str>, u32>,
    has_keypad: bool,
}

impl Device {
    pub fn new(name: &str, id: u32) -> Self {
        Self {
            name: Arc::from(name),
            id,
            actions: IndexMap::new(),
            has_keypad: false,
        }
    }

    /// Append actions; each gets the next free command code.
    pub fn with_actions(mut self, names: &[&str]) -> Self {
        for n in names {
            let code = FIRST_COMMAND_CODE + self.actions.len() as u32;
            self.actions.entry(Arc::from(*n)).or_insert(code);
        }
        self
    }

    /// Append the alphanumeric keypad (`A`..`Z`, `0`..`9`, `SPC`, `DASH`, `POINT`, `SLASH`).
    pub fn with_keypad(mut self) -> Self {
        let keys: Vec<String> = KEYPAD_LETTERS
            .chars()
            .chain(KEYPAD_DIGITS.chars())
            .map(String::from)
            .chain(KEYPAD_SYMBOLS.iter().map(|s| s.to_string()))
            .collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        self = self.with_actions(&refs);
        self.has_keypad = true;
        self
    }

    #[inline]
    pub fn code(&self, action: &str) -> Option<u32> {
        self.actions.get(action).copied()
    }

    #[inline]
    pub fn has_keypad(&self) -> bool {
        self.has_keypad
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(|k| &**k)
    }

    /// Keypad action name for a text character.
    pub fn keypad_action(&self, ch: char) -> Result<String, BuildError> {
        let unmapped = || BuildError::UnmappedCharacter {
            device: self.name.to_string(),
            ch,
        };
        if !self.has_keypad {
            return Err(unmapped());
        }
        let up = ch.to_ascii_uppercase();
        let name = match up {
            'A'..='Z' | '0'..='9' => up.to_string(),
            ' ' => "SPC".to_string(),
            '-' => "DASH".to_string(),
            '.' => "POINT".to_string(),
            '/' => "SLASH".to_string(),
            _ => return Err(unmapped()),
        };
        Ok(name)
    }
}
