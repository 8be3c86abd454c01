use serde::Serialize;
use std::sync::Arc;

/// One token of a command stream.
///
/// Serialized as `{"f":<kind>,"a":{..}}`. Action-like commands keep their logical names
/// for diagnostics; only the resolved ids go over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "f", content = "a")]
pub enum Command {
    /// Press a cockpit control, then hold off `dt` ms.
    Action {
        #[serde(skip)]
        device: Arc<str>,
        #[serde(skip)]
        action: Arc<str>,
        dev: u32,
        code: u32,
        dt: u64,
    },
    /// Set an analog control (knob, multi-position switch) to a position.
    Dynamic {
        #[serde(skip)]
        device: Arc<str>,
        #[serde(skip)]
        action: Arc<str>,
        dev: u32,
        code: u32,
        v: f64,
        v2: f64,
    },
    Wait {
        dt: u64,
    },
    Marker {
        tag: String,
    },
    Exec {
        func: String,
        args: Vec<String>,
    },
    /// Opens a block the receiver runs only if `cond(args) == expect`.
    If {
        cond: String,
        expect: bool,
        args: Vec<String>,
    },
    EndIf,
    /// Opens a block the receiver repeats while `cond(args)` holds.
    While {
        cond: String,
        args: Vec<String>,
    },
    EndWhile,
    /// Always the last command of a query stream. The receiver echoes `id` with its reply.
    Query {
        func: String,
        args: Vec<String>,
        id: u64,
    },
}

impl Command {
    /// `DEVICE.ACTION` for action-like commands.
    pub fn label(&self) -> Option<String> {
        match self {
            Command::Action { device, action, .. } | Command::Dynamic { device, action, .. } => {
                Some(format!("{device}.{action}"))
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_action(&self, dev: &str, act: &str) -> bool {
        matches!(self, Command::Action { device, action, .. } if &**device == dev && &**action == act)
    }

    #[inline]
    pub fn is_dynamic(&self, dev: &str, act: &str) -> bool {
        matches!(self, Command::Dynamic { device, action, .. } if &**device == dev && &**action == act)
    }
}
