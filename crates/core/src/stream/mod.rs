//! Command streams: the ordered, append-only run of cockpit interactions a builder emits.

mod command;
mod command_stream;

pub use command::Command;
pub use command_stream::{BlockGuard, CommandStream};
