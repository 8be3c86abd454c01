//! A-10C system settings. Each `Default` is the cold-start avionics state.

pub mod dsms;
pub mod hmcs;
pub mod iffcc;
pub mod radio;
pub mod tad;
pub mod tgp;
pub mod wypt;

pub use dsms::{DsmsSettings, Munition, MunitionClass, MunitionSettings};
pub use hmcs::{HmcsProfile, HmcsSettings};
pub use iffcc::IffccSettings;
pub use radio::{RadioKind, RadioPreset, RadioSettings};
pub use tad::TadSettings;
pub use tgp::TgpSettings;
pub use wypt::{Waypoint, WaypointSettings};
