use serde::{Deserialize, Serialize};

use crate::{
    builder::FieldRow,
    config::{SystemSettings, SystemTag},
};

/// Targeting pod CNTL page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TgpSettings {
    pub laser_code: String,
    /// Target area altitude filter, feet.
    pub taaf: u32,
    pub frnd_latch: bool,
    /// LL, MGRS, OFF
    pub coord_display: usize,
    /// CCD, IR
    pub video_mode: usize,
    /// METRIC, USA, OFF
    pub yardstick: usize,
}

impl Default for TgpSettings {
    fn default() -> Self {
        Self {
            laser_code: "1688".to_string(),
            taaf: 0,
            frnd_latch: false,
            coord_display: 0,
            video_mode: 1,
            yardstick: 0,
        }
    }
}

impl SystemSettings for TgpSettings {
    const TAG: SystemTag = SystemTag::Tgp;
}

/// CNTL page options after the entry fields, in cursor order.
pub const TGP_CNTL_FIELDS: &[FieldRow<TgpSettings>] = &[
    FieldRow::toggle("frnd_latch", |s| usize::from(s.frnd_latch)),
    FieldRow::cycle("coord_display", 3, |s| s.coord_display),
    FieldRow::toggle("video_mode", |s| s.video_mode),
    FieldRow::cycle("yardstick", 3, |s| s.yardstick),
];
