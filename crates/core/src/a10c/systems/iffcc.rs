use serde::{Deserialize, Serialize};

use crate::{
    builder::FieldRow,
    config::{SystemSettings, SystemTag},
};

/// IFFCC test-menu options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IffccSettings {
    pub ccip_gun_cross_occult: bool,
    /// OFF, 5 MIL, 3/9
    pub ccip_consent: usize,
    pub auto_data_display: bool,
    pub tapes: bool,
    pub metric: bool,
    pub radar_altimeter: bool,
    /// IAS, MACH/IAS, GS, TRUE
    pub airspeed: usize,
    pub vertical_velocity: bool,
}

impl Default for IffccSettings {
    fn default() -> Self {
        Self {
            ccip_gun_cross_occult: false,
            ccip_consent: 0,
            auto_data_display: false,
            tapes: false,
            metric: false,
            radar_altimeter: true,
            airspeed: 0,
            vertical_velocity: false,
        }
    }
}

impl SystemSettings for IffccSettings {
    const TAG: SystemTag = SystemTag::Iffcc;
}

/// Test-menu rows, top to bottom.
pub const IFFCC_FIELDS: &[FieldRow<IffccSettings>] = &[
    FieldRow::toggle("ccip_gun_cross_occult", |s| usize::from(s.ccip_gun_cross_occult)),
    FieldRow::cycle("ccip_consent", 3, |s| s.ccip_consent),
    FieldRow::toggle("auto_data_display", |s| usize::from(s.auto_data_display)),
    FieldRow::toggle("tapes", |s| usize::from(s.tapes)),
    FieldRow::toggle("metric", |s| usize::from(s.metric)),
    FieldRow::toggle("radar_altimeter", |s| usize::from(s.radar_altimeter)),
    FieldRow::cycle("airspeed", 4, |s| s.airspeed),
    FieldRow::toggle("vertical_velocity", |s| usize::from(s.vertical_velocity)),
];
