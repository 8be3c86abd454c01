use serde::{Deserialize, Serialize};

use crate::{
    a10c::pages::{TAD_BULLSEYE, TAD_CENTER_DEPRESS, TAD_COORD_DISPLAY, TAD_HOOK_OWNSHIP, TAD_MAP_OPTION},
    builder::FieldRow,
    config::{SystemSettings, SystemTag},
};

/// TAD: datalink network identity (CDU NET page) and TAD display profile (MFD).
///
/// Empty strings leave the jet's value alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TadSettings {
    pub group_id: String,
    pub own_id: String,
    pub callsign: String,
    pub flight_lead: bool,

    pub hook_ownship: bool,
    /// AUTO, MAN, OFF
    pub map_option: usize,
    pub center_depress: bool,
    pub bullseye: bool,
    /// LL, MGRS, OFF
    pub coord_display: usize,
}

impl Default for TadSettings {
    fn default() -> Self {
        Self {
            group_id: String::new(),
            own_id: String::new(),
            callsign: String::new(),
            flight_lead: false,
            hook_ownship: false,
            map_option: 0,
            center_depress: false,
            bullseye: true,
            coord_display: 0,
        }
    }
}

impl TadSettings {
    pub fn network_is_default(&self) -> bool {
        let d = Self::default();
        self.group_id == d.group_id
            && self.own_id == d.own_id
            && self.callsign == d.callsign
            && self.flight_lead == d.flight_lead
    }
}

impl SystemSettings for TadSettings {
    const TAG: SystemTag = SystemTag::Tad;
}

/// TAD profile options and the button that steps each one.
pub const TAD_PROFILE_FIELDS: &[(FieldRow<TadSettings>, &str)] = &[
    (FieldRow::toggle("hook_ownship", |s| usize::from(s.hook_ownship)), TAD_HOOK_OWNSHIP),
    (FieldRow::cycle("map_option", 3, |s| s.map_option), TAD_MAP_OPTION),
    (FieldRow::toggle("center_depress", |s| usize::from(s.center_depress)), TAD_CENTER_DEPRESS),
    (FieldRow::toggle("bullseye", |s| usize::from(s.bullseye)), TAD_BULLSEYE),
    (FieldRow::cycle("coord_display", 3, |s| s.coord_display), TAD_COORD_DISPLAY),
];
