//! HMCS: common options plus three display profiles.
//!
//! Profile options are small enumerations. Two-position options are `OFF`/`ON`; three-position
//! options are `OCLD`/`ON`/`OFF`.

use serde::{Deserialize, Serialize};

use crate::{
    a10c::pages::{HMCS_BRIGHTNESS_MEMORY, HMCS_TGP_TRACK},
    builder::FieldRow,
    config::{SystemSettings, SystemTag},
};

pub const NUM_PROFILES: usize = 3;

const OFF: usize = 0;
const ON: usize = 1;
const OCLD: usize = 0;
const ON3: usize = 1;
const OFF3: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmcsProfile {
    pub crosshair: usize,
    pub own_spi: usize,
    pub spi_indicator: usize,
    pub horizon_line: usize,
    pub hdc: usize,
    pub hookship: usize,
    pub tgp_diamond: usize,
    pub tgp_fov: usize,
    pub flight_members: usize,
    pub flight_member_spi: usize,
    pub markpoints: usize,
    pub steerpoint: usize,
    pub airspeed: usize,
    pub radar_altitude: usize,
    pub baro_altitude: usize,
    pub aircraft_heading: usize,
    pub helmet_heading: usize,
}

impl HmcsProfile {
    /// Cold-start content of PRO1 (`0`), PRO2 (`1`) or PRO3 (`2`).
    pub fn default_for(profile: usize) -> Self {
        let full = HmcsProfile {
            crosshair: ON,
            own_spi: ON3,
            spi_indicator: ON,
            horizon_line: ON,
            hdc: ON,
            hookship: ON3,
            tgp_diamond: ON3,
            tgp_fov: ON,
            flight_members: ON3,
            flight_member_spi: ON3,
            markpoints: ON3,
            steerpoint: ON3,
            airspeed: ON,
            radar_altitude: ON,
            baro_altitude: ON,
            aircraft_heading: ON,
            helmet_heading: ON,
        };
        match profile {
            0 => full,
            1 => HmcsProfile {
                horizon_line: OFF,
                hdc: OFF,
                flight_member_spi: OFF3,
                markpoints: OCLD,
                ..full
            },
            _ => HmcsProfile {
                crosshair: OFF,
                horizon_line: OFF,
                hdc: OFF,
                hookship: OFF3,
                tgp_fov: OFF,
                flight_members: OFF3,
                flight_member_spi: OFF3,
                markpoints: OFF3,
                airspeed: OFF,
                radar_altitude: OFF,
                baro_altitude: OFF,
                helmet_heading: OFF,
                ..full
            },
        }
    }
}

/// Profile options in display order on the HMCS profile edit page.
pub const HMCS_PROFILE_FIELDS: &[FieldRow<HmcsProfile>] = &[
    FieldRow::toggle("crosshair", |p| p.crosshair),
    FieldRow::cycle("own_spi", 3, |p| p.own_spi),
    FieldRow::toggle("spi_indicator", |p| p.spi_indicator),
    FieldRow::toggle("horizon_line", |p| p.horizon_line),
    FieldRow::toggle("hdc", |p| p.hdc),
    FieldRow::cycle("hookship", 3, |p| p.hookship),
    FieldRow::cycle("tgp_diamond", 3, |p| p.tgp_diamond),
    FieldRow::toggle("tgp_fov", |p| p.tgp_fov),
    FieldRow::cycle("flight_members", 3, |p| p.flight_members),
    FieldRow::cycle("flight_member_spi", 3, |p| p.flight_member_spi),
    FieldRow::cycle("markpoints", 3, |p| p.markpoints),
    FieldRow::cycle("steerpoint", 3, |p| p.steerpoint),
    FieldRow::toggle("airspeed", |p| p.airspeed),
    FieldRow::toggle("radar_altitude", |p| p.radar_altitude),
    FieldRow::toggle("baro_altitude", |p| p.baro_altitude),
    FieldRow::toggle("aircraft_heading", |p| p.aircraft_heading),
    FieldRow::toggle("helmet_heading", |p| p.helmet_heading),
];

/// INR AREA, INR POINT, AUTO
pub const TGP_TRACK_MODES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmcsSettings {
    /// PRO1, PRO2, PRO3
    pub active_profile: usize,
    pub tgp_track: usize,
    pub brightness_memory: bool,
    pub profiles: [HmcsProfile; NUM_PROFILES],
}

impl Default for HmcsSettings {
    fn default() -> Self {
        Self {
            active_profile: 0,
            tgp_track: 2,
            brightness_memory: false,
            profiles: [
                HmcsProfile::default_for(0),
                HmcsProfile::default_for(1),
                HmcsProfile::default_for(2),
            ],
        }
    }
}

/// Options on the HMCS main page; each has its own button.
pub const HMCS_COMMON_FIELDS: &[(FieldRow<HmcsSettings>, &str)] = &[
    (FieldRow::cycle("tgp_track", TGP_TRACK_MODES, |s| s.tgp_track), HMCS_TGP_TRACK),
    (FieldRow::toggle("brightness_memory", |s| usize::from(s.brightness_memory)), HMCS_BRIGHTNESS_MEMORY),
];

impl SystemSettings for HmcsSettings {
    const TAG: SystemTag = SystemTag::Hmcs;
}
