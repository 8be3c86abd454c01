//! Navigation waypoints entered through the CDU.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    config::{SystemSettings, SystemTag},
    error::BuildError,
};

static DDM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([NSEWnsew])\s*(\d{1,3})\s*°?\s*(\d{1,2})(?:\.(\d{1,3}))?\s*'?\s*$")
        .expect("ddm regex")
});
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]{1,12}$").expect("waypoint name regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    /// Degrees and decimal minutes, e.g. `N 41° 12.345'`.
    pub latitude: String,
    pub longitude: String,
    /// Feet; empty keeps the CDU's terrain elevation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub elevation: String,
}

impl Waypoint {
    pub fn new(name: &str, latitude: &str, longitude: &str, elevation: &str) -> Self {
        Self {
            name: name.to_string(),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            elevation: elevation.to_string(),
        }
    }

    pub fn checked_name(&self) -> Result<String, BuildError> {
        if !NAME_RE.is_match(&self.name) {
            return Err(BuildError::InvalidValue {
                field: "waypoint name",
                value: self.name.clone(),
            });
        }
        Ok(self.name.trim().to_ascii_uppercase())
    }

    pub fn checked_elevation(&self) -> Result<Option<&str>, BuildError> {
        let e = self.elevation.trim();
        if e.is_empty() {
            return Ok(None);
        }
        if !e.chars().all(|c| c.is_ascii_digit()) || e.len() > 5 {
            return Err(BuildError::InvalidValue {
                field: "elevation",
                value: self.elevation.clone(),
            });
        }
        Ok(Some(e))
    }
}

/// DDM text -> CDU scratchpad entry: hemisphere, zero-padded degrees (2 for latitude, 3 for
/// longitude), minutes, three decimals. `N 41° 2.5'` -> `N4102500`.
pub fn ddm_entry(axis: Axis, text: &str) -> Result<String, BuildError> {
    let field = match axis {
        Axis::Latitude => "latitude",
        Axis::Longitude => "longitude",
    };
    let invalid = || BuildError::InvalidValue {
        field,
        value: text.to_string(),
    };
    let caps = DDM_RE.captures(text).ok_or_else(invalid)?;
    let hemi = caps[1].to_ascii_uppercase();
    let deg: u32 = caps[2].parse().map_err(|_| invalid())?;
    let min: u32 = caps[3].parse().map_err(|_| invalid())?;
    let frac = caps.get(4).map_or("", |m| m.as_str());

    let (ok_hemi, max_deg, width) = match axis {
        Axis::Latitude => (hemi == "N" || hemi == "S", 90, 2),
        Axis::Longitude => (hemi == "E" || hemi == "W", 180, 3),
    };
    if !ok_hemi || deg > max_deg || min >= 60 || (deg == max_deg && (min > 0 || !frac.trim_end_matches('0').is_empty())) {
        return Err(invalid());
    }
    Ok(format!("{hemi}{deg:0width$}{min:02}{frac:0<3}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointSettings {
    pub waypoints: Vec<Waypoint>,
}

impl SystemSettings for WaypointSettings {
    const TAG: SystemTag = SystemTag::Waypoints;
}
