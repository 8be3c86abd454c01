//! Radio presets for the ARC-210 (CDU preset table), ARC-164 (UHF panel) and ARC-186.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    config::{SystemSettings, SystemTag},
    error::BuildError,
};

static FREQ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{2,3})(?:\.(\d{1,3}))?\s*$").expect("frequency regex"));
static DESC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]{0,8}$").expect("description regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioKind {
    Arc210,
    Arc164,
    Arc186,
}

impl RadioKind {
    pub fn name(&self) -> &'static str {
        match self {
            RadioKind::Arc210 => "ARC-210",
            RadioKind::Arc164 => "ARC-164",
            RadioKind::Arc186 => "ARC-186",
        }
    }

    pub fn preset_count(&self) -> u32 {
        match self {
            RadioKind::Arc210 => 25,
            RadioKind::Arc164 | RadioKind::Arc186 => 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioPreset {
    pub preset: u32,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl RadioPreset {
    pub fn new(preset: u32, frequency: &str, description: &str) -> Self {
        Self {
            preset,
            frequency: frequency.to_string(),
            description: description.to_string(),
        }
    }

    pub fn check_preset(&self, radio: RadioKind) -> Result<(), BuildError> {
        if self.preset == 0 || self.preset > radio.preset_count() {
            return Err(BuildError::OutOfRange {
                field: "preset",
                value: self.preset as usize,
                limit: radio.preset_count() as usize + 1,
            });
        }
        Ok(())
    }

    pub fn checked_description(&self) -> Result<&str, BuildError> {
        if !DESC_RE.is_match(&self.description) {
            return Err(BuildError::InvalidValue {
                field: "description",
                value: self.description.clone(),
            });
        }
        Ok(self.description.trim())
    }
}

/// `"251.0"` -> `"251.000"`. MHz with exactly three decimals.
pub fn normalize_frequency(text: &str) -> Result<String, BuildError> {
    let invalid = || BuildError::InvalidValue {
        field: "frequency",
        value: text.to_string(),
    };
    let caps = FREQ_RE.captures(text).ok_or_else(invalid)?;
    let whole = caps.get(1).map_or("", |m| m.as_str());
    let frac = caps.get(2).map_or("", |m| m.as_str());
    Ok(format!("{whole}.{frac:0<3}"))
}

/// ARC-164 knob positions `[100 MHz, 10 MHz, 1 MHz, 0.1 MHz, 0.025 MHz]` for a frequency.
pub fn arc164_knobs(text: &str) -> Result<[f64; 5], BuildError> {
    let norm = normalize_frequency(text)?;
    let invalid = || BuildError::InvalidValue {
        field: "frequency",
        value: text.to_string(),
    };
    let d: Vec<u32> = norm.chars().filter_map(|c| c.to_digit(10)).collect();
    if d.len() != 6 {
        return Err(invalid());
    }
    let khz = d.iter().fold(0u32, |acc, x| acc * 10 + x);
    if !(225_000..=399_975).contains(&khz) || khz % 25 != 0 {
        return Err(invalid());
    }
    let step = |x: u32| f64::from(x) / 10.0;
    Ok([
        step(d[0] - 1),
        step(d[1]),
        step(d[2]),
        step(d[3]),
        step((d[4] * 10 + d[5]) / 25),
    ])
}

/// ARC-164 preset channel knob position (`1` -> `0.0`, `20` -> `0.95`).
#[inline]
pub fn arc164_preset_knob(preset: u32) -> f64 {
    f64::from(preset.saturating_sub(1)) * 0.05
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arc210_presets: Vec<RadioPreset>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arc164_presets: Vec<RadioPreset>,
    /// Preset to leave the ARC-164 on (in PRESET mode). `None` leaves it in manual.
    pub arc164_initial_preset: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arc186_presets: Vec<RadioPreset>,
}

impl SystemSettings for RadioSettings {
    const TAG: SystemTag = SystemTag::Radio;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_normalize_to_three_decimals() {
        assert_eq!(normalize_frequency("251").unwrap(), "251.000");
        assert_eq!(normalize_frequency("251.5").unwrap(), "251.500");
        assert_eq!(normalize_frequency(" 30.025 ").unwrap(), "30.025");
        assert!(normalize_frequency("25x.0").is_err());
        assert!(normalize_frequency("251.0001").is_err());
    }

    #[test]
    fn arc164_knobs_follow_the_digits() {
        let k = arc164_knobs("251.075").unwrap();
        let want = [0.1, 0.5, 0.1, 0.0, 0.3];
        for (a, b) in k.iter().zip(want) {
            assert!((a - b).abs() < 1e-9, "{k:?}");
        }
        assert!(arc164_knobs("399.975").is_ok());
        assert!(arc164_knobs("224.000").is_err());
        assert!(arc164_knobs("251.010").is_err());
    }

    #[test]
    fn preset_bounds_depend_on_radio() {
        let p = RadioPreset::new(25, "251.000", "");
        assert!(p.check_preset(RadioKind::Arc210).is_ok());
        assert!(p.check_preset(RadioKind::Arc164).is_err());
        assert!(RadioPreset::new(0, "251", "").check_preset(RadioKind::Arc210).is_err());
    }

    #[test]
    fn descriptions_are_short_alphanumerics() {
        assert_eq!(RadioPreset::new(1, "251", "TWR").checked_description().unwrap(), "TWR");
        assert!(RadioPreset::new(1, "251", "TOWER-FREQ").checked_description().is_err());
    }

    #[test]
    fn preset_knob_steps_by_five_hundredths() {
        assert_eq!(arc164_preset_knob(1), 0.0);
        assert!((arc164_preset_knob(20) - 0.95).abs() < 1e-9);
    }
}
