//! DSMS: station loadout, per-munition release settings, and profile order.

use core::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::{SystemSettings, SystemTag};

pub const NUM_STATIONS: u8 = 11;

/// Station on the other wing (`1 <-> 11`, ..., `5 <-> 7`); station 6 is its own mirror.
#[inline]
pub fn mirror_station(station: u8) -> u8 {
    NUM_STATIONS + 1 - station
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MunitionClass {
    Bomb,
    LaserBomb,
    GpsBomb,
    ClusterBomb,
    Missile,
    Rocket,
    Pod,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Munition {
    Mk82,
    Mk82Air,
    Mk84,
    Gbu10,
    Gbu12,
    Gbu31,
    Gbu38,
    Gbu54,
    Cbu87,
    Cbu97,
    Cbu103,
    Cbu105,
    Agm65D,
    Agm65H,
    Lau68,
    Lau131,
    Aim9M,
    Litening,
    Alq184,
}

impl Munition {
    /// Order of the DSMS inventory list.
    pub const ALL: [Munition; 19] = [
        Munition::Mk82,
        Munition::Mk82Air,
        Munition::Mk84,
        Munition::Gbu10,
        Munition::Gbu12,
        Munition::Gbu31,
        Munition::Gbu38,
        Munition::Gbu54,
        Munition::Cbu87,
        Munition::Cbu97,
        Munition::Cbu103,
        Munition::Cbu105,
        Munition::Agm65D,
        Munition::Agm65H,
        Munition::Lau68,
        Munition::Lau131,
        Munition::Aim9M,
        Munition::Litening,
        Munition::Alq184,
    ];

    /// Name the DSMS (and the receiver) uses.
    pub fn name(&self) -> &'static str {
        match self {
            Munition::Mk82 => "MK-82",
            Munition::Mk82Air => "MK-82AIR",
            Munition::Mk84 => "MK-84",
            Munition::Gbu10 => "GBU-10",
            Munition::Gbu12 => "GBU-12",
            Munition::Gbu31 => "GBU-31",
            Munition::Gbu38 => "GBU-38",
            Munition::Gbu54 => "GBU-54",
            Munition::Cbu87 => "CBU-87",
            Munition::Cbu97 => "CBU-97",
            Munition::Cbu103 => "CBU-103",
            Munition::Cbu105 => "CBU-105",
            Munition::Agm65D => "AGM-65D",
            Munition::Agm65H => "AGM-65H",
            Munition::Lau68 => "LAU-68",
            Munition::Lau131 => "LAU-131",
            Munition::Aim9M => "AIM-9M",
            Munition::Litening => "TGP",
            Munition::Alq184 => "ALQ-184",
        }
    }

    pub fn class(&self) -> MunitionClass {
        use Munition as M;
        match self {
            M::Mk82 | M::Mk82Air | M::Mk84 => MunitionClass::Bomb,
            M::Gbu10 | M::Gbu12 | M::Gbu54 => MunitionClass::LaserBomb,
            M::Gbu31 | M::Gbu38 => MunitionClass::GpsBomb,
            M::Cbu87 | M::Cbu97 | M::Cbu103 | M::Cbu105 => MunitionClass::ClusterBomb,
            M::Agm65D | M::Agm65H | M::Aim9M => MunitionClass::Missile,
            M::Lau68 | M::Lau131 => MunitionClass::Rocket,
            M::Litening | M::Alq184 => MunitionClass::Pod,
        }
    }

    /// Position in the DSMS inventory list.
    pub fn inventory_index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Pods are loaded one station at a time; everything else may use LOAD SYM.
    pub fn symmetric_loadable(&self) -> bool {
        self.class() != MunitionClass::Pod
    }

    pub fn has_profile(&self) -> bool {
        !matches!(self.class(), MunitionClass::Pod | MunitionClass::Missile)
    }

    pub fn is_laser_guided(&self) -> bool {
        matches!(self.class(), MunitionClass::LaserBomb) || *self == Munition::Lau131
    }

    pub fn has_release_settings(&self) -> bool {
        matches!(
            self.class(),
            MunitionClass::Bomb
                | MunitionClass::LaserBomb
                | MunitionClass::GpsBomb
                | MunitionClass::ClusterBomb
                | MunitionClass::Rocket
        )
    }

    pub fn has_fuze_settings(&self) -> bool {
        self.class() == MunitionClass::ClusterBomb
    }

    /// Name of the DSMS profile created for this munition at cold start.
    pub fn default_profile(&self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for Munition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Munition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown munition '{s}'"))
    }
}

pub const DELIVERY_MODES: usize = 2;
pub const ESCAPE_MANEUVERS: usize = 4;
pub const RELEASE_MODES: usize = 4;

/// Release settings for one munition's DSMS profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunitionSettings {
    pub laser_code: String,
    pub auto_lase: bool,
    pub lase_seconds: u32,
    /// CCIP, CCRP
    pub delivery_mode: usize,
    /// NONE, CLM, TRN, TLT
    pub escape_maneuver: usize,
    /// SGL, PRS, RIP SGL, RIP PRS
    pub release_mode: usize,
    pub ripple_qty: u32,
    pub ripple_ft: u32,
    pub hof: u32,
    pub rpm: u32,
}

impl MunitionSettings {
    pub fn default_for(m: Munition) -> Self {
        let cbu = m.has_fuze_settings();
        Self {
            laser_code: if m.is_laser_guided() { "1688" } else { "" }.to_string(),
            auto_lase: false,
            lase_seconds: 0,
            delivery_mode: 0,
            escape_maneuver: if m.class() == MunitionClass::Rocket { 0 } else { 1 },
            release_mode: 0,
            ripple_qty: 1,
            ripple_ft: 75,
            hof: if cbu { 1800 } else { 0 },
            rpm: if matches!(m, Munition::Cbu87 | Munition::Cbu103) { 1500 } else { 0 },
        }
    }

    /// These settings with every field `m` has no control for put back to its default.
    /// A munition without a DSMS profile has nothing to set at all.
    pub fn applicable_to(&self, m: Munition) -> Self {
        let default = Self::default_for(m);
        if !m.has_profile() {
            return default;
        }
        let mut s = self.clone();
        if !m.is_laser_guided() {
            s.laser_code = default.laser_code.clone();
            s.auto_lase = default.auto_lase;
            s.lase_seconds = default.lase_seconds;
        }
        if !m.has_release_settings() {
            s.delivery_mode = default.delivery_mode;
            s.escape_maneuver = default.escape_maneuver;
            s.release_mode = default.release_mode;
            s.ripple_qty = default.ripple_qty;
            s.ripple_ft = default.ripple_ft;
        }
        if !m.has_fuze_settings() {
            s.hof = default.hof;
            s.rpm = default.rpm;
        }
        s
    }

    /// True when nothing `m` can actually use differs from its default.
    pub fn is_default_for(&self, m: Munition) -> bool {
        self.applicable_to(m) == Self::default_for(m)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DsmsSettings {
    /// Station 1..=11 at index 0..=10. `None` leaves the station as the jet has it.
    pub stations: [Option<Munition>; NUM_STATIONS as usize],
    /// Settings that differ from a munition's profile defaults.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub munitions: IndexMap<Munition, MunitionSettings>,
    /// Desired profile order, top first. Profiles not named keep their relative order below.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profile_order: Vec<String>,
}

impl DsmsSettings {
    /// Configured munition for `station` (1-based). `None` for empty or unknown stations.
    pub fn station(&self, station: u8) -> Option<Munition> {
        let ix = usize::from(station.checked_sub(1)?);
        self.stations.get(ix).copied().flatten()
    }

    pub fn set_station(&mut self, station: u8, munition: Option<Munition>) {
        if let Some(slot) = station
            .checked_sub(1)
            .and_then(|ix| self.stations.get_mut(usize::from(ix)))
        {
            *slot = munition;
        }
    }

    /// Settings for `m`, falling back to its defaults.
    pub fn settings_for(&self, m: Munition) -> MunitionSettings {
        self.munitions
            .get(&m)
            .cloned()
            .unwrap_or_else(|| MunitionSettings::default_for(m))
    }

    pub fn loadout_is_default(&self) -> bool {
        self.stations.iter().all(Option::is_none)
    }

    pub fn munitions_are_default(&self) -> bool {
        self.munitions
            .iter()
            .all(|(m, s)| s.is_default_for(*m))
    }
}

impl SystemSettings for DsmsSettings {
    const TAG: SystemTag = SystemTag::Dsms;

    fn is_default(&self) -> bool {
        self.loadout_is_default() && self.munitions_are_default() && self.profile_order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_pair_up_around_station_six() {
        assert_eq!(mirror_station(3), 9);
        assert_eq!(mirror_station(9), 3);
        assert_eq!(mirror_station(6), 6);
        assert_eq!(mirror_station(1), 11);
    }

    #[test]
    fn default_entries_in_the_settings_map_are_still_default() {
        let mut d = DsmsSettings::default();
        d.munitions
            .insert(Munition::Gbu12, MunitionSettings::default_for(Munition::Gbu12));
        assert!(d.is_default());
        d.munitions.get_mut(&Munition::Gbu12).unwrap().laser_code = "1511".into();
        assert!(!d.is_default());
        d.reset();
        assert!(d.is_default());
    }

    #[test]
    fn settings_a_munition_cannot_use_are_ignored() {
        let mut mk = MunitionSettings::default_for(Munition::Mk82);
        mk.auto_lase = true;
        mk.lase_seconds = 8;
        mk.laser_code = "1511".into();
        assert!(mk.is_default_for(Munition::Mk82));
        mk.hof = 900;
        assert!(mk.is_default_for(Munition::Mk82));
        mk.escape_maneuver = 3;
        assert!(!mk.is_default_for(Munition::Mk82));

        let mut mav = MunitionSettings::default_for(Munition::Agm65D);
        mav.escape_maneuver = 3;
        mav.release_mode = 2;
        assert!(mav.is_default_for(Munition::Agm65D));

        let mut d = DsmsSettings::default();
        d.munitions.insert(Munition::Agm65D, mav);
        let mut mk = MunitionSettings::default_for(Munition::Mk82);
        mk.auto_lase = true;
        d.munitions.insert(Munition::Mk82, mk);
        assert!(d.is_default());
    }

    #[test]
    fn laser_guided_munitions_keep_their_lase_settings() {
        let mut gbu = MunitionSettings::default_for(Munition::Gbu12);
        gbu.auto_lase = true;
        gbu.lase_seconds = 8;
        let kept = gbu.applicable_to(Munition::Gbu12);
        assert!(kept.auto_lase);
        assert_eq!(kept.lase_seconds, 8);
        assert!(!gbu.is_default_for(Munition::Gbu12));
    }

    #[test]
    fn stations_are_one_based() {
        let mut d = DsmsSettings::default();
        d.set_station(3, Some(Munition::Gbu12));
        d.set_station(0, Some(Munition::Mk82));
        d.set_station(12, Some(Munition::Mk82));
        assert_eq!(d.station(3), Some(Munition::Gbu12));
        assert_eq!(d.station(0), None);
        assert_eq!(d.station(12), None);
        assert_eq!(d.stations.iter().flatten().count(), 1);
    }

    #[test]
    fn munition_names_parse_back() {
        for m in Munition::ALL {
            assert_eq!(m.name().parse::<Munition>(), Ok(m));
        }
        assert!("gbu-99".parse::<Munition>().is_err());
    }

    #[test]
    fn only_pods_refuse_symmetric_loads() {
        assert!(Munition::Gbu12.symmetric_loadable());
        assert!(!Munition::Litening.symmetric_loadable());
    }
}
