//! Configuration metadata shared by every airframe.

use core::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::a10c::A10CConfiguration;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub enum Airframe {
    #[default]
    A10C,
}

impl Airframe {
    pub fn name(&self) -> &'static str {
        match self {
            Airframe::A10C => "A-10C",
        }
    }

    pub const ALL: [Airframe; 1] = [Airframe::A10C];

    /// Configuration factory keyed on airframe.
    pub fn create_configuration(&self, name: &str) -> A10CConfiguration {
        match self {
            Airframe::A10C => A10CConfiguration::new(name),
        }
    }
}

impl fmt::Display for Airframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Airframe {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a10c" | "a-10c" | "a10" => Ok(Airframe::A10C),
            _ => Err("expected one of: a10c"),
        }
    }
}

/// Avionics subsystem identity within a configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SystemTag {
    Dsms,
    Hmcs,
    Iffcc,
    Radio,
    Tad,
    Tgp,
    Waypoints,
}

impl SystemTag {
    pub const ALL: [SystemTag; 7] = [
        SystemTag::Dsms,
        SystemTag::Hmcs,
        SystemTag::Iffcc,
        SystemTag::Radio,
        SystemTag::Tad,
        SystemTag::Tgp,
        SystemTag::Waypoints,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SystemTag::Dsms => "DSMS",
            SystemTag::Hmcs => "HMCS",
            SystemTag::Iffcc => "IFFCC",
            SystemTag::Radio => "RADIO",
            SystemTag::Tad => "TAD",
            SystemTag::Tgp => "TGP",
            SystemTag::Waypoints => "WYPT",
        }
    }
}

impl fmt::Display for SystemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bag of avionics settings whose `Default` is the jet's cold-start state.
pub trait SystemSettings: Default + PartialEq {
    const TAG: SystemTag;

    /// True iff every field equals its avionics default.
    fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationMeta {
    pub uid: Uuid,
    pub name: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub last_system_edited: Option<SystemTag>,
    /// System -> uid of the configuration it is kept in lock-step with.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub linked_systems: IndexMap<SystemTag, Uuid>,
}

impl ConfigurationMeta {
    pub fn new(name: &str) -> Self {
        Self {
            uid: Uuid::new_v4(),
            name: name.trim().to_string(),
            favorite: false,
            last_system_edited: None,
            linked_systems: IndexMap::new(),
        }
    }

    /// Display names are unique per airframe, ignoring case.
    pub fn name_is_unique<'a, I>(name: &str, existing: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted = name.trim().to_lowercase();
        !existing
            .into_iter()
            .any(|n| n.trim().to_lowercase() == wanted)
    }

    pub fn link(&mut self, tag: SystemTag, target: Uuid) {
        self.linked_systems.insert(tag, target);
    }

    pub fn unlink(&mut self, tag: SystemTag) -> Option<Uuid> {
        self.linked_systems.shift_remove(&tag)
    }
}
