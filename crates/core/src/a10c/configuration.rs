//! One named A-10C configuration: metadata plus every system's settings.

use serde::{Deserialize, Serialize};

use crate::{
    a10c::systems::{
        DsmsSettings, HmcsSettings, IffccSettings, RadioSettings, TadSettings, TgpSettings,
        WaypointSettings,
    },
    config::{ConfigurationMeta, SystemSettings, SystemTag},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A10CConfiguration {
    #[serde(flatten)]
    pub meta: ConfigurationMeta,
    #[serde(default)]
    pub dsms: DsmsSettings,
    #[serde(default)]
    pub hmcs: HmcsSettings,
    #[serde(default)]
    pub iffcc: IffccSettings,
    #[serde(default)]
    pub radio: RadioSettings,
    #[serde(default)]
    pub tad: TadSettings,
    #[serde(default)]
    pub tgp: TgpSettings,
    #[serde(default)]
    pub wypt: WaypointSettings,
}

impl A10CConfiguration {
    pub fn new(name: &str) -> Self {
        Self {
            meta: ConfigurationMeta::new(name),
            dsms: DsmsSettings::default(),
            hmcs: HmcsSettings::default(),
            iffcc: IffccSettings::default(),
            radio: RadioSettings::default(),
            tad: TadSettings::default(),
            tgp: TgpSettings::default(),
            wypt: WaypointSettings::default(),
        }
    }

    pub fn is_default(&self, tag: SystemTag) -> bool {
        match tag {
            SystemTag::Dsms => self.dsms.is_default(),
            SystemTag::Hmcs => self.hmcs.is_default(),
            SystemTag::Iffcc => self.iffcc.is_default(),
            SystemTag::Radio => self.radio.is_default(),
            SystemTag::Tad => self.tad.is_default(),
            SystemTag::Tgp => self.tgp.is_default(),
            SystemTag::Waypoints => self.wypt.is_default(),
        }
    }

    pub fn reset(&mut self, tag: SystemTag) {
        match tag {
            SystemTag::Dsms => self.dsms.reset(),
            SystemTag::Hmcs => self.hmcs.reset(),
            SystemTag::Iffcc => self.iffcc.reset(),
            SystemTag::Radio => self.radio.reset(),
            SystemTag::Tad => self.tad.reset(),
            SystemTag::Tgp => self.tgp.reset(),
            SystemTag::Waypoints => self.wypt.reset(),
        }
        self.meta.last_system_edited = Some(tag);
    }

    /// Systems holding anything other than cold-start values.
    pub fn edited_systems(&self) -> Vec<SystemTag> {
        SystemTag::ALL
            .into_iter()
            .filter(|t| !self.is_default(*t))
            .collect()
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("parse configuration: {e}"))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("write configuration: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a10c::systems::{Munition, RadioPreset};

    #[test]
    fn new_configuration_is_all_default() {
        let c = A10CConfiguration::new(" Strike ");
        assert_eq!(c.meta.name, "Strike");
        assert!(c.edited_systems().is_empty());
    }

    #[test]
    fn reset_clears_one_system() {
        let mut c = A10CConfiguration::new("CAS");
        c.tgp.yardstick = 1;
        c.iffcc.metric = true;
        assert_eq!(c.edited_systems(), [SystemTag::Iffcc, SystemTag::Tgp]);
        c.reset(SystemTag::Tgp);
        assert_eq!(c.edited_systems(), [SystemTag::Iffcc]);
        assert_eq!(c.meta.last_system_edited, Some(SystemTag::Tgp));
    }

    #[test]
    fn json_keeps_settings_and_fills_missing_systems() {
        let mut c = A10CConfiguration::new("Ferry");
        c.dsms.set_station(3, Some(Munition::Gbu12));
        c.radio.arc210_presets.push(RadioPreset::new(3, "251.000", "TWR"));
        let back = A10CConfiguration::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back, c);

        let sparse = format!(r#"{{"uid":"{}","name":"Sparse"}}"#, c.meta.uid);
        let s = A10CConfiguration::from_json(&sparse).unwrap();
        assert!(s.edited_systems().is_empty());
        assert!(A10CConfiguration::from_json("{").is_err());
    }
}
