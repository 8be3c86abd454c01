use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::{
    a10c::names::{AHCP, AIRFRAME, CDU, LMFD, RMFD, UFC, UHF},
    catalog::{Catalog, Device},
};

const UFC_KEYS: &[&str] = &[
    "ENT", "CLR", "DATA_UP", "DATA_DN", "SEL_UP", "SEL_DN", "FUNC", "LTR", "MK",
];

const CDU_KEYS: &[&str] = &[
    "LSK_3L", "LSK_5L", "LSK_7L", "LSK_9L", "LSK_3R", "LSK_5R", "LSK_7R", "LSK_9R", "SYS", "NAV",
    "WP", "OSET", "FPM", "PREV", "CLR", "BCK", "PG_NEXT", "PG_PREV",
];

/// Multi-position switches driven with dynamic values.
const AHCP_SWITCHES: &[&str] = &["IFFCC", "TGP"];

const UHF_CONTROLS: &[&str] = &[
    "PRESET_KNOB",
    "FREQ_MODE",
    "FREQ_100MHZ",
    "FREQ_10MHZ",
    "FREQ_1MHZ",
    "FREQ_01MHZ",
    "FREQ_25KHZ",
    "LOAD",
    "COVER",
];

fn mfd(name: &str, id: u32) -> Device {
    let osbs: Vec<String> = (1..=20).map(|n| format!("OSB_{n:02}")).collect();
    let refs: Vec<&str> = osbs.iter().map(String::as_str).collect();
    Device::new(name, id).with_actions(&refs)
}

/// A-10C device/command catalog.
pub static A10C_CATALOG: Lazy<Arc<Catalog>> = Lazy::new(|| {
    Arc::new(
        Catalog::new(AIRFRAME)
            .with_device(mfd(LMFD, 2))
            .with_device(mfd(RMFD, 3))
            .with_device(Device::new(AHCP, 7).with_actions(AHCP_SWITCHES))
            .with_device(Device::new(UFC, 8).with_keypad().with_actions(UFC_KEYS))
            .with_device(Device::new(CDU, 9).with_keypad().with_actions(CDU_KEYS))
            .with_device(Device::new(UHF, 54).with_actions(UHF_CONTROLS)),
    )
});
