//! A-10C device names, receiver-side function names, and conditional predicates.

use constcat::concat;

pub const AIRFRAME: &str = "A10C";

// Devices
pub const UFC: &str = "UFC";
pub const CDU: &str = "CDU";
pub const LMFD: &str = "LMFD";
pub const RMFD: &str = "RMFD";
pub const AHCP: &str = "AHCP";
pub const UHF: &str = "UHF";

// Query functions answered by the receiver
const QUERY_PREFIX: &str = concat!("Query", AIRFRAME);
pub const QUERY_PREFLIGHT: &str = concat!(QUERY_PREFIX, "Preflight");
pub const QUERY_DSMS_LOADOUT: &str = concat!(QUERY_PREFIX, "DSMSLoadout");
pub const QUERY_DSMS_PROFILES: &str = concat!(QUERY_PREFIX, "DSMSProfiles");

// Receiver-side predicates for if/while blocks
pub const COND_TGP_READY: &str = concat!("Is", AIRFRAME, "TGPReady");
pub const COND_CDU_SCRATCH_DIRTY: &str = concat!("Is", AIRFRAME, "CDUScratchpadDirty");
pub const COND_UFC_SCRATCH_DIRTY: &str = concat!("Is", AIRFRAME, "UFCScratchpadDirty");

// Debug markers emitted at the start of each system
pub const MARKER_DSMS: &str = concat!(AIRFRAME, ".dsms");
pub const MARKER_HMCS: &str = concat!(AIRFRAME, ".hmcs");
pub const MARKER_IFFCC: &str = concat!(AIRFRAME, ".iffcc");
pub const MARKER_RADIO: &str = concat!(AIRFRAME, ".radio");
pub const MARKER_TAD: &str = concat!(AIRFRAME, ".tad");
pub const MARKER_TGP: &str = concat!(AIRFRAME, ".tgp");
pub const MARKER_WYPT: &str = concat!(AIRFRAME, ".wypt");

// Waits
pub const WAIT_NONE: u64 = 0;
pub const WAIT_SHORT: u64 = 100;
pub const WAIT_LONG: u64 = 600;
pub const WAIT_IFFCC_TEST: u64 = 2000;
