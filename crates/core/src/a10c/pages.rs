//! Cockpit page navigation shared by builders and queries.
//!
//! Every helper assumes the display it drives is sitting on its top-level page set, and
//! leaves it on the page it names.

use crate::{a10c::names::*, error::BuildError, stream::CommandStream};

// LMFD page-select row
pub const MFD_RTN: &str = "OSB_01";
pub const MFD_DSMS: &str = "OSB_14";
pub const MFD_STAT: &str = "OSB_15";
pub const MFD_TAD: &str = "OSB_12";
pub const MFD_TGP: &str = "OSB_13";

// DSMS
pub const DSMS_PROF: &str = "OSB_02";
pub const DSMS_INV: &str = "OSB_05";
pub const DSMS_LOAD_STA: &str = "OSB_03";
pub const DSMS_LOAD_SYM: &str = "OSB_04";
pub const DSMS_INV_NEXT: &str = "OSB_15";
/// Inventory list rows, top to bottom.
pub const DSMS_INV_ROWS: [&str; 5] = ["OSB_20", "OSB_19", "OSB_18", "OSB_17", "OSB_16"];
/// Station select buttons on the inventory page, station 1 first.
pub const DSMS_STATION_OSB: [&str; 11] = [
    "OSB_06", "OSB_07", "OSB_08", "OSB_09", "OSB_10", "OSB_11", "OSB_16", "OSB_17", "OSB_18",
    "OSB_19", "OSB_20",
];
pub const PROF_CURSOR_UP: &str = "OSB_19";
pub const PROF_CURSOR_DN: &str = "OSB_20";
pub const PROF_MOVE_DN: &str = "OSB_18";
pub const PROF_VIEW: &str = "OSB_09";
pub const PROF_LASER_CODE: &str = "OSB_03";
pub const PROF_AUTO_LASE: &str = "OSB_04";
pub const PROF_LASE_TIME: &str = "OSB_05";
pub const PROF_CHG_SET: &str = "OSB_11";
pub const CHG_SET_NEXT: &str = "OSB_20";
pub const CHG_SET_CHANGE: &str = "OSB_18";
pub const CHG_SET_HOF: &str = "OSB_06";
pub const CHG_SET_RPM: &str = "OSB_07";
pub const CHG_SET_RIPPLE_QTY: &str = "OSB_08";
pub const CHG_SET_RIPPLE_FT: &str = "OSB_09";

// HMCS (through STAT)
pub const STAT_HMCS: &str = "OSB_10";
pub const HMCS_PROFILE_CYCLE: &str = "OSB_02";
pub const HMCS_EDIT: &str = "OSB_03";
pub const HMCS_NEXT: &str = "OSB_19";
pub const HMCS_CHANGE: &str = "OSB_20";
pub const HMCS_TGP_TRACK: &str = "OSB_07";
pub const HMCS_BRIGHTNESS_MEMORY: &str = "OSB_08";

// TAD / TGP on the RMFD
pub const TAD_PROFILE: &str = "OSB_02";
pub const TAD_HOOK_OWNSHIP: &str = "OSB_17";
pub const TAD_MAP_OPTION: &str = "OSB_18";
pub const TAD_CENTER_DEPRESS: &str = "OSB_19";
pub const TAD_BULLSEYE: &str = "OSB_08";
pub const TAD_COORD_DISPLAY: &str = "OSB_09";
pub const TGP_CNTL: &str = "OSB_05";
pub const TGP_LASER_CODE: &str = "OSB_17";
pub const TGP_TAAF: &str = "OSB_18";
pub const TGP_NEXT: &str = "OSB_20";
pub const TGP_CHANGE: &str = "OSB_19";

// CDU line select keys
pub const SYS_DLNK: &str = "LSK_5R";
pub const SYS_ARC210: &str = "LSK_7R";
pub const DLNK_NET: &str = "LSK_3R";
pub const NET_GROUP_ID: &str = "LSK_3L";
pub const NET_OWN_ID: &str = "LSK_5L";
pub const NET_CALLSIGN: &str = "LSK_7L";
pub const NET_FLIGHT_LEAD: &str = "LSK_9L";
pub const ARC210_PRESETS: &str = "LSK_3R";
pub const ARC210_PRESET_NUM: &str = "LSK_3L";
pub const ARC210_PRESET_FREQ: &str = "LSK_5L";
pub const ARC210_PRESET_DESC: &str = "LSK_7L";
pub const WP_NEW: &str = "LSK_7R";
pub const WP_NAME: &str = "LSK_3R";
pub const WP_ELEV: &str = "LSK_5R";
pub const WP_LAT: &str = "LSK_7L";
pub const WP_LON: &str = "LSK_9L";

pub fn lmfd_dsms(stream: &mut CommandStream) -> Result<(), BuildError> {
    stream.add_action(LMFD, MFD_DSMS)
}

pub fn lmfd_dsms_profiles(stream: &mut CommandStream) -> Result<(), BuildError> {
    stream.add_actions(LMFD, &[MFD_DSMS, DSMS_PROF])
}

pub fn lmfd_hmcs(stream: &mut CommandStream) -> Result<(), BuildError> {
    stream.add_actions(LMFD, &[MFD_STAT, STAT_HMCS])
}

/// CDU `SYS` then the line select key for a subsystem page.
pub fn cdu_sys_page(stream: &mut CommandStream, lsk: &str) -> Result<(), BuildError> {
    stream.add_actions(CDU, &["SYS", lsk])
}

/// Press CDU `CLR` until the receiver reports an empty scratchpad.
pub fn cdu_clear_scratchpad(stream: &mut CommandStream) -> Result<(), BuildError> {
    let mut body = stream.while_block(COND_CDU_SCRATCH_DIRTY, &[]);
    body.add_action(CDU, "CLR")
}

/// Type `text` into the CDU scratchpad and commit it with `lsk`.
pub fn cdu_enter(stream: &mut CommandStream, text: &str, lsk: &str) -> Result<(), BuildError> {
    stream.add_text(CDU, text)?;
    stream.add_action(CDU, lsk)
}

/// Type digits on the UFC and commit them with an MFD button.
pub fn ufc_enter(
    stream: &mut CommandStream,
    digits: &str,
    mfd: &str,
    osb: &str,
) -> Result<(), BuildError> {
    stream.add_digits(UFC, digits)?;
    stream.add_action(mfd, osb)
}
