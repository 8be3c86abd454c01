//! A-10C system builders. Each one emits nothing for a system at its cold-start state.

mod dsms;
mod hmcs;
mod iffcc;
mod radio;
mod tad;
mod tgp;
mod wypt;

pub use dsms::{DsmsBuilder, LoadKind, ProfileList, plan_station};
pub use hmcs::HmcsBuilder;
pub use iffcc::IffccBuilder;
pub use radio::RadioBuilder;
pub use tad::TadBuilder;
pub use tgp::TgpBuilder;
pub use wypt::WaypointBuilder;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BuildError;

static LASER_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[1-8][1-8][1-8]$").expect("laser code regex"));

/// PRF codes run 1111..=1788 and never contain 0 or 9.
pub fn check_laser_code(code: &str) -> Result<&str, BuildError> {
    let code = code.trim();
    if LASER_CODE_RE.is_match(code) {
        Ok(code)
    } else {
        Err(BuildError::InvalidValue {
            field: "laser_code",
            value: code.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laser_codes_stay_in_band() {
        assert_eq!(check_laser_code(" 1688 ").unwrap(), "1688");
        assert!(check_laser_code("1111").is_ok());
        assert!(check_laser_code("1788").is_ok());
        assert!(check_laser_code("1789").is_err());
        assert!(check_laser_code("1098").is_err());
        assert!(check_laser_code("2688").is_err());
        assert!(check_laser_code("168").is_err());
    }
}
