use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    a10c::{
        names::{CDU, MARKER_TAD, RMFD},
        pages::{
            self, DLNK_NET, MFD_RTN, MFD_TAD, NET_CALLSIGN, NET_FLIGHT_LEAD, NET_GROUP_ID,
            NET_OWN_ID, SYS_DLNK, TAD_PROFILE,
        },
        systems::tad::{TAD_PROFILE_FIELDS, TadSettings},
    },
    builder::{BuildContext, Builder, check_fields, press_direct},
    config::SystemSettings,
    error::BuildError,
    stream::CommandStream,
};

static NET_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,2}$").expect("net id regex"));
static CALLSIGN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{1,4}$").expect("callsign regex"));

fn checked<'s>(field: &'static str, value: &'s str, re: &Regex) -> Result<&'s str, BuildError> {
    let v = value.trim();
    if re.is_match(v) {
        Ok(v)
    } else {
        Err(BuildError::InvalidValue {
            field,
            value: value.to_string(),
        })
    }
}

/// Datalink network entries on the CDU, then the TAD display profile on the RMFD.
pub struct TadBuilder<'a> {
    ctx: &'a BuildContext,
    tad: &'a TadSettings,
}

impl<'a> TadBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, tad: &'a TadSettings) -> Self {
        Self { ctx, tad }
    }

    /// Network entries that are set, checked, with the key that commits each.
    fn network_entries(&self) -> Result<Vec<(&str, &'static str)>, BuildError> {
        let entries = [
            ("group_id", &self.tad.group_id, &*NET_ID_RE, NET_GROUP_ID),
            ("own_id", &self.tad.own_id, &*NET_ID_RE, NET_OWN_ID),
            ("callsign", &self.tad.callsign, &*CALLSIGN_RE, NET_CALLSIGN),
        ];
        let mut typed = Vec::new();
        for (field, value, re, lsk) in entries {
            if !value.is_empty() {
                typed.push((checked(field, value, re)?, lsk));
            }
        }
        Ok(typed)
    }

    fn build_network(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.tad.network_is_default() {
            return Ok(());
        }
        let typed = self.network_entries()?;

        pages::cdu_clear_scratchpad(stream)?;
        pages::cdu_sys_page(stream, SYS_DLNK)?;
        stream.add_action(CDU, DLNK_NET)?;
        for (text, lsk) in typed {
            pages::cdu_enter(stream, text, lsk)?;
        }
        if self.tad.flight_lead {
            stream.add_action(CDU, NET_FLIGHT_LEAD)?;
        }
        stream.add_repeated(CDU, "BCK", 2)
    }

    fn build_profile(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        let mut sub = stream.child();
        let changed = press_direct(&mut sub, TAD_PROFILE_FIELDS, &TadSettings::default(), self.tad, RMFD)?;
        if changed == 0 {
            return Ok(());
        }
        stream.add_actions(RMFD, &[MFD_TAD, TAD_PROFILE])?;
        stream.append(sub);
        stream.add_action(RMFD, MFD_RTN)?;
        self.ctx.log.debug(&format!("[tad] {changed} profile options changed"));
        Ok(())
    }
}

impl Builder for TadBuilder<'_> {
    fn name(&self) -> &'static str {
        "TAD"
    }

    fn validate(&self) -> Result<(), BuildError> {
        self.network_entries()?;
        check_fields(
            TAD_PROFILE_FIELDS.iter().map(|(row, _)| row),
            &TadSettings::default(),
            self.tad,
        )
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.tad.is_default() {
            return Ok(());
        }
        stream.add_marker(MARKER_TAD);
        self.build_network(stream)?;
        self.build_profile(stream)
    }
}
