use crate::{
    a10c::{
        names::{LMFD, MARKER_HMCS},
        pages::{self, HMCS_CHANGE, HMCS_EDIT, HMCS_NEXT, HMCS_PROFILE_CYCLE, MFD_RTN},
        systems::hmcs::{HMCS_COMMON_FIELDS, HMCS_PROFILE_FIELDS, HmcsProfile, HmcsSettings, NUM_PROFILES},
    },
    builder::{
        BuildContext, Builder, PendingAdvance, check_fields, clicks_wrapping, press_direct,
        walk_fields,
    },
    config::SystemSettings,
    error::BuildError,
    stream::CommandStream,
};

/// HMCS page on the LMFD STAT page: common options, then each edited profile, then the
/// active profile.
///
/// The profile button cycles the active profile; editing applies to whichever is active.
pub struct HmcsBuilder<'a> {
    ctx: &'a BuildContext,
    hmcs: &'a HmcsSettings,
}

impl<'a> HmcsBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, hmcs: &'a HmcsSettings) -> Self {
        Self { ctx, hmcs }
    }
}

impl Builder for HmcsBuilder<'_> {
    fn name(&self) -> &'static str {
        "HMCS"
    }

    fn validate(&self) -> Result<(), BuildError> {
        let default = HmcsSettings::default();
        check_fields(HMCS_COMMON_FIELDS.iter().map(|(row, _)| row), &default, self.hmcs)?;
        for (p, cur) in self.hmcs.profiles.iter().enumerate() {
            check_fields(HMCS_PROFILE_FIELDS, &HmcsProfile::default_for(p), cur)?;
        }
        clicks_wrapping("active_profile", default.active_profile, self.hmcs.active_profile, NUM_PROFILES)?;
        Ok(())
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.hmcs.is_default() {
            return Ok(());
        }
        let default = HmcsSettings::default();
        stream.add_marker(MARKER_HMCS);
        pages::lmfd_hmcs(stream)?;

        press_direct(stream, HMCS_COMMON_FIELDS, &default, self.hmcs, LMFD)?;

        let mut active = default.active_profile;
        for (p, cur) in self.hmcs.profiles.iter().enumerate() {
            let d = HmcsProfile::default_for(p);
            if *cur == d {
                continue;
            }
            let n = clicks_wrapping("active_profile", active, p, NUM_PROFILES)?;
            stream.add_repeated(LMFD, HMCS_PROFILE_CYCLE, n)?;
            active = p;

            stream.add_action(LMFD, HMCS_EDIT)?;
            let mut pending = PendingAdvance::new(LMFD, HMCS_NEXT);
            let changed =
                walk_fields(stream, &mut pending, HMCS_PROFILE_FIELDS, &d, cur, LMFD, HMCS_CHANGE)?;
            stream.add_action(LMFD, HMCS_EDIT)?;
            self.ctx
                .log
                .debug(&format!("[hmcs] PRO{}: {changed} options changed", p + 1));
        }

        let n = clicks_wrapping("active_profile", active, self.hmcs.active_profile, NUM_PROFILES)?;
        stream.add_repeated(LMFD, HMCS_PROFILE_CYCLE, n)?;
        stream.add_action(LMFD, MFD_RTN)
    }
}
