use crate::{
    a10c::{
        names::{COND_TGP_READY, MARKER_TGP, RMFD},
        pages::{self, MFD_RTN, MFD_TGP, TGP_CHANGE, TGP_CNTL, TGP_LASER_CODE, TGP_NEXT, TGP_TAAF},
        systems::tgp::{TGP_CNTL_FIELDS, TgpSettings},
    },
    builder::{BuildContext, Builder, PendingAdvance, check_fields, walk_fields},
    config::SystemSettings,
    error::BuildError,
    stream::CommandStream,
};

use super::check_laser_code;

/// TGP control page on the RMFD. Everything runs inside an `IsTGPReady` block so a pod
/// that is still cooling is left alone.
pub struct TgpBuilder<'a> {
    ctx: &'a BuildContext,
    tgp: &'a TgpSettings,
}

impl<'a> TgpBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, tgp: &'a TgpSettings) -> Self {
        Self { ctx, tgp }
    }
}

impl Builder for TgpBuilder<'_> {
    fn name(&self) -> &'static str {
        "TGP"
    }

    fn validate(&self) -> Result<(), BuildError> {
        let default = TgpSettings::default();
        if self.tgp.laser_code != default.laser_code {
            check_laser_code(&self.tgp.laser_code)?;
        }
        check_fields(TGP_CNTL_FIELDS, &default, self.tgp)
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.tgp.is_default() {
            return Ok(());
        }
        let default = TgpSettings::default();
        let code = (self.tgp.laser_code != default.laser_code)
            .then(|| check_laser_code(&self.tgp.laser_code))
            .transpose()?;

        stream.add_marker(MARKER_TGP);
        let mut body = stream.if_block(COND_TGP_READY, true, &[]);
        body.add_actions(RMFD, &[MFD_TGP, TGP_CNTL])?;
        if let Some(code) = code {
            pages::ufc_enter(&mut body, code, RMFD, TGP_LASER_CODE)?;
        }
        if self.tgp.taaf != default.taaf {
            pages::ufc_enter(&mut body, &self.tgp.taaf.to_string(), RMFD, TGP_TAAF)?;
        }
        let mut pending = PendingAdvance::new(RMFD, TGP_NEXT);
        let changed =
            walk_fields(&mut body, &mut pending, TGP_CNTL_FIELDS, &default, self.tgp, RMFD, TGP_CHANGE)?;
        body.add_action(RMFD, MFD_RTN)?;
        self.ctx.log.debug(&format!("[tgp] {changed} control options changed"));
        Ok(())
    }
}
