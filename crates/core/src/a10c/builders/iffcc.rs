use crate::{
    a10c::{
        names::{AHCP, MARKER_IFFCC, UFC, WAIT_IFFCC_TEST, WAIT_LONG},
        systems::iffcc::{IFFCC_FIELDS, IffccSettings},
    },
    builder::{BuildContext, Builder, PendingAdvance, check_fields, walk_fields},
    config::SystemSettings,
    error::BuildError,
    stream::CommandStream,
};

// AHCP IFFCC switch positions
const IFFCC_TEST: f64 = 0.1;
const IFFCC_ON: f64 = 0.2;

/// IFFCC test menu on the HUD, driven from the UFC with the AHCP switch in TEST.
pub struct IffccBuilder<'a> {
    ctx: &'a BuildContext,
    iffcc: &'a IffccSettings,
}

impl<'a> IffccBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, iffcc: &'a IffccSettings) -> Self {
        Self { ctx, iffcc }
    }
}

impl Builder for IffccBuilder<'_> {
    fn name(&self) -> &'static str {
        "IFFCC"
    }

    fn validate(&self) -> Result<(), BuildError> {
        check_fields(IFFCC_FIELDS, &IffccSettings::default(), self.iffcc)
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.iffcc.is_default() {
            return Ok(());
        }
        stream.add_marker(MARKER_IFFCC);
        stream.add_dynamic_action(AHCP, "IFFCC", IFFCC_TEST, 0.0)?;
        stream.add_wait(WAIT_IFFCC_TEST);

        let mut pending = PendingAdvance::new(UFC, "DATA_DN");
        let changed = walk_fields(
            stream,
            &mut pending,
            IFFCC_FIELDS,
            &IffccSettings::default(),
            self.iffcc,
            UFC,
            "ENT",
        )?;
        self.ctx.log.debug(&format!("[iffcc] {changed} options changed"));

        stream.add_dynamic_action(AHCP, "IFFCC", IFFCC_ON, 0.0)?;
        stream.add_wait(WAIT_LONG);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        a10c::catalog::A10C_CATALOG, core_log::NoopLog, settings::UploadSettings, stream::Command,
        transport::LoopbackTransport,
    };
    use std::sync::Arc;

    fn ctx() -> BuildContext {
        BuildContext::new(
            Arc::clone(&A10C_CATALOG),
            Arc::new(LoopbackTransport::silent()),
            Arc::new(NoopLog),
            UploadSettings::default(),
        )
    }

    #[test]
    fn default_iffcc_emits_nothing() {
        let c = ctx();
        let mut s = c.stream();
        IffccBuilder::new(&c, &IffccSettings::default()).build(&mut s).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_menu_is_bracketed_by_the_ahcp_switch() {
        let c = ctx();
        let cfg = IffccSettings {
            radar_altimeter: false,
            ..IffccSettings::default()
        };
        let mut s = c.stream();
        IffccBuilder::new(&c, &cfg).build(&mut s).unwrap();

        let cmds = s.commands();
        assert!(matches!(&cmds[1], Command::Dynamic { v, .. } if (*v - IFFCC_TEST).abs() < 1e-9));
        assert!(matches!(cmds[2], Command::Wait { dt: WAIT_IFFCC_TEST }));
        assert!(matches!(&cmds[cmds.len() - 2], Command::Dynamic { v, .. } if (*v - IFFCC_ON).abs() < 1e-9));
        // radar altimeter is the sixth row
        let ufc: Vec<String> = s.labels().into_iter().filter(|l| l.starts_with("UFC")).collect();
        assert_eq!(ufc.len(), 6);
        assert_eq!(ufc.last().map(String::as_str), Some("UFC.ENT"));
    }
}
