//! Whole-jet upload for the A-10C.

use crate::{
    a10c::{
        A10C_CATALOG,
        builders::{
            DsmsBuilder, HmcsBuilder, IffccBuilder, RadioBuilder, TadBuilder, TgpBuilder,
            WaypointBuilder,
        },
        configuration::A10CConfiguration,
        queries::PreflightQuery,
    },
    builder::{BuildContext, Builder},
    core_log::CoreLog,
    error::BuildError,
    query::QueryBuilder,
    settings::UploadSettings,
    stream::CommandStream,
    transport::Transport,
    upload::UploadAgent,
};
use std::sync::Arc;

pub struct A10CUploadAgent<'a> {
    ctx: BuildContext,
    config: &'a A10CConfiguration,
}

impl<'a> A10CUploadAgent<'a> {
    pub fn new(
        config: &'a A10CConfiguration,
        transport: Arc<dyn Transport>,
        log: Arc<dyn CoreLog>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            ctx: BuildContext::new(Arc::clone(&A10C_CATALOG), transport, log, settings),
            config,
        }
    }

    pub fn configuration(&self) -> &A10CConfiguration {
        self.config
    }

    /// DSMS, TAD, TGP, HMCS, IFFCC, radios, waypoints. The HMCS and DSMS both finish on
    /// the LMFD top-level page, which the next builder starts from.
    fn builders(&self) -> Vec<Box<dyn Builder + '_>> {
        let ctx = &self.ctx;
        let c = self.config;
        vec![
            Box::new(DsmsBuilder::new(ctx, &c.dsms)),
            Box::new(TadBuilder::new(ctx, &c.tad)),
            Box::new(TgpBuilder::new(ctx, &c.tgp)),
            Box::new(HmcsBuilder::new(ctx, &c.hmcs)),
            Box::new(IffccBuilder::new(ctx, &c.iffcc)),
            Box::new(RadioBuilder::new(ctx, &c.radio)),
            Box::new(WaypointBuilder::new(ctx, &c.wypt)),
        ]
    }
}

impl UploadAgent for A10CUploadAgent<'_> {
    fn context(&self) -> &BuildContext {
        &self.ctx
    }

    fn preflight(&self) -> Option<Box<dyn QueryBuilder + '_>> {
        Some(Box::new(PreflightQuery))
    }

    /// Every system, checked before any builder may query the jet.
    fn validate(&self) -> Result<(), BuildError> {
        for b in self.builders() {
            b.validate().inspect_err(|e| {
                self.ctx.log.error(&format!("[upload] {} invalid: {e}", b.name()));
            })?;
        }
        Ok(())
    }

    fn build_systems(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        let ctx = &self.ctx;
        for mut b in self.builders() {
            let before = stream.len();
            b.build(stream).inspect_err(|e| {
                ctx.log.error(&format!("[upload] {} failed: {e}", b.name()));
            })?;
            let added = stream.len() - before;
            if added > 0 {
                ctx.log.debug(&format!("[upload] {}: {added} commands", b.name()));
            }
        }
        Ok(())
    }
}
