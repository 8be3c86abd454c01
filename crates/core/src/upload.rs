//! Whole-aircraft upload: one stream, start marker, every system in airframe order, end
//! marker, one transmit. All or nothing.

use std::fmt;

use crate::{
    builder::BuildContext,
    error::{BuildError, UploadError},
    query::QueryBuilder,
    stream::CommandStream,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Preflight,
    Setup,
    BuildSystems,
    Teardown,
    Transmitted,
}

impl UploadPhase {
    pub fn name(&self) -> &'static str {
        match self {
            UploadPhase::Idle => "idle",
            UploadPhase::Preflight => "preflight",
            UploadPhase::Setup => "setup",
            UploadPhase::BuildSystems => "build-systems",
            UploadPhase::Teardown => "teardown",
            UploadPhase::Transmitted => "transmitted",
        }
    }
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait UploadAgent {
    fn context(&self) -> &BuildContext;

    /// Query run before composing when `settings.preflight` is on.
    fn preflight(&self) -> Option<Box<dyn QueryBuilder + '_>> {
        None
    }

    fn setup_builder(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        stream.add_marker(&self.context().settings.start_marker);
        Ok(())
    }

    /// Check every system's values without sending or emitting anything.
    fn validate(&self) -> Result<(), BuildError> {
        Ok(())
    }

    /// Run every system builder, in airframe order, into `stream`.
    fn build_systems(&self, stream: &mut CommandStream) -> Result<(), BuildError>;

    fn teardown_builder(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        stream.add_marker(&self.context().settings.end_marker);
        Ok(())
    }

    /// Validation, then setup, systems and teardown in one stream, without transmitting.
    /// Builders may run queries here, so nothing invalid gets this far.
    fn compose(&self) -> Result<CommandStream, UploadError> {
        let ctx = self.context();
        self.validate()?;
        let mut stream = ctx.stream();

        enter(ctx, UploadPhase::Setup);
        self.setup_builder(&mut stream)?;
        enter(ctx, UploadPhase::BuildSystems);
        self.build_systems(&mut stream)?;
        enter(ctx, UploadPhase::Teardown);
        self.teardown_builder(&mut stream)?;
        Ok(stream)
    }

    /// Validate, preflight (optional), compose, transmit. Nothing reaches the transport
    /// unless every system validates.
    fn load(&self) -> Result<(), UploadError> {
        let ctx = self.context();
        enter(ctx, UploadPhase::Idle);
        self.validate().inspect_err(|e| {
            ctx.log.error(&format!("[upload] validation failed: {e}"));
        })?;

        if ctx.settings.preflight {
            if let Some(q) = self.preflight() {
                enter(ctx, UploadPhase::Preflight);
                let data = q.query(ctx).map_err(|e| {
                    ctx.log.error(&format!("[upload] preflight failed, aborting: {e}"));
                    UploadError::Preflight(e)
                })?;
                // Informational only; the build does not branch on it.
                ctx.log.info(&format!("[upload] preflight: {data}"));
            }
        }

        let stream = self.compose().inspect_err(|e| {
            ctx.log.error(&format!("[upload] compose failed: {e}"));
        })?;
        let wire = stream.to_wire()?;
        if !ctx.transport.send(&wire) {
            ctx.log.error("[upload] transport refused the upload");
            return Err(UploadError::SendRefused {
                commands: stream.len(),
            });
        }
        enter(ctx, UploadPhase::Transmitted);
        ctx.log.info(&format!("[upload] sent {} commands", stream.len()));
        Ok(())
    }
}

fn enter(ctx: &BuildContext, phase: UploadPhase) {
    ctx.log.debug(&format!("[upload] -> {phase}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{Catalog, Device},
        core_log::{CaptureLog, LogLevel},
        settings::UploadSettings,
        stream::Command,
        transport::LoopbackTransport,
    };
    use std::sync::Arc;

    struct Ping;
    impl QueryBuilder for Ping {
        fn function(&self) -> &str {
            "QueryPreflight"
        }
    }

    struct Agent {
        ctx: BuildContext,
        bad: bool,
        invalid: bool,
    }

    impl UploadAgent for Agent {
        fn context(&self) -> &BuildContext {
            &self.ctx
        }
        fn preflight(&self) -> Option<Box<dyn QueryBuilder + '_>> {
            Some(Box::new(Ping))
        }
        fn validate(&self) -> Result<(), BuildError> {
            if self.invalid {
                return Err(BuildError::InvalidValue {
                    field: "code",
                    value: "9999".into(),
                });
            }
            Ok(())
        }
        fn build_systems(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
            stream.add_action("UFC", "ENT")?;
            if self.bad {
                stream.add_action("UFC", "MISSING")?;
            }
            Ok(())
        }
    }

    fn agent(t: Arc<LoopbackTransport>, log: Arc<CaptureLog>, preflight: bool, bad: bool) -> Agent {
        let catalog = Catalog::new("T").with_device(Device::new("UFC", 8).with_actions(&["ENT"]));
        let settings = UploadSettings {
            preflight,
            query_attempts: 3,
            query_interval_ms: 5,
            ..UploadSettings::default()
        };
        Agent {
            ctx: BuildContext::new(Arc::new(catalog), t, log, settings),
            bad,
            invalid: false,
        }
    }

    #[test]
    fn compose_brackets_systems_with_markers() {
        let a = agent(Arc::new(LoopbackTransport::silent()), Arc::new(CaptureLog::new()), false, false);
        let s = a.compose().unwrap();
        assert_eq!(s.commands().first(), Some(&Command::Marker { tag: "upload".into() }));
        assert!(s.commands()[1].is_action("UFC", "ENT"));
        assert_eq!(s.commands().last(), Some(&Command::Marker { tag: "end".into() }));
    }

    #[test]
    fn load_sends_one_payload() {
        let t = Arc::new(LoopbackTransport::silent());
        let log = Arc::new(CaptureLog::new());
        agent(t.clone(), log.clone(), false, false).load().unwrap();
        assert_eq!(t.sent().len(), 1);
        assert!(log.contains(LogLevel::Debug, "-> transmitted"));
    }

    #[test]
    fn preflight_timeout_aborts_before_upload() {
        let t = Arc::new(LoopbackTransport::silent());
        let log = Arc::new(CaptureLog::new());
        let err = agent(t.clone(), log.clone(), true, false).load().unwrap_err();
        assert!(matches!(err, UploadError::Preflight(_)));
        // only the preflight query went out
        assert_eq!(t.sent().len(), 1);
        assert!(LoopbackTransport::query_of(&t.sent()[0]).is_some());
    }

    #[test]
    fn preflight_answer_is_informational() {
        let t = Arc::new(LoopbackTransport::answering(|_, _| Some("ready=1".into())));
        let log = Arc::new(CaptureLog::new());
        agent(t.clone(), log.clone(), true, false).load().unwrap();
        assert_eq!(t.sent().len(), 2);
        assert!(log.contains(LogLevel::Info, "preflight: ready=1"));
    }

    #[test]
    fn integrity_error_sends_nothing() {
        let t = Arc::new(LoopbackTransport::silent());
        let err = agent(t.clone(), Arc::new(CaptureLog::new()), false, true).load().unwrap_err();
        assert!(matches!(err, UploadError::Integrity(BuildError::UnknownAction { .. })));
        assert!(t.sent().is_empty());
    }

    #[test]
    fn invalid_values_stop_before_the_preflight() {
        let t = Arc::new(LoopbackTransport::answering(|_, _| Some("ready=1".into())));
        let log = Arc::new(CaptureLog::new());
        let mut a = agent(t.clone(), log.clone(), true, false);
        a.invalid = true;
        let err = a.load().unwrap_err();
        assert!(matches!(err, UploadError::Integrity(BuildError::InvalidValue { .. })));
        assert!(t.sent().is_empty());
        assert!(log.contains(LogLevel::Error, "[upload] validation failed"));
        assert!(!log.contains(LogLevel::Debug, "-> preflight"));
    }

    #[test]
    fn refused_transmit_is_reported() {
        let t = Arc::new(LoopbackTransport::silent());
        t.refuse_sends(true);
        let err = agent(t.clone(), Arc::new(CaptureLog::new()), false, false).load().unwrap_err();
        assert!(matches!(err, UploadError::SendRefused { commands: 3 }));
    }
}
