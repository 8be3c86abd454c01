//! Builder contract and the shared context builders run against.

mod cursor;
pub mod fields;

pub use cursor::{PendingAdvance, advance, clicks_toggle, clicks_wrapping};
pub use fields::{FieldRow, check_fields, press_direct, walk_fields};

use std::sync::Arc;

use crate::{
    catalog::Catalog, core_log::CoreLog, error::BuildError, settings::UploadSettings,
    stream::CommandStream, transport::Transport,
};

/// One avionics subsystem's command emitter.
///
/// `build` appends to `stream` only for fields that differ from the avionics default;
/// a system at default must leave the stream untouched.
pub trait Builder {
    fn name(&self) -> &'static str;

    /// Reject configuration values the jet cannot take, before anything is sent. Runs
    /// without a stream and without queries.
    fn validate(&self) -> Result<(), BuildError> {
        Ok(())
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError>;
}

/// Everything a builder may need besides its own configuration.
#[derive(Clone)]
pub struct BuildContext {
    pub catalog: Arc<Catalog>,
    pub transport: Arc<dyn Transport>,
    pub log: Arc<dyn CoreLog>,
    pub settings: UploadSettings,
}

impl BuildContext {
    pub fn new(
        catalog: Arc<Catalog>,
        transport: Arc<dyn Transport>,
        log: Arc<dyn CoreLog>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            catalog,
            transport,
            log,
            settings,
        }
    }

    /// Fresh stream on this context's catalog.
    pub fn stream(&self) -> CommandStream {
        CommandStream::new(Arc::clone(&self.catalog), self.settings.base_wait_ms)
    }
}
