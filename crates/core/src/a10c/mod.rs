//! A-10C: catalog, system settings, builders, queries and the upload agent.

pub mod builders;
mod catalog;
pub mod configuration;
pub mod names;
pub mod pages;
pub mod queries;
pub mod systems;
mod upload;

pub use catalog::A10C_CATALOG;
pub use configuration::A10CConfiguration;
pub use upload::A10CUploadAgent;
