mod asset;
mod config;
mod context;
mod definition;
mod memory_registry;
mod registry;
mod registry_error;

pub use asset::*;
pub use config::*;
pub use context::*;
pub use definition::*;
pub use memory_registry::*;
pub use registry::*;
pub use registry_error::*;
