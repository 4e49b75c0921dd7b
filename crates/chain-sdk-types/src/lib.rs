mod asset_id;
mod constants;
mod derivation;
mod input_error;
mod issuance;
mod key_error;
mod program;
mod witness;

pub use asset_id::*;
pub use constants::*;
pub use derivation::*;
pub use input_error::*;
pub use issuance::*;
pub use key_error::*;
pub use program::*;
pub use witness::*;
