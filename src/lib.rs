pub use chain_sdk_api::*;
pub use chain_sdk_assets::*;
pub use chain_sdk_encoding::*;
pub use chain_sdk_types::*;

pub use chain_sdk_test as test;
