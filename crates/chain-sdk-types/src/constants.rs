/// The asset version whose witness grammar this crate understands.
pub const ASSET_VERSION: u64 = 1;

/// The VM version assigned to newly defined assets.
pub const DEFAULT_VM_VERSION: u64 = 1;

/// The index of the key space that asset signing keys are derived in.
pub const ASSET_KEY_SPACE: u32 = 0;
