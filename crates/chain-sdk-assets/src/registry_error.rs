use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("at least one root key is required")]
    NoRootKeys,

    #[error("quorum must be between 1 and {keys}, found {quorum}")]
    BadQuorum { quorum: u32, keys: usize },

    #[error("root key at index {0} is a duplicate")]
    DuplicateRootKey(usize),

    #[error("alias {0:?} is already in use")]
    DuplicateAlias(String),

    #[error("invalid asset definition: {0}")]
    Definition(#[from] serde_json::Error),

    #[error("no key indices are left")]
    KeyIndexExhausted,
}

impl RegistryError {
    /// Whether the error was caused by the arguments, rather than the state of the registry.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::NoRootKeys | Self::BadQuorum { .. } | Self::DuplicateRootKey(_) | Self::Definition(_)
        )
    }
}
