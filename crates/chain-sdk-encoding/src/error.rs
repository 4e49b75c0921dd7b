use std::io;

use thiserror::Error;

/// Errors you can get while reading or writing wire primitives.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The stream ended before the value was complete.
    #[error("truncated input")]
    TruncatedInput,

    /// A length or count was outside of the `0..=2^31-1` domain.
    #[error("length {0} is out of range")]
    LengthOutOfRange(u64),

    /// An integer did not fit in 63 bits.
    #[error("varint overflows 63 bits")]
    Overflow,

    #[error("io error: {0}")]
    Io(io::Error),

    /// Another error, labeled with the field that was being processed.
    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        source: Box<EncodingError>,
    },
}

impl EncodingError {
    /// Labels the error with the stage of decoding it happened in.
    #[must_use]
    pub fn stage(self, stage: &'static str) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The underlying error, with every stage label removed.
    pub fn root(&self) -> &Self {
        match self {
            Self::Stage { source, .. } => source.root(),
            error => error,
        }
    }

    /// The stage labels, outermost first.
    pub fn stages(&self) -> Vec<&'static str> {
        let mut stages = Vec::new();
        let mut current = self;
        while let Self::Stage { stage, source } = current {
            stages.push(*stage);
            current = source;
        }
        stages
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.root(), Self::TruncatedInput)
    }
}

impl From<io::Error> for EncodingError {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Self::TruncatedInput
        } else {
            Self::Io(error)
        }
    }
}

/// Attaches a stage label to the error of a fallible read or write.
pub trait Staged<T> {
    fn stage(self, stage: &'static str) -> Result<T, EncodingError>;
}

impl<T, E> Staged<T> for Result<T, E>
where
    E: Into<EncodingError>,
{
    fn stage(self, stage: &'static str) -> Result<T, EncodingError> {
        self.map_err(|error| error.into().stage(stage))
    }
}
