use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid view size: width={width}, height={height}")]
    InvalidViewSize { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("record {index} has a non-finite value")]
    NonFiniteValue { index: usize },

    #[error("record {index} label `{label}` cannot be read as {expected}")]
    UnparsableLabel {
        index: usize,
        label: String,
        expected: &'static str,
    },

    /// A single label failed to parse outside of any record context.
    #[error("label `{label}` cannot be read as {expected}")]
    UnreadableLabel {
        label: String,
        expected: &'static str,
    },

    #[error("category `{0}` is not part of the band domain")]
    UnknownCategory(String),
}

impl ChartError {
    /// Attaches the position of the offending record to a label failure.
    #[must_use]
    pub fn at_record(self, index: usize) -> Self {
        match self {
            Self::UnreadableLabel { label, expected } => Self::UnparsableLabel {
                index,
                label,
                expected,
            },
            other => other,
        }
    }
}
