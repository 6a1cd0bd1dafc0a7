use core::fmt;

use pinocchio::error::ProgramError;

/// Errors from defining a [`Layout`](crate::Layout) or running the codec over one.
///
/// Every variant that concerns a single field carries that field's name.
/// Decode errors never come with a partial record; encode errors never leave
/// a partially written buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    // ── decode ──
    /// Input ended before `field` was fully read.
    TruncatedInput {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },
    /// All fields were read but `extra` bytes were left over.
    TrailingBytes { extra: usize },
    /// Wire value of a constant field differs from the declared constant.
    /// Also raised on encode when a record supplies a different value.
    ConstantMismatch { field: &'static str },

    // ── encode ──
    /// Integer does not fit the field width, or a blob length does not fit
    /// its length prefix.
    ValueOutOfRange { field: &'static str },
    /// Fixed-size blob has the wrong length.
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Record lacks a value the layout requires.
    MissingField { field: &'static str },
    /// Record carries a name the layout does not accept: unknown, omitted or constant.
    UnexpectedField { field: &'static str },
    /// Record holds bytes where the layout wants an integer, or the reverse.
    TypeMismatch { field: &'static str },
    /// Output buffer cannot hold the encoded record.
    BufferTooSmall { needed: usize, available: usize },

    // ── record ──
    /// Name inserted twice into a record, or declared twice in a layout.
    DuplicateField { field: &'static str },
    /// More than [`MAX_FIELDS`](crate::MAX_FIELDS) entries.
    TooManyFields,

    // ── layout definition ──
    /// Uint or length-prefix width outside `1..=8`.
    InvalidFieldSize { field: &'static str },
    /// Constant has the wrong kind or does not fit the field.
    InvalidConstant { field: &'static str },
    /// Var-bytes field without a length prefix that is not the last field.
    UnboundedFieldNotLast { field: &'static str },
    /// Field declared with an empty name.
    EmptyFieldName,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TruncatedInput {
                field,
                needed,
                remaining,
            } => write!(
                f,
                "truncated input at `{field}`: need {needed} bytes, {remaining} remain"
            ),
            Self::TrailingBytes { extra } => {
                write!(f, "{extra} trailing bytes after the last field")
            }
            Self::ConstantMismatch { field } => {
                write!(f, "`{field}` does not match its declared constant")
            }
            Self::ValueOutOfRange { field } => {
                write!(f, "value of `{field}` does not fit its wire width")
            }
            Self::LengthMismatch {
                field,
                expected,
                actual,
            } => write!(f, "`{field}` must be {expected} bytes, got {actual}"),
            Self::MissingField { field } => write!(f, "record is missing `{field}`"),
            Self::UnexpectedField { field } => {
                write!(f, "record field `{field}` is not a supplied field of the layout")
            }
            Self::TypeMismatch { field } => write!(f, "wrong value type for `{field}`"),
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "output buffer too small: need {needed} bytes, have {available}"
            ),
            Self::DuplicateField { field } => write!(f, "duplicate field `{field}`"),
            Self::TooManyFields => f.write_str("too many fields"),
            Self::InvalidFieldSize { field } => {
                write!(f, "`{field}` has an integer width outside 1..=8")
            }
            Self::InvalidConstant { field } => {
                write!(f, "constant of `{field}` does not fit the field")
            }
            Self::UnboundedFieldNotLast { field } => {
                write!(f, "unprefixed `{field}` must be the last field")
            }
            Self::EmptyFieldName => f.write_str("field with an empty name"),
        }
    }
}

impl core::error::Error for LayoutError {}

impl From<LayoutError> for ProgramError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::TruncatedInput { .. }
            | LayoutError::TrailingBytes { .. }
            | LayoutError::ConstantMismatch { .. } => ProgramError::InvalidInstructionData,
            LayoutError::BufferTooSmall { .. } => ProgramError::AccountDataTooSmall,
            _ => ProgramError::InvalidArgument,
        }
    }
}

/// Errors from program-derived address derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdaError {
    /// A seed is longer than [`MAX_SEED_LEN`](crate::MAX_SEED_LEN).
    MaxSeedLengthExceeded,
    /// More than [`MAX_SEEDS`](crate::MAX_SEEDS) seeds, counting the bump.
    TooManySeeds,
    /// The derived bytes are a valid curve point.
    InvalidSeeds,
    /// No bump in `0..=255` gives an off-curve address.
    NoValidBumpFound,
}

impl fmt::Display for PdaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaxSeedLengthExceeded => "length of a seed is too long for address generation",
            Self::TooManySeeds => "too many seeds for address generation",
            Self::InvalidSeeds => "provided seeds do not result in a valid address",
            Self::NoValidBumpFound => "unable to find a viable program address bump seed",
        })
    }
}

impl core::error::Error for PdaError {}

impl From<PdaError> for ProgramError {
    fn from(err: PdaError) -> Self {
        match err {
            PdaError::MaxSeedLengthExceeded | PdaError::TooManySeeds => {
                ProgramError::MaxSeedLengthExceeded
            }
            PdaError::InvalidSeeds | PdaError::NoValidBumpFound => ProgramError::InvalidSeeds,
        }
    }
}
