//! Error types.

use core::fmt;

/// Error type shared by the field, curve, FFT and MSM engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The modulus is even, smaller than 3, not prime, or an extension
    /// non-residue is in fact a square.
    InvalidModulus,

    /// Inversion of the additive identity.
    DivisionByZero,

    /// Evaluation domain size is zero, not a power of two, exceeds the field's
    /// 2-adicity, or does not match the length of the data being transformed.
    InvalidDomainSize {
        /// Offending size.
        size: usize,
    },

    /// Two inputs which must agree in length do not, or a byte buffer is not a
    /// whole number of records.
    LengthMismatch {
        /// Length required by the operation.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Coordinates do not satisfy the curve equation.
    PointNotOnCurve,

    /// Bytes do not encode a canonical element.
    InvalidEncoding,

    /// No curve with the requested name is known.
    UnknownCurve,

    /// The worker pool could not be started.
    WorkerPool,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidModulus => write!(f, "invalid field modulus"),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::InvalidDomainSize { size } => {
                write!(f, "invalid evaluation domain size: {size}")
            }
            Error::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected}, got {actual}")
            }
            Error::PointNotOnCurve => write!(f, "point is not on the curve"),
            Error::InvalidEncoding => write!(f, "invalid element encoding"),
            Error::UnknownCurve => write!(f, "unknown curve"),
            Error::WorkerPool => write!(f, "worker pool could not be started"),
        }
    }
}

impl core::error::Error for Error {}

impl From<workpool::BuildError> for Error {
    fn from(err: workpool::BuildError) -> Self {
        tracing::error!(%err, "worker pool construction failed");
        Error::WorkerPool
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
