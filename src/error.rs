use core::fmt;

/// Errors reported by the arithmetic kernel.
///
/// Every fallible operation returns on the first error; destinations are
/// left in canonical form but their numeric contents are unspecified, and
/// any internal scratch values are released before the error surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The backing digit storage could not be grown.
    OutOfMemory,
    /// A divisor was zero.
    DivisionByZero,
    /// An argument was outside the operation's domain.
    InvalidArgument,
    /// A recursion or iteration bound was exceeded.
    MaxIterationsReached,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::OutOfMemory => "digit storage allocation failed",
            Error::DivisionByZero => "division by zero",
            Error::InvalidArgument => "invalid argument",
            Error::MaxIterationsReached => "maximum iteration count reached",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

/// Alias for `core::result::Result<T, mpint::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
