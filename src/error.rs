//! Conversion errors for fallible constructors. Out-of-range immediates,
//! shift amounts, double label definitions, and use of a disabled extension
//! are all programming errors and panic instead of returning a `Result`.

use std::error::Error;
use std::fmt;

/// Returned by `Register::try_from`/`FRegister::try_from` when the supplied
/// index does not name one of the 32 registers in a bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterConvError(pub(crate) i64);

impl fmt::Display for RegisterConvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid register index: {}", self.0)
    }
}

impl Error for RegisterConvError {}
