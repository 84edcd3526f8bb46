//! Error types for subnet calculations.

use thiserror::Error;

/// Result type alias for subnet operations.
pub type Result<T> = std::result::Result<T, SubnetError>;

/// Errors raised while parsing input text or deriving subnet properties.
///
/// All of these are caller-input problems raised synchronously at
/// construction or at the failing accessor; none are retryable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubnetError {
    /// Input text does not have the expected shape, or a netmask is not a
    /// contiguous run of leading one-bits.
    #[error("could not parse [{input}]: {reason}")]
    Parse {
        /// The offending input text.
        input: String,
        /// What was expected instead.
        reason: String,
    },

    /// A numeric component is outside its allowed range.
    #[error("{what} {value} not in range [{min},{max}]")]
    Range {
        /// Name of the component being checked.
        what: &'static str,
        /// The offending value.
        value: u64,
        /// Lowest allowed value.
        min: u64,
        /// Highest allowed value.
        max: u64,
    },

    /// The address count does not fit a 32-bit signed integer.
    #[error("count {count} is larger than a 32-bit signed integer")]
    Overflow {
        /// The true count of the block.
        count: u64,
    },
}

impl SubnetError {
    /// Creates a new `Parse` error.
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `Range` error.
    pub fn range(what: &'static str, value: u64, min: u64, max: u64) -> Self {
        Self::Range {
            what,
            value,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display() {
        let err = SubnetError::parse("10.0.0", "not a dotted-decimal address");
        assert_eq!(
            err.to_string(),
            "could not parse [10.0.0]: not a dotted-decimal address"
        );
    }

    #[test]
    fn test_range_display() {
        let err = SubnetError::range("prefix length", 33, 0, 32);
        assert_eq!(err.to_string(), "prefix length 33 not in range [0,32]");
    }

    #[test]
    fn test_overflow_display() {
        let err = SubnetError::Overflow { count: 4294967294 };
        assert_eq!(
            err.to_string(),
            "count 4294967294 is larger than a 32-bit signed integer"
        );
    }
}
