//! Error types for ta-smooth.
//!
//! Errors come in two tiers:
//!
//! - [`RetCode`] is returned by the low-level `*_raw` functions, which work on
//!   an explicit `[start_idx, end_idx]` window and never see whole-array
//!   concerns such as leading NaNs.
//! - [`Error`] is returned by the high-level array functions. It adds the
//!   whole-array validation failures and wraps any [`RetCode`] coming up from
//!   the low tier.
//!
//! Insufficient data is never an error in either tier: the low tier reports
//! an empty [`crate::OutputRange`] and the high tier returns an all-NaN vector.

use thiserror::Error;

/// Failure status of a low-level computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetCode {
    /// A parameter is outside its documented range.
    #[error("bad parameter `{param}`: {reason}")]
    BadParam {
        /// Name of the offending parameter.
        param: &'static str,
        /// Description of the accepted range.
        reason: &'static str,
    },

    /// The start index does not address an input element.
    #[error("start index {start_idx} out of range for input of length {len}")]
    OutOfRangeStartIndex {
        /// The requested start index.
        start_idx: usize,
        /// Length of the shortest input.
        len: usize,
    },

    /// The end index precedes the start index or runs past an input.
    #[error("end index {end_idx} out of range (start {start_idx}, input length {len})")]
    OutOfRangeEndIndex {
        /// The requested start index.
        start_idx: usize,
        /// The requested end index.
        end_idx: usize,
        /// Length of the shortest input.
        len: usize,
    },

    /// An output buffer cannot hold the values the call produces.
    #[error("output buffer too small: required {required} elements, got {actual}")]
    BufferTooSmall {
        /// Number of elements the call writes.
        required: usize,
        /// Length of the buffer provided.
        actual: usize,
    },

    /// Failed to convert a numeric value to the series element type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },

    /// Intermediate stages of a composite indicator disagreed on their
    /// output ranges. Never produced by a correct implementation.
    #[error("internal error: {context}")]
    Internal {
        /// Where the inconsistency was detected.
        context: &'static str,
    },
}

/// The error type of the high-level array functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Every element of an input series is NaN, so no begin index exists.
    #[error("all-NaN input: no valid sample to start from")]
    AllNaN,

    /// Input series that must be parallel have different lengths.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Length of the first input.
        expected: usize,
        /// Length of the mismatching input.
        actual: usize,
    },

    /// The low-level computation failed.
    #[error(transparent)]
    Compute(#[from] RetCode),
}

/// Convenience type alias for Results using the ta-smooth [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type of the low-level `*_raw` functions.
pub type RawResult<T> = std::result::Result<T, RetCode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_param_message() {
        let err = RetCode::BadParam {
            param: "period",
            reason: "must be in 2..=100000",
        };
        assert_eq!(
            err.to_string(),
            "bad parameter `period`: must be in 2..=100000"
        );
    }

    #[test]
    fn test_out_of_range_messages() {
        let err = RetCode::OutOfRangeStartIndex {
            start_idx: 10,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "start index 10 out of range for input of length 5"
        );

        let err = RetCode::OutOfRangeEndIndex {
            start_idx: 3,
            end_idx: 1,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "end index 1 out of range (start 3, input length 5)"
        );
    }

    #[test]
    fn test_buffer_too_small_message() {
        let err = RetCode::BufferTooSmall {
            required: 20,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "output buffer too small: required 20 elements, got 10"
        );
    }

    #[test]
    fn test_all_nan_message() {
        assert_eq!(
            Error::AllNaN.to_string(),
            "all-NaN input: no valid sample to start from"
        );
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = Error::LengthMismatch {
            expected: 10,
            actual: 9,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: expected 10 elements, got 9"
        );
    }

    #[test]
    fn test_compute_is_transparent() {
        let code = RetCode::Internal {
            context: "macd slow stage",
        };
        let err: Error = code.clone().into();
        assert_eq!(err, Error::Compute(code));
        assert_eq!(err.to_string(), "internal error: macd slow stage");
    }

    #[test]
    fn test_question_mark_lifts_retcode() {
        fn low(fail: bool) -> RawResult<i32> {
            if fail {
                Err(RetCode::NumericConversion { context: "test" })
            } else {
                Ok(7)
            }
        }
        fn high(fail: bool) -> Result<i32> {
            Ok(low(fail)? * 2)
        }

        assert_eq!(high(false).unwrap(), 14);
        assert!(matches!(
            high(true),
            Err(Error::Compute(RetCode::NumericConversion { .. }))
        ));
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_std_error<E: std::error::Error>(_: E) {}
        accepts_std_error(Error::AllNaN);
        accepts_std_error(RetCode::Internal { context: "x" });
    }
}
