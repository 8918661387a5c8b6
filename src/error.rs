//! Typed errors for pattern construction and lookup

use thiserror::Error;

/// Errors raised by pattern widgets.
///
/// Transient focus conditions (a deferred focus request whose target slot
/// was unmounted before the request resolved) are deliberately not errors:
/// the focus paths skip detached targets silently and fall back to the
/// last-known-good coordinate where one exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// A cell lookup outside the grid bounds. Movement clamps before
    /// lookup, so widget-internal lookups never hit this; it exists for
    /// direct `GridModel::cell_at` callers.
    #[error("cell ({row}, {col}) outside grid bounds of {rows} rows x {cols} cols")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A channel whose program count does not match the time-column count.
    /// The grid must be rectangular; a ragged channel fails construction.
    #[error("channel {channel:?} has {got} programs, expected {expected}")]
    RaggedChannel {
        channel: String,
        got: usize,
        expected: usize,
    },

    /// An icon-only control built without an accessible label. A silently
    /// unlabeled control is worse than failing the build.
    #[error("icon-only control requires an accessible label")]
    MissingAccessibleName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = PatternError::OutOfRange {
            row: 7,
            col: 2,
            rows: 5,
            cols: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains("(7, 2)"));
        assert!(msg.contains("5 rows"));
    }

    #[test]
    fn test_ragged_channel_message() {
        let err = PatternError::RaggedChannel {
            channel: "News 24".into(),
            got: 4,
            expected: 5,
        };
        assert!(err.to_string().contains("News 24"));
    }
}
