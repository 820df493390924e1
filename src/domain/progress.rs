//! Progress events
//!
//! The pipeline reports discrete progress notifications to the caller. The
//! wire-compatible representation is an integer in `[0, 100]`, with `-1` as
//! the sentinel for "finished/idle" after both local delivery and terminal
//! remote completion.

use serde::{Deserialize, Serialize};

/// One discrete progress notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// Pipeline progress in percent, `0..=100`
    Percent(u8),

    /// Pipeline finished; reported as `-1` in the legacy integer encoding
    Finished,
}

impl ProgressEvent {
    /// Returns the legacy integer encoding: the percentage, or `-1` when finished
    pub fn as_status(&self) -> i8 {
        match self {
            ProgressEvent::Percent(p) => *p as i8,
            ProgressEvent::Finished => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_status() {
        assert_eq!(ProgressEvent::Percent(0).as_status(), 0);
        assert_eq!(ProgressEvent::Percent(40).as_status(), 40);
        assert_eq!(ProgressEvent::Percent(100).as_status(), 100);
    }

    #[test]
    fn test_finished_is_negative_one() {
        assert_eq!(ProgressEvent::Finished.as_status(), -1);
    }
}
