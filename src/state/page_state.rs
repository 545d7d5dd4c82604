/// Page outcome and traversal state definitions
///
/// This module defines how a page ended up in an export run and the states
/// of the traversal loop itself.
use std::fmt;

/// Final outcome of a page in an export run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageState {
    /// Page content was extracted and its artifacts were routed to the sink
    Exported,

    /// Page lies outside the export scope (bulk discovery results only)
    OutOfScope,

    // ===== Error States =====
    /// Fetch failed (network error, timeout, or non-2xx status)
    FetchFailed,

    /// No content region could be located on the page
    ExtractionMissed,

    /// Content was extracted but none of its artifacts could be persisted
    WriteFailed,
}

impl PageState {
    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed | Self::ExtractionMissed | Self::WriteFailed
        )
    }

    /// Stable lowercase name, used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exported => "exported",
            Self::OutOfScope => "out_of_scope",
            Self::FetchFailed => "fetch_failed",
            Self::ExtractionMissed => "extraction_missed",
            Self::WriteFailed => "write_failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// States of the traversal loop
///
/// `Pending → Visiting → Emitting → Pending …` until the frontier drains,
/// then `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    /// Frontier is non-empty
    Pending,

    /// One URL popped, being fetched and parsed
    Visiting,

    /// Content extracted, links discovered, artifacts being written
    Emitting,

    /// Frontier exhausted (or the run was stopped)
    Done,
}

impl TraversalState {
    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: TraversalState) -> bool {
        use TraversalState::*;
        matches!(
            (self, next),
            (Pending, Visiting)
                | (Pending, Done)
                | (Visiting, Emitting)
                | (Visiting, Pending)
                | (Emitting, Pending)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_error() {
        assert!(PageState::FetchFailed.is_error());
        assert!(PageState::ExtractionMissed.is_error());
        assert!(PageState::WriteFailed.is_error());

        assert!(!PageState::Exported.is_error());
        assert!(!PageState::OutOfScope.is_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PageState::Exported), "exported");
        assert_eq!(format!("{}", PageState::ExtractionMissed), "extraction_missed");
        assert_eq!(format!("{}", PageState::WriteFailed), "write_failed");
    }

    #[test]
    fn test_traversal_transitions() {
        use TraversalState::*;
        assert!(Pending.can_transition_to(Visiting));
        assert!(Visiting.can_transition_to(Emitting));
        assert!(Visiting.can_transition_to(Pending));
        assert!(Emitting.can_transition_to(Pending));
        assert!(Pending.can_transition_to(Done));

        assert!(!Done.can_transition_to(Pending));
        assert!(!Emitting.can_transition_to(Done));
        assert!(!Pending.can_transition_to(Emitting));
    }
}
