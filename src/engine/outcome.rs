//! What a single step ended with.

/// The callback that vetoed a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelPoint {
    Before,
    Leave,
}

/// Result of executing a single step.
///
/// Every variant is ordinary control flow; none of them is an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Committed a move to a different state
    Transitioned { from: String, to: String },

    /// Committed a step that resolved back onto the current state
    Stayed { state: String },

    /// A `before` or `leave` callback vetoed the step; nothing changed
    Canceled {
        from: String,
        to: String,
        by: CancelPoint,
    },

    /// No rule matched the event; nothing changed
    Unresolved { from: String },
}

impl StepOutcome {
    /// True when the step reached commit, whether or not the state changed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Transitioned { .. } | Self::Stayed { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }

    pub fn state_changed(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    /// The state the machine is in once the step is over.
    pub fn state(&self) -> &str {
        match self {
            Self::Transitioned { to, .. } => to,
            Self::Stayed { state } => state,
            Self::Canceled { from, .. } | Self::Unresolved { from } => from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_outcomes() {
        let moved = StepOutcome::Transitioned {
            from: "a".to_string(),
            to: "b".to_string(),
        };
        let stayed = StepOutcome::Stayed {
            state: "b".to_string(),
        };

        assert!(moved.is_committed() && moved.state_changed());
        assert!(stayed.is_committed() && !stayed.state_changed());
        assert_eq!(moved.state(), "b");
        assert_eq!(stayed.state(), "b");
    }

    #[test]
    fn aborted_outcomes_keep_source_state() {
        let canceled = StepOutcome::Canceled {
            from: "a".to_string(),
            to: "b".to_string(),
            by: CancelPoint::Leave,
        };
        let unresolved = StepOutcome::Unresolved {
            from: "a".to_string(),
        };

        assert!(canceled.is_canceled());
        assert!(!canceled.is_committed());
        assert!(!unresolved.is_committed());
        assert_eq!(canceled.state(), "a");
        assert_eq!(unresolved.state(), "a");
    }
}
