/// Decides which optional checks a [`crate::DfaBuilder`] performs. A policy is fixed when the
/// builder is created and cannot be changed afterwards. The checks that are always performed
/// (initial state set, non-empty state set and alphabet, accepting states and transitions only
/// referring to known labels) are not affected by the policy.
///
/// The [`Default`] policy enables nothing, [`ValidationPolicy::strict`] enables everything.
///
/// ```
/// use fsm::prelude::*;
///
/// let policy = ValidationPolicy::default()
///     .reject_duplicate_transitions()
///     .require_all_reachable();
/// assert!(policy.rejects_duplicate_transitions());
/// assert!(!policy.requires_total_transitions());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidationPolicy {
    reject_duplicates: bool,
    total_transitions: bool,
    accepting_states: bool,
    all_reachable: bool,
    reachable_accepting: bool,
}

impl ValidationPolicy {
    /// A policy that enables every optional check.
    pub fn strict() -> Self {
        Self {
            reject_duplicates: true,
            total_transitions: true,
            accepting_states: true,
            all_reachable: true,
            reachable_accepting: true,
        }
    }

    /// Defining the same `(state, symbol)` pair twice panics instead of overwriting the
    /// previous target.
    pub fn reject_duplicate_transitions(mut self) -> Self {
        self.reject_duplicates = true;
        self
    }

    /// Every state must have a transition on every symbol.
    pub fn require_total_transitions(mut self) -> Self {
        self.total_transitions = true;
        self
    }

    /// The set of accepting states must not be empty.
    pub fn require_accepting_states(mut self) -> Self {
        self.accepting_states = true;
        self
    }

    /// Every state must be reachable from the initial state.
    pub fn require_all_reachable(mut self) -> Self {
        self.all_reachable = true;
        self
    }

    /// At least one accepting state must be reachable from the initial state.
    pub fn require_reachable_accepting(mut self) -> Self {
        self.reachable_accepting = true;
        self
    }

    #[allow(missing_docs)]
    pub fn rejects_duplicate_transitions(&self) -> bool {
        self.reject_duplicates
    }

    #[allow(missing_docs)]
    pub fn requires_total_transitions(&self) -> bool {
        self.total_transitions
    }

    #[allow(missing_docs)]
    pub fn requires_accepting_states(&self) -> bool {
        self.accepting_states
    }

    #[allow(missing_docs)]
    pub fn requires_all_reachable(&self) -> bool {
        self.all_reachable
    }

    #[allow(missing_docs)]
    pub fn requires_reachable_accepting(&self) -> bool {
        self.reachable_accepting
    }

    /// Returns true if any check needs the set of states reachable from the initial state.
    pub fn needs_reachability(&self) -> bool {
        self.all_reachable || self.reachable_accepting
    }
}
