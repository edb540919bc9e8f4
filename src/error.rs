use std::fmt::{Debug, Display};

use itertools::Itertools;
use thiserror::Error;

/// A single structural problem found while validating a [`crate::DfaBuilder`]. Each variant
/// corresponds to exactly one violated invariant, variants that concern a specific state or
/// transition carry the offending labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum BuildError<S, Y> {
    /// No initial state was designated.
    #[error("initial state must be set")]
    MissingInitial,
    /// The state set is empty.
    #[error("at least one state is required")]
    NoStates,
    /// The alphabet is empty.
    #[error("at least one input symbol is required")]
    EmptyAlphabet,
    /// A state is flagged as accepting without being a registered state.
    #[error("accepting state {0:?} is not a known state")]
    UnknownAcceptingState(S),
    /// A transition leaves a state that is not registered.
    #[error("transition from unknown state {from:?} on {symbol:?}")]
    TransitionFromUnknownState {
        /// Origin of the transition.
        from: S,
        /// Symbol of the transition.
        symbol: Y,
    },
    /// A transition is labelled with a symbol that is not part of the alphabet.
    #[error("transition from {from:?} uses unknown symbol {symbol:?}")]
    TransitionOnUnknownSymbol {
        /// Origin of the transition.
        from: S,
        /// Symbol of the transition.
        symbol: Y,
    },
    /// A transition leads to a state that is not registered.
    #[error("transition from {from:?} on {symbol:?} to unknown state {to:?}")]
    TransitionToUnknownState {
        /// Origin of the transition.
        from: S,
        /// Symbol of the transition.
        symbol: Y,
        /// Target of the transition.
        to: S,
    },
    /// The transition function is required to be total but has no entry for this pair.
    #[error("missing transition from {from:?} on {symbol:?}")]
    MissingTransition {
        /// The state without an outgoing transition.
        from: S,
        /// The symbol that has no transition.
        symbol: Y,
    },
    /// At least one accepting state is required but there is none.
    #[error("at least one accepting state required")]
    NoAcceptingStates,
    /// All states are required to be reachable but this one is not.
    #[error("unreachable state {0:?}")]
    UnreachableState(S),
    /// No accepting state can be reached from the initial state.
    #[error("no accepting state reachable from initial")]
    NoReachableAcceptingState,
}

/// Collects every [`BuildError`] that a single validation run produces, so that all of them
/// can be reported at once instead of only the first one.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidationErrors<S, Y>(Vec<BuildError<S, Y>>);

impl<S, Y> Default for ValidationErrors<S, Y> {
    fn default() -> Self {
        Self(vec![])
    }
}

impl<S, Y> ValidationErrors<S, Y> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records another error.
    pub fn push(&mut self, error: BuildError<S, Y>) {
        self.0.push(error)
    }

    /// Returns true if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of recorded errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the recorded errors in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, BuildError<S, Y>> {
        self.0.iter()
    }

    /// Returns true if `error` was recorded.
    pub fn contains(&self, error: &BuildError<S, Y>) -> bool
    where
        S: PartialEq,
        Y: PartialEq,
    {
        self.0.contains(error)
    }

    /// Turns `self` into `Ok(value)` if nothing was recorded and into `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl<S, Y> Extend<BuildError<S, Y>> for ValidationErrors<S, Y> {
    fn extend<T: IntoIterator<Item = BuildError<S, Y>>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl<S, Y> IntoIterator for ValidationErrors<S, Y> {
    type Item = BuildError<S, Y>;
    type IntoIter = std::vec::IntoIter<BuildError<S, Y>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, S, Y> IntoIterator for &'a ValidationErrors<S, Y> {
    type Item = &'a BuildError<S, Y>;
    type IntoIter = std::slice::Iter<'a, BuildError<S, Y>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Debug, Y: Debug> Display for ValidationErrors<S, Y> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "no validation errors"),
            [single] => write!(f, "{single}"),
            errors => write!(
                f,
                "validation errors:{}",
                errors.iter().map(|e| format!("\n - {e}")).join("")
            ),
        }
    }
}

impl<S: Debug, Y: Debug> Debug for ValidationErrors<S, Y> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<S: Debug, Y: Debug> std::error::Error for ValidationErrors<S, Y> {}

/// Returned when an automaton is asked to move on a symbol for which the current state has
/// no outgoing transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("no transition from {from:?} on {symbol:?}")]
pub struct TransitionError<S, Y> {
    /// The state in which the automaton was stuck.
    pub from: S,
    /// The symbol that could not be consumed.
    pub symbol: Y,
}

impl<S, Y> TransitionError<S, Y> {
    /// Creates a new error for the given state and symbol.
    pub fn new(from: S, symbol: Y) -> Self {
        Self { from, symbol }
    }
}
