use tracing::error;

use crate::{
    math::{Map, Set},
    validation, Dfa, Label, ValidationErrors, ValidationPolicy,
};

/// Helper struct for the incremental definition of a [`Dfa`]. It stores the registered states,
/// the alphabet, the accepting states, the initial state and the transitions. Calls may happen in
/// any order, adding a transition or setting the initial state implicitly registers the states
/// and the symbol involved.
///
/// Two flavours of methods exist. The `add_*` methods and [`Self::set_initial`] take `&mut self`
/// and can be chained on a mutable reference, the `with_*` methods consume and return the builder
/// which is convenient for defining an automaton in a single expression.
///
/// A builder is meant to be owned by a single thread during the construction phase, it is turned
/// into an immutable [`Dfa`] by [`Self::build`].
///
/// # Example
///
/// We want to create a DFA with two states `"A"` and `"B"` over the alphabet `['a', 'b']`, where `"A"` is
/// initial and accepting. Reading `'a'` keeps the state while `'b'` switches to the other one.
/// ```
/// use fsm::prelude::*;
///
/// let mut builder = DfaBuilder::new();
/// builder
///     .add_state("A", true)
///     .add_state("B", false)
///     .add_symbol('a')
///     .add_symbol('b')
///     .set_initial("A");
/// builder
///     .add_transition("A", 'a', "A")
///     .add_transition("A", 'b', "B")
///     .add_transition("B", 'a', "B")
///     .add_transition("B", 'b', "A");
///
/// let dfa = builder.build().unwrap();
/// assert_eq!(dfa.evaluate("abab".chars()), Ok("A"));
/// ```
#[derive(Debug, Clone)]
pub struct DfaBuilder<S, Y> {
    pub(crate) states: Set<S>,
    pub(crate) symbols: Set<Y>,
    pub(crate) initial: Option<S>,
    pub(crate) accepting: Set<S>,
    pub(crate) transitions: Map<S, Map<Y, S>>,
    pub(crate) policy: ValidationPolicy,
}

impl<S, Y> Default for DfaBuilder<S, Y> {
    fn default() -> Self {
        Self::with_policy(ValidationPolicy::default())
    }
}

impl<S, Y> DfaBuilder<S, Y> {
    /// Creates an empty builder that runs only the checks which are always performed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder that additionally runs the checks enabled in `policy`.
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            states: Set::default(),
            symbols: Set::default(),
            initial: None,
            accepting: Set::default(),
            transitions: Map::default(),
            policy,
        }
    }

    /// The policy this builder was created with.
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// All states registered so far.
    pub fn states(&self) -> &Set<S> {
        &self.states
    }

    /// All symbols registered so far.
    pub fn alphabet(&self) -> &Set<Y> {
        &self.symbols
    }

    /// The currently designated initial state, if any.
    pub fn initial(&self) -> Option<&S> {
        self.initial.as_ref()
    }

    /// The number of `(state, symbol)` pairs for which a transition is recorded.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(|row| row.len()).sum()
    }
}

impl<S: Label, Y: Label> DfaBuilder<S, Y> {
    /// Registers `state`. If `accepting` is true, the state is also made accepting. Registering a
    /// state that already exists has no effect on the state set, and a state that was made
    /// accepting once stays accepting even if it is later added again with `accepting` set to
    /// false.
    pub fn add_state(&mut self, state: S, accepting: bool) -> &mut Self {
        if accepting {
            self.accepting.insert(state.clone());
        }
        self.states.insert(state);
        self
    }

    /// Registers `symbol` as part of the alphabet.
    pub fn add_symbol(&mut self, symbol: Y) -> &mut Self {
        self.symbols.insert(symbol);
        self
    }

    /// Designates `state` as the initial state and registers it. Calling this again replaces the
    /// previously designated initial state.
    pub fn set_initial(&mut self, state: S) -> &mut Self {
        self.states.insert(state.clone());
        self.initial = Some(state);
        self
    }

    /// Records the transition `from --symbol--> to`, registering both states and the symbol.
    ///
    /// If a transition for `(from, symbol)` already exists, it is overwritten, unless the policy
    /// of `self` rejects duplicate transitions.
    ///
    /// # Panics
    ///
    /// Panics if the policy rejects duplicate transitions and a transition for `(from, symbol)`
    /// was recorded before. Defining contradicting transitions is considered a mistake in the
    /// code that defines the automaton.
    pub fn add_transition(&mut self, from: S, symbol: Y, to: S) -> &mut Self {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.symbols.insert(symbol.clone());

        if self.policy.rejects_duplicate_transitions() && self.transition(&from, &symbol).is_some()
        {
            error!("duplicate transition for ({from:?}, {symbol:?}) is rejected by policy");
            panic!("transition already defined for ({from:?}, {symbol:?})");
        }
        self.transitions.entry(from).or_default().insert(symbol, to);
        self
    }

    /// Returns true if `state` is flagged as accepting.
    pub fn is_accepting(&self, state: &S) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the target of the transition recorded for `(from, symbol)`, if any.
    pub fn transition(&self, from: &S, symbol: &Y) -> Option<&S> {
        self.transitions.get(from)?.get(symbol)
    }

    /// Consuming variant of [`Self::add_state`] that registers all given states together with
    /// their accepting flag.
    pub fn with_states<I: IntoIterator<Item = (S, bool)>>(mut self, states: I) -> Self {
        for (state, accepting) in states {
            self.add_state(state, accepting);
        }
        self
    }

    /// Consuming variant of [`Self::add_symbol`] for any number of symbols.
    pub fn with_symbols<I: IntoIterator<Item = Y>>(mut self, symbols: I) -> Self {
        self.symbols.extend(symbols);
        self
    }

    /// Consuming variant of [`Self::set_initial`].
    pub fn with_initial(mut self, state: S) -> Self {
        self.set_initial(state);
        self
    }

    /// Consuming variant of [`Self::add_transition`]. The transitions are added in the order in
    /// which they are given, so later ones overwrite earlier ones for the same `(state, symbol)`
    /// pair unless the policy rejects duplicates.
    ///
    /// # Panics
    ///
    /// Under the same condition as [`Self::add_transition`].
    pub fn with_transitions<I: IntoIterator<Item = (S, Y, S)>>(mut self, transitions: I) -> Self {
        for (from, symbol, to) in transitions {
            self.add_transition(from, symbol, to);
        }
        self
    }

    /// Validates everything that was defined so far and, if no problem is found, returns a
    /// [`Dfa`] that holds its own copy of the definition. Otherwise every problem that was found
    /// is reported. The builder itself is left untouched in both cases, so it can be inspected,
    /// modified and built again.
    pub fn build(&self) -> Result<Dfa<S, Y>, ValidationErrors<S, Y>> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn add_state_is_idempotent_and_accepting_is_sticky() {
        let mut builder = DfaBuilder::new();
        builder
            .add_state("S", false)
            .add_state("S", true)
            .add_state("S", false)
            .add_state("S", false)
            .set_initial("S")
            .add_symbol('x');
        assert_eq!(builder.states().len(), 1);
        assert!(builder.is_accepting(&"S"));

        let dfa = builder.build().unwrap();
        assert!(dfa.accepting(&"S"));
    }

    #[test]
    fn initial_is_registered_implicitly() {
        let mut builder = DfaBuilder::new();
        builder.set_initial("I").add_symbol('x');
        assert!(builder.states().contains(&"I"));

        let dfa = builder.build().unwrap();
        assert!(!dfa.accepting(&"I"));
        assert_eq!(dfa.initial_state(), &"I");
    }

    #[test]
    fn initial_last_write_wins() {
        let builder = DfaBuilder::new()
            .with_initial("A")
            .with_initial("B")
            .with_symbols(['x']);
        assert_eq!(builder.initial(), Some(&"B"));
        assert_eq!(builder.states().len(), 2);
        assert_eq!(builder.build().unwrap().initial_state(), &"B");
    }

    #[test]
    fn transitions_register_states_and_symbols() {
        let mut builder = DfaBuilder::new();
        builder.set_initial("A").add_transition("A", 'x', "B");
        assert!(builder.states().contains(&"B"));
        assert!(builder.alphabet().contains(&'x'));
        assert_eq!(builder.transition(&"A", &'x'), Some(&"B"));
        assert_eq!(builder.transition(&"B", &'x'), None);
        assert_eq!(builder.transition_count(), 1);

        let dfa = builder.build().unwrap();
        let mut runner = dfa.start();
        assert_eq!(runner.step(&'x'), Ok(()));
        assert_eq!(runner.state(), &"B");
    }

    #[test]
    fn overwrite_when_duplicates_are_allowed() {
        let dfa = DfaBuilder::new()
            .with_states([("A", true), ("B", true)])
            .with_initial("A")
            .with_symbols(['x'])
            .with_transitions([("A", 'x', "B"), ("A", 'x', "A")])
            .build()
            .unwrap();

        let mut runner = dfa.start();
        runner.step(&'x').unwrap();
        assert_eq!(runner.state(), &"A");
        assert_eq!(dfa.get_transition(&"A", &'x'), Some(&"A"));
    }

    #[test]
    #[should_panic(expected = "transition already defined")]
    fn duplicate_transition_panics_when_rejected() {
        let mut builder =
            DfaBuilder::with_policy(ValidationPolicy::default().reject_duplicate_transitions());
        builder
            .add_state("A", true)
            .add_state("B", true)
            .add_symbol('x')
            .set_initial("A");

        builder.add_transition("A", 'x', "B");
        builder.add_transition("A", 'x', "A");
        unreachable!("the duplicate must abort before the builder is ever built");
    }

    #[test]
    fn same_symbol_from_different_states_is_no_duplicate() {
        let builder =
            DfaBuilder::with_policy(ValidationPolicy::default().reject_duplicate_transitions())
                .with_initial("A")
                .with_transitions([("A", 'x', "B"), ("B", 'x', "A")]);
        assert_eq!(builder.transition_count(), 2);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn builder_survives_failed_build() {
        let mut builder = DfaBuilder::new();
        builder.add_state("A", true);
        assert!(builder.build().is_err());
        assert!(builder.states().contains(&"A"));

        builder.set_initial("A").add_symbol('x');
        assert!(builder.build().is_ok());
    }
}
