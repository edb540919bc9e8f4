use std::{borrow::Borrow, fmt::Display};

use itertools::Itertools;

use crate::{
    math::{Map, Set},
    reachable::ReachableStates,
    Label, Runner, TransitionError,
};

/// A deterministic finite automaton (DFA) over states of type `S` and symbols of type `Y`. It
/// accepts a finite word if reading it from the initial state ends in an accepting state.
///
/// A `Dfa` can only be obtained from [`crate::DfaBuilder::build`], which guarantees that the
/// initial state, every accepting state and every endpoint of a transition is a known state and
/// that every transition symbol belongs to the alphabet. It is never modified afterwards, so it
/// can be shared freely between threads and any number of [`Runner`]s may operate on it at the
/// same time.
#[derive(Debug, Clone)]
pub struct Dfa<S, Y> {
    initial: S,
    states: Set<S>,
    alphabet: Set<Y>,
    accepting: Set<S>,
    transitions: Map<S, Map<Y, S>>,
}

impl<S: Label, Y: Label> Dfa<S, Y> {
    pub(crate) fn new(
        initial: S,
        states: Set<S>,
        alphabet: Set<Y>,
        accepting: Set<S>,
        transitions: Map<S, Map<Y, S>>,
    ) -> Self {
        Self {
            initial,
            states,
            alphabet,
            accepting,
            transitions,
        }
    }

    /// Returns true if and only if `state` is accepting. This is defined for every value of `S`,
    /// states that are not part of the automaton are simply not accepting.
    pub fn accepting(&self, state: &S) -> bool {
        self.accepting.contains(state)
    }

    /// Returns a fresh [`Runner`] that is positioned at the initial state.
    pub fn start(&self) -> Runner<'_, S, Y> {
        Runner::new(self, self.initial.clone())
    }

    /// Returns a [`Runner`] that is positioned at `state`, or `None` if `state` is not a state
    /// of `self`.
    pub fn runner_at(&self, state: S) -> Option<Runner<'_, S, Y>> {
        self.states
            .contains(&state)
            .then(|| Runner::new(self, state))
    }

    /// Reads `input` starting in the initial state and returns the state that is reached after
    /// the last symbol. An empty input leads to the initial state.
    ///
    /// Fails with a [`TransitionError`] as soon as a symbol is encountered for which the current
    /// state has no transition, the remaining input is not read.
    pub fn evaluate<I>(&self, input: I) -> Result<S, TransitionError<S, Y>>
    where
        I: IntoIterator,
        I::Item: Borrow<Y>,
    {
        let mut runner = self.start();
        for symbol in input {
            runner.step(symbol.borrow())?;
        }
        Ok(runner.into_state())
    }

    /// Reads `input` like [`Self::evaluate`] and reports whether the reached state is accepting.
    pub fn evaluate_accepting<I>(&self, input: I) -> Result<bool, TransitionError<S, Y>>
    where
        I: IntoIterator,
        I::Item: Borrow<Y>,
    {
        self.evaluate(input).map(|q| self.accepting(&q))
    }

    /// All states of the automaton.
    pub fn states(&self) -> &Set<S> {
        &self.states
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// The alphabet of the automaton.
    pub fn alphabet(&self) -> &Set<Y> {
        &self.alphabet
    }

    /// The designated initial state.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Iterates over the accepting states.
    pub fn accepting_states(&self) -> impl Iterator<Item = &S> + '_ {
        self.accepting.iter()
    }

    /// Returns the target of the transition for `(from, symbol)` or `None` if there is none.
    pub fn get_transition(&self, from: &S, symbol: &Y) -> Option<&S> {
        self.transitions.get(from)?.get(symbol)
    }

    /// Returns true if there is a transition for `(from, symbol)`.
    pub fn has_transition(&self, from: &S, symbol: &Y) -> bool {
        self.get_transition(from, symbol).is_some()
    }

    /// Iterates over all transitions as `(from, symbol, to)` triples, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (&S, &Y, &S)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(symbol, to)| (from, symbol, to)))
    }

    /// Iterates over the states that are reachable from the initial state, in breadth-first
    /// order starting with the initial state itself.
    pub fn reachable_states(&self) -> ReachableStates<'_, S, Y> {
        ReachableStates::new(&self.transitions, &self.initial)
    }
}

/// Renders the transition table. Rows and columns are sorted by the debug representation of the
/// states and symbols, the initial state is marked with `->` and accepting states with `*`.
impl<S: Label, Y: Label> Display for Dfa<S, Y> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbols = self
            .alphabet
            .iter()
            .sorted_by_cached_key(|a| format!("{a:?}"))
            .collect_vec();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(symbols.iter().map(|a| format!("{a:?}"))),
        );
        for q in self.states.iter().sorted_by_cached_key(|q| format!("{q:?}")) {
            let mut row = vec![format!(
                "{}{q:?}{}",
                if *q == self.initial { "-> " } else { "" },
                if self.accepting(q) { " *" } else { "" }
            )];
            for a in &symbols {
                row.push(match self.get_transition(q, a) {
                    Some(p) => format!("{p:?}"),
                    None => "-".to_string(),
                });
            }
            builder.push_record(row);
        }

        write!(
            f,
            "{}",
            builder.build().with(tabled::settings::Style::rounded())
        )
    }
}
