use crate::{Dfa, Label, TransitionError};

/// A cursor that walks through a [`Dfa`] one symbol at a time. It only holds its current state
/// and a reference to the automaton, so creating one is cheap and any number of runners can work
/// on the same automaton independently.
///
/// A runner is created through [`Dfa::start`] or [`Dfa::runner_at`].
#[derive(Debug, Clone)]
pub struct Runner<'a, S, Y> {
    dfa: &'a Dfa<S, Y>,
    state: S,
}

impl<'a, S: Label, Y: Label> Runner<'a, S, Y> {
    pub(crate) fn new(dfa: &'a Dfa<S, Y>, state: S) -> Self {
        Self { dfa, state }
    }

    /// The state the runner is currently in.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Consumes the runner and returns its current state.
    pub fn into_state(self) -> S {
        self.state
    }

    /// Returns true if the current state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.dfa.accepting(&self.state)
    }

    /// The automaton this runner operates on.
    pub fn automaton(&self) -> &'a Dfa<S, Y> {
        self.dfa
    }

    /// Moves along the transition for `symbol` from the current state. If there is no such
    /// transition, a [`TransitionError`] is returned and the runner stays where it is, so it can
    /// be stepped again with a different symbol.
    pub fn step(&mut self, symbol: &Y) -> Result<(), TransitionError<S, Y>> {
        match self.dfa.get_transition(&self.state, symbol) {
            Some(next) => {
                self.state = next.clone();
                Ok(())
            }
            None => Err(TransitionError::new(self.state.clone(), symbol.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{prelude::*, tests::remainder_dfa};

    #[test]
    fn step_sequence() {
        let dfa = DfaBuilder::new()
            .with_states([("A", true), ("B", true)])
            .with_initial("A")
            .with_transitions([("A", 'x', "B"), ("B", 'x', "A")])
            .build()
            .unwrap();

        let mut runner = dfa.start();
        assert_eq!(runner.state(), &"A");
        runner.step(&'x').unwrap();
        assert_eq!(runner.state(), &"B");
        runner.step(&'x').unwrap();
        assert_eq!(runner.state(), &"A");
    }

    #[test]
    fn missing_row_and_missing_symbol() {
        let dfa = DfaBuilder::new()
            .with_states([("A", true), ("B", false), ("C", false)])
            .with_symbols(['x', 'y'])
            .with_initial("A")
            .with_transitions([("A", 'y', "B"), ("B", 'x', "A")])
            .build()
            .unwrap();

        let mut runner = dfa.start();
        assert_eq!(runner.step(&'x'), Err(TransitionError::new("A", 'x')));

        let mut stuck = dfa.runner_at("C").unwrap();
        assert_eq!(stuck.step(&'x'), Err(TransitionError::new("C", 'x')));
        assert_eq!(stuck.step(&'y'), Err(TransitionError::new("C", 'y')));
    }

    #[test]
    fn failed_step_keeps_state() {
        let dfa = remainder_dfa();
        let mut runner = dfa.start();
        runner.step(&'1').unwrap();
        assert_eq!(runner.step(&'2'), Err(TransitionError::new("S1", '2')));
        assert_eq!(runner.state(), &"S1");
        assert!(runner.is_accepting());

        runner.step(&'0').unwrap();
        assert_eq!(runner.into_state(), "S2");
    }

    #[test]
    fn runners_are_independent() {
        let dfa = remainder_dfa();
        let mut first = dfa.start();
        let mut second = dfa.start();
        first.step(&'1').unwrap();
        assert_eq!(second.state(), &"S0");

        let mut forked = first.clone();
        forked.step(&'0').unwrap();
        assert_eq!(first.state(), &"S1");
        assert_eq!(forked.state(), &"S2");

        second.step(&'0').unwrap();
        assert_eq!(second.state(), &"S0");
        assert!(std::ptr::eq(first.automaton(), &dfa));
    }

    #[test]
    fn concatenation_is_split_invariant() {
        let dfa = remainder_dfa();
        let words = std::iter::once(vec![])
            .chain((1..=5).flat_map(|n| {
                std::iter::repeat(['0', '1'])
                    .take(n)
                    .multi_cartesian_product()
            }))
            .collect_vec();

        for s in &words {
            for t in &words {
                let whole = dfa.evaluate(s.iter().chain(t.iter()));

                let mut runner = dfa.start();
                for a in s.iter().chain(t) {
                    runner.step(a).unwrap();
                }
                assert_eq!(whole.as_ref(), Ok(runner.state()));

                let mut split = dfa.start();
                s.iter().for_each(|a| split.step(a).unwrap());
                assert_eq!(split.state(), &dfa.evaluate(s).unwrap());
                t.iter().for_each(|a| split.step(a).unwrap());
                assert_eq!(whole, Ok(split.into_state()));
            }
        }
    }

    #[test]
    fn remainder_matches_arithmetic() {
        let dfa = remainder_dfa();
        for n in 0u32..256 {
            let binary = format!("{n:b}");
            let expected = ["S0", "S1", "S2"][(n % 3) as usize];
            assert_eq!(dfa.evaluate(binary.chars()), Ok(expected), "input {binary}");
        }
    }
}
