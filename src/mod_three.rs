use std::sync::OnceLock;

use thiserror::Error;
use tracing::trace;

use crate::{Dfa, DfaBuilder, TransitionError, ValidationErrors, ValidationPolicy};

/// States of the recognizer, `"S0"`, `"S1"` and `"S2"` stand for the remainders 0, 1 and 2.
pub type State = &'static str;

/// The automaton that [`mod_three`] runs on.
pub type ModThreeDfa = Dfa<State, char>;

/// Errors that can occur while computing a remainder with [`mod_three`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModThreeError {
    /// The input contains something other than `'0'` and `'1'`.
    #[error("invalid binary character '{digit}' at position {position}")]
    InvalidDigit {
        /// The offending character.
        digit: char,
        /// Its position in the input, counted in characters.
        position: usize,
    },
    /// The automaton could not be built.
    #[error(transparent)]
    Build(#[from] ValidationErrors<State, char>),
    /// The automaton got stuck while reading the input.
    #[error(transparent)]
    Transition(#[from] TransitionError<State, char>),
    /// The automaton ended in a state that does not correspond to a remainder.
    #[error("unexpected final state {0:?}")]
    UnexpectedState(State),
}

/// Builds the automaton that reads a binary number starting with the most significant bit and
/// tracks its remainder modulo three. Reading a bit `b` in the state for remainder `r` leads to
/// the state for remainder `(2r + b) mod 3`. All states are accepting, the information lies in
/// which state is reached.
pub fn build() -> Result<ModThreeDfa, ValidationErrors<State, char>> {
    let mut builder = DfaBuilder::with_policy(
        ValidationPolicy::default()
            .reject_duplicate_transitions()
            .require_all_reachable()
            .require_reachable_accepting(),
    );
    builder
        .add_state("S0", true)
        .add_state("S1", true)
        .add_state("S2", true)
        .set_initial("S0")
        .add_symbol('0')
        .add_symbol('1');
    builder
        .add_transition("S0", '0', "S0")
        .add_transition("S0", '1', "S1")
        .add_transition("S1", '0', "S2")
        .add_transition("S1", '1', "S0")
        .add_transition("S2", '0', "S1")
        .add_transition("S2", '1', "S2");
    builder.build()
}

/// Returns the automaton built by [`build`]. It is built on first use and shared afterwards.
pub fn machine() -> Result<&'static ModThreeDfa, ModThreeError> {
    static MACHINE: OnceLock<Result<ModThreeDfa, ValidationErrors<State, char>>> = OnceLock::new();
    MACHINE
        .get_or_init(|| {
            trace!("building mod three automaton");
            build()
        })
        .as_ref()
        .map_err(|e| ModThreeError::Build(e.clone()))
}

/// Computes the remainder of the binary number `binary` modulo three. The empty string
/// represents zero.
///
/// ```
/// assert_eq!(fsm::mod_three::mod_three("1110"), Ok(2));
/// assert!(fsm::mod_three::mod_three("12").is_err());
/// ```
pub fn mod_three(binary: &str) -> Result<u8, ModThreeError> {
    if let Some((position, digit)) = binary
        .chars()
        .enumerate()
        .find(|(_, c)| !matches!(c, '0' | '1'))
    {
        return Err(ModThreeError::InvalidDigit { digit, position });
    }

    match machine()?.evaluate(binary.chars())? {
        "S0" => Ok(0),
        "S1" => Ok(1),
        "S2" => Ok(2),
        other => Err(ModThreeError::UnexpectedState(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainders() {
        for (input, expected) in [
            ("", 0),
            ("0", 0),
            ("1", 1),
            ("10", 2),
            ("1101", 1),
            ("1110", 2),
            ("1111", 0),
            ("1010101010101010101010101010101010101010", 1),
        ] {
            assert_eq!(mod_three(input), Ok(expected), "input {input:?}");
        }
    }

    #[test_log::test]
    fn matches_arithmetic() {
        for n in 0u64..1024 {
            assert_eq!(mod_three(&format!("{n:b}")), Ok((n % 3) as u8));
        }
    }

    #[test]
    fn rejects_invalid_digits() {
        assert_eq!(
            mod_three("10a1"),
            Err(ModThreeError::InvalidDigit {
                digit: 'a',
                position: 2
            })
        );
        assert_eq!(
            mod_three(" 1").unwrap_err().to_string(),
            "invalid binary character ' ' at position 0"
        );
    }

    #[test]
    fn machine_is_built_once() {
        let first = machine().unwrap();
        let second = machine().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.size(), 3);
        assert_eq!(first.reachable_states().count(), 3);
    }

    #[test]
    fn stuck_automaton_surfaces_transition_error() {
        let dfa = build().unwrap();
        let err: ModThreeError = dfa.evaluate("12".chars()).unwrap_err().into();
        assert_eq!(err.to_string(), "no transition from \"S1\" on '2'");
    }
}
