use tracing::{debug, trace};

use crate::{
    math::Set, reachable::ReachableStates, BuildError, Dfa, DfaBuilder, Label, ValidationErrors,
    ValidationPolicy,
};

/// A single structural check that is run against a [`DfaBuilder`] when it is built. The first
/// five checks are always performed, the remaining ones only if the [`ValidationPolicy`] of the
/// builder asks for them. Every check reports all violations it finds, not just the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// An initial state must be designated.
    Initial,
    /// The state set must not be empty.
    States,
    /// The alphabet must not be empty.
    Alphabet,
    /// Every accepting state must be a registered state.
    AcceptingKnown,
    /// Origin, symbol and target of every transition must be registered.
    TransitionsKnown,
    /// Every state must have a transition on every symbol.
    TotalTransitions,
    /// There must be at least one accepting state.
    AcceptingStates,
    /// Checks on the states that are reachable from the initial state, which of them are
    /// performed depends on the policy.
    Reachability,
}

impl Check {
    /// The checks that are performed regardless of the policy.
    pub const ALWAYS: [Check; 5] = [
        Check::Initial,
        Check::States,
        Check::Alphabet,
        Check::AcceptingKnown,
        Check::TransitionsKnown,
    ];

    /// Returns all checks that are performed under `policy`, in the order in which they run.
    pub fn enabled_by(policy: ValidationPolicy) -> impl Iterator<Item = Check> {
        let optional = [
            (Check::TotalTransitions, policy.requires_total_transitions()),
            (Check::AcceptingStates, policy.requires_accepting_states()),
            (Check::Reachability, policy.needs_reachability()),
        ];
        Self::ALWAYS.into_iter().chain(
            optional
                .into_iter()
                .filter_map(|(check, enabled)| enabled.then_some(check)),
        )
    }

    /// Runs the check against `builder` and records every violation in `errors`.
    pub fn run<S: Label, Y: Label>(
        self,
        builder: &DfaBuilder<S, Y>,
        errors: &mut ValidationErrors<S, Y>,
    ) {
        let before = errors.len();
        match self {
            Check::Initial => {
                if builder.initial.is_none() {
                    errors.push(BuildError::MissingInitial);
                }
            }
            Check::States => {
                if builder.states.is_empty() {
                    errors.push(BuildError::NoStates);
                }
            }
            Check::Alphabet => {
                if builder.symbols.is_empty() {
                    errors.push(BuildError::EmptyAlphabet);
                }
            }
            Check::AcceptingKnown => errors.extend(
                builder
                    .accepting
                    .iter()
                    .filter(|q| !builder.states.contains(*q))
                    .map(|q| BuildError::UnknownAcceptingState(q.clone())),
            ),
            Check::TransitionsKnown => check_transitions_known(builder, errors),
            Check::TotalTransitions => check_total(builder, errors),
            Check::AcceptingStates => {
                if builder.accepting.is_empty() {
                    errors.push(BuildError::NoAcceptingStates);
                }
            }
            Check::Reachability => check_reachability(builder, errors),
        }
        trace!("{self:?} check found {} problem(s)", errors.len() - before);
    }
}

fn check_transitions_known<S: Label, Y: Label>(
    builder: &DfaBuilder<S, Y>,
    errors: &mut ValidationErrors<S, Y>,
) {
    for (from, row) in &builder.transitions {
        for (symbol, to) in row {
            if !builder.states.contains(from) {
                errors.push(BuildError::TransitionFromUnknownState {
                    from: from.clone(),
                    symbol: symbol.clone(),
                });
            }
            if !builder.symbols.contains(symbol) {
                errors.push(BuildError::TransitionOnUnknownSymbol {
                    from: from.clone(),
                    symbol: symbol.clone(),
                });
            }
            if !builder.states.contains(to) {
                errors.push(BuildError::TransitionToUnknownState {
                    from: from.clone(),
                    symbol: symbol.clone(),
                    to: to.clone(),
                });
            }
        }
    }
}

fn check_total<S: Label, Y: Label>(
    builder: &DfaBuilder<S, Y>,
    errors: &mut ValidationErrors<S, Y>,
) {
    for from in &builder.states {
        for symbol in &builder.symbols {
            if builder.transition(from, symbol).is_none() {
                errors.push(BuildError::MissingTransition {
                    from: from.clone(),
                    symbol: symbol.clone(),
                });
            }
        }
    }
}

fn check_reachability<S: Label, Y: Label>(
    builder: &DfaBuilder<S, Y>,
    errors: &mut ValidationErrors<S, Y>,
) {
    // without an initial state there is nothing to explore from, which is reported elsewhere
    let Some(initial) = builder.initial.as_ref() else {
        return;
    };
    let reachable: Set<&S> = ReachableStates::new(&builder.transitions, initial).collect();
    trace!(
        "{} of {} states are reachable from {initial:?}",
        reachable.len(),
        builder.states.len()
    );

    if builder.policy.requires_all_reachable() {
        errors.extend(
            builder
                .states
                .iter()
                .filter(|q| !reachable.contains(q))
                .map(|q| BuildError::UnreachableState(q.clone())),
        );
    }
    if builder.policy.requires_reachable_accepting()
        && !builder.accepting.iter().any(|q| reachable.contains(q))
    {
        errors.push(BuildError::NoReachableAcceptingState);
    }
}

/// Runs every check that the policy of `builder` enables and collects all problems, without
/// constructing an automaton.
pub fn problems<S: Label, Y: Label>(builder: &DfaBuilder<S, Y>) -> ValidationErrors<S, Y> {
    let mut errors = ValidationErrors::new();
    for check in Check::enabled_by(builder.policy) {
        check.run(builder, &mut errors);
    }
    errors
}

/// Validates `builder` and, if all checks pass, copies its definition into a new [`Dfa`].
pub(crate) fn validate<S: Label, Y: Label>(
    builder: &DfaBuilder<S, Y>,
) -> Result<Dfa<S, Y>, ValidationErrors<S, Y>> {
    let errors = problems(builder);
    match builder.initial.clone() {
        Some(initial) if errors.is_empty() => {
            debug!(
                "built automaton with {} states, {} symbols and {} transitions",
                builder.states.len(),
                builder.symbols.len(),
                builder.transition_count()
            );
            Ok(Dfa::new(
                initial,
                builder.states.clone(),
                builder.symbols.clone(),
                builder.accepting.clone(),
                builder.transitions.clone(),
            ))
        }
        _ => {
            debug!("validation failed with {} problem(s)", errors.len());
            Err(errors)
        }
    }
}
