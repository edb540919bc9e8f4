//! Library for building and running deterministic finite automata (DFA) in Rust.
//!
//! A DFA consists of a finite set of states $Q$, an input alphabet, a designated initial state $q_0$, a set of accepting states $F \subseteq Q$ and a (possibly partial) transition function $\delta$ that maps each pair of state and symbol to at most one successor state. States and symbols can be of any type that implements [`Label`], which is the case for everything that is `Clone + Eq + Hash + Debug`.
//!
//! Working with the crate happens in three phases:
//! - A [`DfaBuilder`] accumulates states, symbols, accepting states, the initial state and transitions. Calls can happen in any order, registering a transition implicitly registers its endpoints and its symbol.
//! - [`DfaBuilder::build`] runs all structural checks at once. Which of the optional checks are performed is decided by the [`ValidationPolicy`] that the builder was created with. If anything is wrong, all problems are reported together in a [`ValidationErrors`], otherwise an immutable [`Dfa`] is returned.
//! - A [`Dfa`] can evaluate whole inputs through [`Dfa::evaluate`] and [`Dfa::evaluate_accepting`] or it can be stepped through symbol by symbol with a [`Runner`] obtained from [`Dfa::start`]. Any number of runners may operate on the same automaton concurrently.
//!
//! ```
//! use fsm::prelude::*;
//!
//! let dfa = DfaBuilder::new()
//!     .with_initial("even")
//!     .with_states([("even", true), ("odd", false)])
//!     .with_transitions([("even", 'a', "odd"), ("odd", 'a', "even")])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dfa.evaluate("aaa".chars()), Ok("odd"));
//! assert_eq!(dfa.evaluate_accepting("aa".chars()), Ok(true));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use fsm::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        builder::DfaBuilder,
        dfa::Dfa,
        error::{BuildError, TransitionError, ValidationErrors},
        math::{Map, Set},
        policy::ValidationPolicy,
        reachable::ReachableStates,
        runner::Runner,
        Label,
    };
}

/// Type aliases for the set and map types used throughout the crate.
pub mod math;

/// Errors that can occur while validating or running an automaton.
pub mod error;
pub use error::{BuildError, TransitionError, ValidationErrors};

/// Flags that decide which optional checks are run when a builder is turned into an automaton.
pub mod policy;
pub use policy::ValidationPolicy;

/// Incremental definition of an automaton.
pub mod builder;
pub use builder::DfaBuilder;

/// The structural checks that certify a builder before it is turned into a [`Dfa`].
pub mod validation;

/// Breadth-first exploration of the states reachable from some origin.
pub mod reachable;

/// The immutable, validated automaton.
pub mod dfa;
pub use dfa::Dfa;

/// Stepwise execution of a [`Dfa`].
pub mod runner;
pub use runner::Runner;

/// A recognizer that computes the remainder of a binary number modulo three.
pub mod mod_three;

use std::{fmt::Debug, hash::Hash};

/// A label is anything that can be used to identify a state or a symbol of an automaton.
/// Labels are compared by equality, stored in hash based collections and rendered through
/// their [`Debug`] representation in error messages and transition tables.
pub trait Label: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Label for T {}
