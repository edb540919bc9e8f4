use std::collections::VecDeque;

use crate::{
    math::{Map, Set},
    Label,
};

/// Iterates over all states that can be reached from a given origin by following zero or more
/// transitions. States are produced in breadth-first order, every state is produced exactly once
/// and the origin always comes first. The order among states at the same distance from the
/// origin is unspecified.
#[derive(Debug, Clone)]
pub struct ReachableStates<'a, S, Y> {
    transitions: &'a Map<S, Map<Y, S>>,
    seen: Set<&'a S>,
    queue: VecDeque<&'a S>,
}

impl<'a, S: Label, Y: Label> ReachableStates<'a, S, Y> {
    /// Starts the exploration of `transitions`, which maps each state to its outgoing
    /// transitions, at `origin`.
    pub fn new(transitions: &'a Map<S, Map<Y, S>>, origin: &'a S) -> Self {
        Self {
            transitions,
            seen: Set::from_iter([origin]),
            queue: VecDeque::from([origin]),
        }
    }
}

impl<'a, S: Label, Y: Label> Iterator for ReachableStates<'a, S, Y> {
    type Item = &'a S;

    fn next(&mut self) -> Option<Self::Item> {
        let q = self.queue.pop_front()?;
        if let Some(row) = self.transitions.get(q) {
            for p in row.values() {
                if self.seen.insert(p) {
                    self.queue.push_back(p);
                }
            }
        }
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::ReachableStates;
    use crate::math::Map;

    fn table(edges: &[(u32, char, u32)]) -> Map<u32, Map<char, u32>> {
        let mut out: Map<u32, Map<char, u32>> = Map::default();
        for &(p, a, q) in edges {
            out.entry(p).or_default().insert(a, q);
        }
        out
    }

    #[test]
    fn reachable_states() {
        let transitions = table(&[
            (0, 'a', 1),
            (0, 'b', 0),
            (1, 'a', 2),
            (1, 'b', 0),
            (2, 'a', 2),
            (2, 'b', 2),
            (3, 'a', 0),
        ]);

        let from_zero = ReachableStates::new(&transitions, &0).collect_vec();
        assert_eq!(from_zero, vec![&0, &1, &2]);

        let from_two = ReachableStates::new(&transitions, &2).collect_vec();
        assert_eq!(from_two, vec![&2]);

        let from_three = ReachableStates::new(&transitions, &3)
            .copied()
            .sorted()
            .collect_vec();
        assert_eq!(from_three, vec![0, 1, 2, 3]);
    }

    #[test]
    fn origin_without_outgoing_transitions() {
        let transitions = table(&[(0, 'a', 1)]);
        assert_eq!(ReachableStates::new(&transitions, &7).count(), 1);
        assert_eq!(ReachableStates::new(&transitions, &1).count(), 1);
    }
}
