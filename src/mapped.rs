//! Per-tick accumulator of classified input

use std::collections::{BTreeMap, BTreeSet};

use crate::Symbol;

/// The semantic input produced by one tick of classification
///
/// Actions fire once on activation, states are present every tick while held,
/// and ranges carry the latest converted value seen this tick. During dispatch
/// every callback receives the same snapshot; consuming an entry hides it from
/// the callbacks that run later in the same pass.
#[derive(Debug, Clone)]
pub struct MappedInput<A, S, R> {
    pub actions: BTreeSet<A>,
    pub states: BTreeSet<S>,
    pub ranges: BTreeMap<R, f32>,
}

impl<A, S, R> MappedInput<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self {
            actions: BTreeSet::new(),
            states: BTreeSet::new(),
            ranges: BTreeMap::new(),
        }
    }

    /// Removes `action` from the accumulator
    ///
    /// Removing an absent entry is a no-op.
    pub fn consume_action(&mut self, action: A) {
        self.actions.remove(&action);
    }

    /// Removes `state` from the accumulator
    pub fn consume_state(&mut self, state: S) {
        self.states.remove(&state);
    }

    /// Removes `range` and its value from the accumulator
    pub fn consume_range(&mut self, range: R) {
        self.ranges.remove(&range);
    }

    /// Returns the current value for `range`, if one was produced this tick
    pub fn range(&self, range: R) -> Option<f32> {
        self.ranges.get(&range).copied()
    }

    /// Returns true if no actions, states, or ranges are present
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.states.is_empty() && self.ranges.is_empty()
    }
}

impl<A, S, R> Default for MappedInput<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Action {
        Jump,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum State {
        Run,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Range {
        MoveX,
    }

    fn populated() -> MappedInput<Action, State, Range> {
        let mut input = MappedInput::new();
        input.actions.insert(Action::Jump);
        input.states.insert(State::Run);
        input.ranges.insert(Range::MoveX, 0.5);
        input
    }

    #[test]
    fn test_consume_removes_entries() {
        let mut input = populated();

        input.consume_action(Action::Jump);
        input.consume_state(State::Run);
        input.consume_range(Range::MoveX);

        assert!(input.is_empty());
    }

    #[test]
    fn test_consume_is_idempotent() {
        let mut input = populated();

        input.consume_action(Action::Jump);
        input.consume_action(Action::Jump);
        input.consume_state(State::Run);
        input.consume_state(State::Run);
        input.consume_range(Range::MoveX);
        input.consume_range(Range::MoveX);

        assert!(input.is_empty());
    }

    #[test]
    fn test_consume_absent_entry_is_noop() {
        let mut input: MappedInput<Action, State, Range> = MappedInput::new();
        input.consume_action(Action::Jump);
        input.consume_state(State::Run);
        input.consume_range(Range::MoveX);
        assert!(input.is_empty());
    }

    #[test]
    fn test_range_lookup() {
        let input = populated();
        assert_eq!(input.range(Range::MoveX), Some(0.5));

        let empty: MappedInput<Action, State, Range> = MappedInput::new();
        assert_eq!(empty.range(Range::MoveX), None);
    }
}
