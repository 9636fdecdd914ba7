//! Named binding tables from raw device codes to semantic symbols

use std::collections::{BTreeMap, HashMap};

use crate::Symbol;
use crate::range::RangeConverter;

/// A declarative binding layer from raw device codes to actions, states, and ranges
///
/// A single code may appear in more than one table at once; which table applies
/// is decided by the kind of event being classified, not by the code alone.
/// Contexts are authored once, registered into a [`Mapper`](crate::Mapper) by
/// name, and copied by value; after registration they change only through
/// re-registration under the same name.
#[derive(Debug, Clone)]
pub struct Context<A, S, R> {
    actions: HashMap<u32, A>,
    states: HashMap<u32, S>,
    ranges: HashMap<u32, R>,
    sensitivities: BTreeMap<R, f32>,
    converter: RangeConverter<R>,
}

impl<A, S, R> Context<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    /// Creates an empty context
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            states: HashMap::new(),
            ranges: HashMap::new(),
            sensitivities: BTreeMap::new(),
            converter: RangeConverter::new(),
        }
    }

    /// Binds a button code to an edge-triggered action
    ///
    /// Later calls for the same code overwrite the earlier binding.
    pub fn bind_action(&mut self, code: u32, action: A) {
        self.actions.insert(code, action);
    }

    /// Binds a button code to a level-triggered state
    pub fn bind_state(&mut self, code: u32, state: S) {
        self.states.insert(code, state);
    }

    /// Binds an axis code to a continuous range
    pub fn bind_range(&mut self, code: u32, range: R) {
        self.ranges.insert(code, range);
    }

    /// Sets the sensitivity factor applied to raw values for `range`
    pub fn set_sensitivity(&mut self, range: R, factor: f32) {
        self.sensitivities.insert(range, factor);
    }

    /// Attaches a range converter, replacing any previous one
    pub fn set_converter(&mut self, converter: RangeConverter<R>) {
        self.converter = converter;
    }

    /// Looks up the action bound to `code`
    ///
    /// `None` means this context does not claim the code.
    pub fn action(&self, code: u32) -> Option<A> {
        self.actions.get(&code).copied()
    }

    /// Looks up the state bound to `code`
    pub fn state(&self, code: u32) -> Option<S> {
        self.states.get(&code).copied()
    }

    /// Looks up the range bound to `code`
    pub fn range(&self, code: u32) -> Option<R> {
        self.ranges.get(&code).copied()
    }

    /// Returns the sensitivity factor for `range`, defaulting to 1.0
    pub fn sensitivity(&self, range: R) -> f32 {
        self.sensitivities.get(&range).copied().unwrap_or(1.0)
    }

    /// Returns the attached range converter
    pub fn converter(&self) -> &RangeConverter<R> {
        &self.converter
    }
}

impl<A, S, R> Default for Context<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    fn default() -> Self {
        Self::new()
    }
}
