//! Event classification, context precedence, and callback dispatch

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::Symbol;
use crate::context::Context;
use crate::events::RawEvent;
use crate::mapped::MappedInput;

/// Callback signature invoked during [`Mapper::dispatch`]
///
/// Callbacks are owned by the mapper and may consume entries from the shared
/// frame snapshot to stop lower-priority callbacks from observing them.
pub type Callback<A, S, R> = Box<dyn FnMut(&mut MappedInput<A, S, R>)>;

struct CallbackEntry<A, S, R> {
    priority: u32,
    callback: Callback<A, S, R>,
}

/// Translates raw device events into semantic input and distributes it
///
/// Owns a registry of named [`Context`]s, a LIFO stack of active contexts
/// (most recently pushed wins), the current tick's [`MappedInput`]
/// accumulator, and a priority-ordered list of callbacks.
///
/// The per-tick protocol is: deliver all raw events through
/// [`handle_button`](Mapper::handle_button) / [`handle_axis`](Mapper::handle_axis),
/// call [`dispatch`](Mapper::dispatch) exactly once, then
/// [`tick_reset`](Mapper::tick_reset).
pub struct Mapper<A, S, R> {
    contexts: HashMap<String, Context<A, S, R>>,
    /// Active context names, last entry is the top of the stack
    active: Vec<String>,
    /// Sorted ascending by priority; ties keep registration order
    callbacks: Vec<CallbackEntry<A, S, R>>,
    current: MappedInput<A, S, R>,
}

impl<A, S, R> Mapper<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    /// Creates a mapper with no contexts and no callbacks
    pub fn new() -> Self {
        Self {
            contexts: HashMap::new(),
            active: Vec::new(),
            callbacks: Vec::new(),
            current: MappedInput::new(),
        }
    }

    /// Registers `context` under `name`, replacing any previous registration
    ///
    /// Re-registering a name that is currently on the active stack takes
    /// effect immediately: classification always resolves names through the
    /// registry.
    pub fn register_context(&mut self, name: impl Into<String>, context: Context<A, S, R>) {
        let name = name.into();
        debug!(context = %name, "registered context");
        self.contexts.insert(name, context);
    }

    /// Pushes the named context onto the top of the active stack
    ///
    /// An unknown name is ignored, so switching to an undefined context never
    /// disturbs the frame loop.
    pub fn push_context(&mut self, name: &str) {
        if self.contexts.contains_key(name) {
            debug!(context = name, "pushed context");
            self.active.push(name.to_string());
        } else {
            debug!(context = name, "push ignored, context not registered");
        }
    }

    /// Pops the top of the active stack
    ///
    /// Popping an empty stack is a no-op.
    pub fn pop_context(&mut self) {
        if let Some(name) = self.active.pop() {
            debug!(context = %name, "popped context");
        }
    }

    /// Classifies a button transition into the accumulator
    ///
    /// A rising edge resolves an action; a held press resolves a state; a
    /// release (or a press no active context claims) runs a consume pass so
    /// released keys never linger in the accumulator.
    pub fn handle_button(&mut self, code: u32, pressed: bool, was_pressed: bool) {
        if pressed && !was_pressed {
            if let Some(action) = self.resolve_action(code) {
                self.current.actions.insert(action);
                return;
            }
        } else if pressed {
            if let Some(state) = self.resolve_state(code) {
                self.current.states.insert(state);
                return;
            }
        }

        self.consume_bindings(code);
    }

    /// Classifies an axis sample into the accumulator
    ///
    /// The first active context binding a range to `code` wins; its
    /// sensitivity and converter produce the stored value, overwriting any
    /// value recorded for that range earlier in the tick.
    pub fn handle_axis(&mut self, code: u32, value: f32) {
        let mut mapped = None;
        for context in self.stack() {
            if let Some(range) = context.range(code) {
                let scaled = value * context.sensitivity(range);
                mapped = Some((range, context.converter().convert(range, scaled)));
                break;
            }
        }

        if let Some((range, converted)) = mapped {
            self.current.ranges.insert(range, converted);
        }
    }

    /// Classifies a raw event by kind
    pub fn handle(&mut self, event: RawEvent) {
        match event {
            RawEvent::Button {
                code,
                pressed,
                was_pressed,
            } => self.handle_button(code, pressed, was_pressed),
            RawEvent::Axis { code, value } => self.handle_axis(code, value),
        }
    }

    /// Registers a callback at `priority`
    ///
    /// Lower priorities run earlier. Callbacks sharing a priority run in
    /// registration order.
    pub fn register_callback<F>(&mut self, priority: u32, callback: F)
    where
        F: FnMut(&mut MappedInput<A, S, R>) + 'static,
    {
        self.callbacks.push(CallbackEntry {
            priority,
            callback: Box::new(callback),
        });
        // Stable sort keeps registration order within a priority
        self.callbacks.sort_by_key(|entry| entry.priority);
    }

    /// Runs every callback against a snapshot of the current accumulator
    ///
    /// All callbacks see the same mutable snapshot, so an early callback may
    /// consume an entry to hide it from the callbacks that follow. The live
    /// accumulator is unaffected by consumption.
    pub fn dispatch(&mut self) {
        trace!(
            actions = self.current.actions.len(),
            states = self.current.states.len(),
            ranges = self.current.ranges.len(),
            "dispatching tick input"
        );

        let mut frame = self.current.clone();
        for entry in &mut self.callbacks {
            (entry.callback)(&mut frame);
        }
    }

    /// Clears the accumulator's actions and ranges for the next tick
    ///
    /// Held states are intentionally retained: a state leaves the accumulator
    /// only when the release of its key runs the consume pass. A key held
    /// across a context switch can therefore keep its state entry until it is
    /// released.
    pub fn tick_reset(&mut self) {
        self.current.actions.clear();
        self.current.ranges.clear();
    }

    /// Returns the current tick's accumulator
    pub fn current(&self) -> &MappedInput<A, S, R> {
        &self.current
    }

    /// Returns the number of registered contexts
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Returns the depth of the active context stack
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Active contexts from highest to lowest precedence
    fn stack(&self) -> impl Iterator<Item = &Context<A, S, R>> {
        self.active
            .iter()
            .rev()
            .filter_map(|name| self.contexts.get(name))
    }

    fn resolve_action(&self, code: u32) -> Option<A> {
        self.stack().find_map(|context| context.action(code))
    }

    fn resolve_state(&self, code: u32) -> Option<S> {
        self.stack().find_map(|context| context.state(code))
    }

    /// Removes whatever action and state `code` resolves to from the accumulator
    fn consume_bindings(&mut self, code: u32) {
        if let Some(action) = self.resolve_action(code) {
            self.current.consume_action(action);
        }
        if let Some(state) = self.resolve_state(code) {
            self.current.consume_state(state);
        }
    }
}

impl<A, S, R> Default for Mapper<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    fn default() -> Self {
        Self::new()
    }
}
