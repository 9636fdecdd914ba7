//! Context-sensitive input remapping
//!
//! Translates raw device events (opaque button and axis codes) into a
//! semantic vocabulary of actions, states, and ranges, then distributes that
//! vocabulary once per tick to prioritized callbacks that may consume entries
//! to stop propagation:
//! - Actions are edge-triggered: they fire once when a button goes down.
//! - States are level-triggered: they are present every tick while held.
//! - Ranges are continuous values, scaled and remapped per context.
//!
//! # Architecture
//!
//! ```text
//! Raw events (host loop / InputCollector)
//!         ↓
//!      Mapper ── classifies via active Contexts (top of stack first)
//!         ↓
//!    MappedInput accumulator
//!         ↓
//!    dispatch() ── callbacks by priority; consume() stops propagation
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut context = Context::new();
//! context.bind_action(key_code(KeyCode::Space).unwrap(), Action::Jump);
//!
//! let mut mapper = Mapper::new();
//! mapper.register_context("gameplay", context);
//! mapper.push_context("gameplay");
//! mapper.register_callback(0, |input| {
//!     if input.actions.contains(&Action::Jump) {
//!         input.consume_action(Action::Jump);
//!     }
//! });
//!
//! // Each tick, after event delivery:
//! collector.flush_into(&mut mapper);
//! mapper.dispatch();
//! mapper.tick_reset();
//! ```

/// Raw input collection from winit events
pub mod collector;

/// Declarative binding profiles loaded from files and the environment
pub mod config;

/// Named binding tables from raw codes to semantic symbols
pub mod context;

/// Raw device events and stable adapter codes
pub mod events;

/// The per-tick accumulator passed to callbacks
pub mod mapped;

/// Classification, context precedence, and dispatch
pub mod mapper;

/// Piecewise-linear value remapping
pub mod range;

pub use collector::InputCollector;
pub use config::{MapperProfile, ProfileError};
pub use context::Context;
pub use events::RawEvent;
pub use mapped::MappedInput;
pub use mapper::Mapper;
pub use range::RangeConverter;

use std::fmt::Debug;

/// Marker for types usable as action, state, or range symbols
///
/// Satisfied by any small copyable, totally ordered type, typically a
/// fieldless enum or an integer. Implemented automatically.
pub trait Symbol: Copy + Ord + Debug {}

impl<T: Copy + Ord + Debug> Symbol for T {}
