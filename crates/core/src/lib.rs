//! Position and state engine for the live departures map.
//!
//! Every refresh the backend hands over a [`Snapshot`]: stations with their
//! departure boards and runs with a cursor into their stop events. From that
//! alone, with no memory of earlier refreshes beyond the caller's
//! [`CursorLedger`], the engine works out
//!
//! - where each vehicle is and which way it faces ([`position`]),
//! - which phase of its journey it is in ([`phase`]) and how late it is ([`delay`]),
//! - what each station board shows ([`board`]),
//! - and the share of departures running to time ([`punctuality`]).
//!
//! [`MapFrame::compute`] runs all of it for one snapshot.

pub mod board;
pub mod cursor;
pub mod delay;
pub mod departure;
pub mod frame;
pub mod options;
pub mod phase;
pub mod position;
pub mod punctuality;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

pub use cursor::CursorLedger;
pub use frame::MapFrame;
pub use options::EngineOptions;
pub use snapshot::{Snapshot, SnapshotParts};

// Re-export the transit model
pub use railwatch_transit as transit;
