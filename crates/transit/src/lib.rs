//! # railwatch-transit
//!
//! Transit model for the live departures map.
//!
//! ## Features
//!
//! - **Lenient decoding**: wire records are converted one entity at a time, so a
//!   malformed station or run is skipped without losing the rest of the snapshot
//! - **Runs with a caller-owned cursor**: the cursor is validated, never advanced
//! - **Display directories**: route, direction and stop names
//! - **Pluggable networking**: implement [`FeedFetcher`] to talk to a backend
//!
//! ## Example
//!
//! ```
//! use railwatch_transit::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let scheduled = Utc.with_ymd_and_hms(2019, 4, 1, 8, 20, 0).unwrap();
//! let event = StopEvent::new(
//!     StationIdentifier::new("1071"),
//!     RouteIdentifier::new("6"),
//!     DirectionIdentifier::new("1"),
//!     RunIdentifier::new("948"),
//!     scheduled,
//! );
//!
//! let run = Run::new(
//!     RunIdentifier::new("948"),
//!     DirectionIdentifier::new("1"),
//!     vec![event],
//!     0,
//!     None,
//!     lat_lng(-37.8183, 144.9671),
//! )
//! .unwrap();
//!
//! assert_eq!(run.current_event().authoritative(), scheduled);
//! ```

pub mod identifiers;
pub mod models;
pub mod network;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{
        directory::{RouteDirectory, StopDirectory},
        run::{Run, Station},
        types::*,
    };
    pub use crate::network::traits::*;
    pub use crate::spatial::{lat_lng, to_lat_lng};
}

pub use prelude::*;
