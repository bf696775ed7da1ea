//! Transit data models, types, and conversions.

pub mod directory;
pub mod run;
pub mod types;
pub mod wire;

// Re-exports for convenience
pub use directory::{RouteDirectory, StopDirectory};
pub use run::{Run, Station};
pub use types::{Result, StopEvent, TransitError};
