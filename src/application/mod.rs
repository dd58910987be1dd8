// Application layer - use cases and report assembly.
// Every view talks to the session through `BookingService`.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
