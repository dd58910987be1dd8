mod analytics;
mod booking;
mod filter;
mod money;
mod pricing;
mod provider;

pub use analytics::*;
pub use booking::*;
pub use filter::*;
pub use money::*;
pub use pricing::*;
pub use provider::*;
