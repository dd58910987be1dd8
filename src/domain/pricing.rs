use serde::{Deserialize, Serialize};

use super::{Amount, Priority, ServiceHours, ServiceUnits};

/// Job length, in hours, that a provider's hourly rate is calibrated to.
/// Prices scale linearly from this reference.
pub const REFERENCE_HOURS: f64 = 3.0;

/// Price of a booking.
///
/// `rate * units * multiplier * (hours / 3)`, evaluated left to right.
/// The result is not rounded.
pub fn quote_price(
    hourly_rate: Amount,
    units: ServiceUnits,
    priority: Priority,
    hours: ServiceHours,
) -> Amount {
    hourly_rate
        * f64::from(units.get())
        * priority.multiplier()
        * (f64::from(hours.get()) / REFERENCE_HOURS)
}

/// Line items shown next to the booking form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_rate: Amount,
    pub hours: ServiceHours,
    pub units: ServiceUnits,
    pub priority: Priority,
    pub multiplier: f64,
    pub total: Amount,
}

impl PriceBreakdown {
    pub fn new(
        base_rate: Amount,
        units: ServiceUnits,
        priority: Priority,
        hours: ServiceHours,
    ) -> Self {
        Self {
            base_rate,
            hours,
            units,
            priority,
            multiplier: priority.multiplier(),
            total: quote_price(base_rate, units, priority, hours),
        }
    }
}
