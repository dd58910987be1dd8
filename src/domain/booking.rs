use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{Amount, ServiceProvider, quote_price};

pub type BookingId = u32;

/// Urgency tier of a booking. Drives the price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Standard,
    Priority,
    Emergency,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Standard, Priority::Priority, Priority::Emergency];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Standard => "Standard",
            Priority::Priority => "Priority",
            Priority::Emergency => "Emergency",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Priority::Standard => 1.0,
            Priority::Priority => 1.5,
            Priority::Emergency => 2.0,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Priority::Standard),
            "priority" => Ok(Priority::Priority),
            "emergency" => Ok(Priority::Emergency),
            _ => Err(ParseFieldError::Priority(s.to_string())),
        }
    }
}

/// Lifecycle state of a booking.
///
/// Bookings start `Confirmed` and the only transition is to `Cancelled`.
/// `Completed` is part of the vocabulary (the bookings view can filter on it)
/// but no operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(ParseFieldError::Status(s.to_string())),
        }
    }
}

/// Length of a booked job in hours. Only a fixed set of lengths is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ServiceHours(u8);

impl ServiceHours {
    pub const ALLOWED: [u8; 6] = [1, 2, 3, 4, 6, 8];

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for ServiceHours {
    fn default() -> Self {
        ServiceHours(3)
    }
}

impl TryFrom<u8> for ServiceHours {
    type Error = ParseFieldError;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&hours) {
            Ok(ServiceHours(hours))
        } else {
            Err(ParseFieldError::Hours(hours))
        }
    }
}

impl From<ServiceHours> for u8 {
    fn from(hours: ServiceHours) -> Self {
        hours.0
    }
}

/// Number of parallel service units (crews, technicians) requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ServiceUnits(u8);

impl ServiceUnits {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for ServiceUnits {
    fn default() -> Self {
        ServiceUnits(1)
    }
}

impl TryFrom<u8> for ServiceUnits {
    type Error = ParseFieldError;

    fn try_from(units: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&units) {
            Ok(ServiceUnits(units))
        } else {
            Err(ParseFieldError::Units(units))
        }
    }
}

impl From<ServiceUnits> for u8 {
    fn from(units: ServiceUnits) -> Self {
        units.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFieldError {
    Priority(String),
    Status(String),
    Hours(u8),
    Units(u8),
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFieldError::Priority(value) => write!(
                f,
                "invalid priority '{}' (expected standard, priority or emergency)",
                value
            ),
            ParseFieldError::Status(value) => write!(
                f,
                "invalid status '{}' (expected confirmed, cancelled or completed)",
                value
            ),
            ParseFieldError::Hours(value) => {
                write!(f, "invalid duration {}h (expected one of 1, 2, 3, 4, 6, 8)", value)
            }
            ParseFieldError::Units(value) => write!(
                f,
                "invalid number of service units {} (expected {} to {})",
                value,
                ServiceUnits::MIN,
                ServiceUnits::MAX
            ),
        }
    }
}

impl std::error::Error for ParseFieldError {}

/// A booked service appointment.
///
/// The provider fields are copied at booking time, so a booking still renders
/// correctly even if it no longer matches anything in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer_name: String,
    pub provider_name: String,
    pub provider_category: String,
    pub service_area: String,
    /// Provider rate at the time of booking
    pub hourly_rate: Amount,
    pub service_date: NaiveDate,
    pub duration_hours: ServiceHours,
    pub units: ServiceUnits,
    pub priority: Priority,
    /// Computed once at creation, never recomputed
    pub total_price: Amount,
    pub status: BookingStatus,
    /// Creation time, truncated to the minute
    pub created_at: NaiveDateTime,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookingId,
        customer_name: String,
        provider: &ServiceProvider,
        service_date: NaiveDate,
        duration_hours: ServiceHours,
        units: ServiceUnits,
        priority: Priority,
        created_at: NaiveDateTime,
    ) -> Self {
        let total_price = quote_price(provider.hourly_rate, units, priority, duration_hours);
        Self {
            id,
            customer_name,
            provider_name: provider.name.clone(),
            provider_category: provider.category.clone(),
            service_area: provider.service_area.clone(),
            hourly_rate: provider.hourly_rate,
            service_date,
            duration_hours,
            units,
            priority,
            total_price,
            status: BookingStatus::Confirmed,
            created_at: truncate_to_minute(created_at),
        }
    }

    /// Creation time as shown to users (`YYYY-MM-DD HH:MM`)
    pub fn created_at_label(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}
