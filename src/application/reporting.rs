use serde::{Deserialize, Serialize};

use crate::domain::{
    Amount, CategoryStats, DailyCount, PriceBreakdown, PriorityCount, ProviderCount,
    ProviderRevenue, RateBin, ServiceProvider,
};

/// Number of buckets in the dashboard's rate histogram.
pub const RATE_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub total_bookings: usize,
    pub total_revenue: Amount,
    pub provider_count: usize,
    pub average_rating: f64,
    /// Empty until the first booking is made
    pub popular_providers: Vec<ProviderCount>,
    pub rate_histogram: Vec<RateBin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// `None` while the session has no bookings
    pub booking_activity: Option<BookingActivity>,
    pub providers: Vec<ServiceProvider>,
    pub category_stats: Vec<CategoryStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingActivity {
    pub revenue_by_provider: Vec<ProviderRevenue>,
    pub bookings_by_priority: Vec<PriorityCount>,
    pub daily_trend: Vec<DailyCount>,
}

/// What the booking form shows before submitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingQuote {
    pub provider: ServiceProvider,
    pub breakdown: PriceBreakdown,
}
