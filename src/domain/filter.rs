use serde::{Deserialize, Serialize};

use super::{Amount, Booking, BookingStatus, ServiceProvider};

/// Bounds of the provider browser's price slider.
pub const PRICE_SLIDER_MIN: Amount = 0.0;
pub const PRICE_SLIDER_MAX: Amount = 250.0;

/// Bounds of the minimum-rating slider.
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

/// Either every category or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategorySelector {
    #[default]
    All,
    Only(String),
}

impl CategorySelector {
    /// "All" (any case) selects everything, anything else is an exact category.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            CategorySelector::All
        } else {
            CategorySelector::Only(value.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Only(selected) => selected == category,
        }
    }
}

impl std::fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategorySelector::All => write!(f, "All"),
            CategorySelector::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Filter applied by the provider browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderFilter {
    pub category: CategorySelector,
    /// Inclusive lower bound on the hourly rate
    pub min_price: Amount,
    /// Inclusive upper bound on the hourly rate
    pub max_price: Amount,
    /// Inclusive minimum rating
    pub min_rating: f64,
}

impl Default for ProviderFilter {
    fn default() -> Self {
        Self {
            category: CategorySelector::All,
            min_price: PRICE_SLIDER_MIN,
            max_price: PRICE_SLIDER_MAX,
            min_rating: RATING_MIN,
        }
    }
}

impl ProviderFilter {
    pub fn matches(&self, provider: &ServiceProvider) -> bool {
        self.category.matches(&provider.category)
            && self.min_price <= provider.hourly_rate
            && provider.hourly_rate <= self.max_price
            && provider.rating >= self.min_rating
    }

    /// Matching providers in catalog order.
    pub fn apply<'a>(&self, catalog: &'a [ServiceProvider]) -> Vec<&'a ServiceProvider> {
        catalog.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Status filter of the bookings view. `None` shows every booking.
pub fn filter_by_status(bookings: &[Booking], status: Option<BookingStatus>) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| status.is_none_or(|s| b.status == s))
        .collect()
}
