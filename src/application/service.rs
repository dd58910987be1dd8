use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::domain::{
    Booking, BookingId, BookingStatus, CategorySelector, PriceBreakdown, Priority,
    ProviderFilter, ServiceHours, ServiceProvider, ServiceUnits, average_rating,
    category_stats, count_by_priority, count_by_provider, daily_trend, distinct_categories,
    filter_by_status, rate_histogram, revenue_by_provider, total_revenue,
};
use crate::storage::{SessionId, SessionStore};

use super::{
    AnalyticsReport, AppError, BookingActivity, BookingQuote, DashboardReport,
    RATE_HISTOGRAM_BINS,
};

/// Application service providing every operation the views need.
/// Owns the session state; views only ever go through here.
pub struct BookingService {
    store: SessionStore,
}

/// Input of the booking form.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub customer_name: String,
    /// Falls back to the selected provider, then to the first in the catalog
    pub provider_name: Option<String>,
    pub service_date: NaiveDate,
    pub duration_hours: ServiceHours,
    pub units: ServiceUnits,
    pub priority: Priority,
}

impl BookingRequest {
    /// A request with the form's default values.
    pub fn new(customer_name: impl Into<String>, service_date: NaiveDate) -> Self {
        Self {
            customer_name: customer_name.into(),
            provider_name: None,
            service_date,
            duration_hours: ServiceHours::default(),
            units: ServiceUnits::default(),
            priority: Priority::default(),
        }
    }

    pub fn with_provider(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    pub fn with_hours(mut self, hours: ServiceHours) -> Self {
        self.duration_hours = hours;
        self
    }

    pub fn with_units(mut self, units: ServiceUnits) -> Self {
        self.units = units;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

impl BookingService {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Start a session over a custom catalog.
    pub fn with_catalog(catalog: Vec<ServiceProvider>) -> Result<Self, AppError> {
        Ok(Self::new(SessionStore::with_catalog(catalog)?))
    }

    /// Start a fresh session with the seeded catalog.
    pub fn start() -> Self {
        let store = SessionStore::new();
        info!(session = %store.id(), providers = store.catalog().len(), "session started");
        Self::new(store)
    }

    pub fn session_id(&self) -> SessionId {
        self.store.id()
    }

    pub fn catalog(&self) -> &[ServiceProvider] {
        self.store.catalog()
    }

    pub fn bookings(&self) -> &[Booking] {
        self.store.bookings()
    }

    // ========================
    // Provider operations
    // ========================

    /// Get a provider by name.
    pub fn get_provider(&self, name: &str) -> Result<&ServiceProvider, AppError> {
        self.store
            .catalog()
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AppError::ProviderNotFound(name.to_string()))
    }

    /// Provider the booking form starts on: the selected one if any,
    /// otherwise the first in the catalog.
    pub fn default_provider(&self) -> &ServiceProvider {
        self.selected_provider()
            .unwrap_or_else(|| &self.store.catalog()[0])
    }

    pub fn selected_provider(&self) -> Option<&ServiceProvider> {
        let name = self.store.selected_provider()?;
        self.store.catalog().iter().find(|p| p.name == name)
    }

    /// Remember a provider picked in the browser for the next booking.
    pub fn select_provider(&mut self, name: &str) -> Result<&ServiceProvider, AppError> {
        let provider_name = self
            .get_provider(name)
            .inspect_err(|_| {
                warn!(session = %self.store.id(), provider = name, "selection rejected: unknown provider")
            })?
            .name
            .clone();
        info!(session = %self.store.id(), provider = %provider_name, "provider selected");
        self.store.set_selected_provider(provider_name);
        self.get_provider(name)
    }

    pub fn categories(&self) -> Vec<&str> {
        distinct_categories(self.store.catalog())
    }

    /// Providers matching the browser filter, in catalog order.
    pub fn browse_providers(
        &self,
        filter: &ProviderFilter,
    ) -> Result<Vec<&ServiceProvider>, AppError> {
        if let CategorySelector::Only(category) = &filter.category {
            let categories = self.categories();
            if !categories.contains(&category.as_str()) {
                warn!(session = %self.store.id(), %category, "filter rejected: unknown category");
                return Err(AppError::UnknownCategory {
                    category: category.clone(),
                    valid: categories.into_iter().map(String::from).collect(),
                });
            }
        }

        let providers = filter.apply(self.store.catalog());
        debug!(
            session = %self.store.id(),
            matched = providers.len(),
            ?filter,
            "providers filtered"
        );
        Ok(providers)
    }

    // ========================
    // Booking operations
    // ========================

    fn resolve_provider(&self, name: Option<&str>) -> Result<&ServiceProvider, AppError> {
        match name {
            Some(name) => self.get_provider(name),
            None => Ok(self.default_provider()),
        }
    }

    /// Provider card and price breakdown for a form that has not been
    /// submitted yet.
    pub fn quote(&self, request: &BookingRequest) -> Result<BookingQuote, AppError> {
        let provider = self.resolve_provider(request.provider_name.as_deref())?;
        Ok(BookingQuote {
            provider: provider.clone(),
            breakdown: PriceBreakdown::new(
                provider.hourly_rate,
                request.units,
                request.priority,
                request.duration_hours,
            ),
        })
    }

    /// Submit the booking form. `now` is the local time of submission.
    pub fn create_booking(
        &mut self,
        request: BookingRequest,
        now: NaiveDateTime,
    ) -> Result<Booking, AppError> {
        if request.customer_name.is_empty() {
            warn!(session = %self.store.id(), "booking rejected: missing customer name");
            return Err(AppError::MissingCustomerName);
        }

        let today = now.date();
        if request.service_date < today {
            warn!(
                session = %self.store.id(),
                date = %request.service_date,
                %today,
                "booking rejected: service date in the past"
            );
            return Err(AppError::ServiceDateInPast {
                date: request.service_date,
                today,
            });
        }

        let provider = self
            .resolve_provider(request.provider_name.as_deref())
            .inspect_err(|_| {
                warn!(
                    session = %self.store.id(),
                    provider = request.provider_name.as_deref(),
                    "booking rejected: unknown provider"
                )
            })?;
        let booking = Booking::new(
            self.store.next_booking_id(),
            request.customer_name,
            provider,
            request.service_date,
            request.duration_hours,
            request.units,
            request.priority,
            now,
        );

        info!(
            session = %self.store.id(),
            booking_id = booking.id,
            provider = %booking.provider_name,
            total = booking.total_price,
            "booking confirmed"
        );
        self.store.append_booking(booking.clone());
        Ok(booking)
    }

    /// Cancel a booking. Returns whether a booking with that id exists;
    /// cancelling an already cancelled booking is a no-op that still returns true.
    pub fn cancel_booking(&mut self, id: BookingId) -> bool {
        let found = self.store.set_booking_status(id, BookingStatus::Cancelled);
        if found {
            info!(session = %self.store.id(), booking_id = id, "booking cancelled");
        } else {
            debug!(session = %self.store.id(), booking_id = id, "cancel ignored: no such booking");
        }
        found
    }

    /// Changing a booking after it was made is not supported yet.
    pub fn modify_booking(&self, id: BookingId) -> Result<Booking, AppError> {
        debug!(session = %self.store.id(), booking_id = id, "modify requested");
        Err(AppError::FeatureUnavailable("Booking modification"))
    }

    /// Bookings in creation order, optionally restricted to one status.
    pub fn list_bookings(&self, status: Option<BookingStatus>) -> Vec<&Booking> {
        filter_by_status(self.store.bookings(), status)
    }

    // ========================
    // Reporting
    // ========================

    pub fn dashboard(&self) -> DashboardReport {
        let bookings = self.store.bookings();
        let catalog = self.store.catalog();

        DashboardReport {
            total_bookings: bookings.len(),
            total_revenue: total_revenue(bookings),
            provider_count: catalog.len(),
            average_rating: average_rating(catalog).unwrap_or(0.0),
            popular_providers: count_by_provider(bookings),
            rate_histogram: rate_histogram(catalog, RATE_HISTOGRAM_BINS),
        }
    }

    pub fn analytics(&self) -> AnalyticsReport {
        let bookings = self.store.bookings();
        let catalog = self.store.catalog();

        let booking_activity = (!bookings.is_empty()).then(|| BookingActivity {
            revenue_by_provider: revenue_by_provider(bookings),
            bookings_by_priority: count_by_priority(bookings),
            daily_trend: daily_trend(bookings),
        });

        AnalyticsReport {
            booking_activity,
            providers: catalog.to_vec(),
            category_stats: category_stats(catalog),
        }
    }
}
