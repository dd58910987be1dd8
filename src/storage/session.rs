use anyhow::{Result, ensure};
use uuid::Uuid;

use crate::domain::{Booking, BookingId, BookingStatus, ServiceProvider, seed_catalog};

pub type SessionId = Uuid;

/// In-memory state of one user session: the provider catalog, the bookings
/// made so far and the provider picked in the browser.
///
/// Nothing here outlives the process. The catalog is fixed at construction;
/// bookings are only ever appended or have their status changed.
#[derive(Debug)]
pub struct SessionStore {
    id: SessionId,
    catalog: Vec<ServiceProvider>,
    bookings: Vec<Booking>,
    selected_provider: Option<String>,
}

impl SessionStore {
    /// Start a session with the seeded catalog and no bookings.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog: seed_catalog(),
            bookings: Vec::new(),
            selected_provider: None,
        }
    }

    /// Start a session with a custom catalog. The catalog must not be empty.
    pub fn with_catalog(catalog: Vec<ServiceProvider>) -> Result<Self> {
        ensure!(
            !catalog.is_empty(),
            "catalog must contain at least one provider"
        );
        Ok(Self {
            catalog,
            ..Self::new()
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &[ServiceProvider] {
        &self.catalog
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Id the next appended booking gets.
    pub fn next_booking_id(&self) -> BookingId {
        self.bookings.len() as BookingId + 1
    }

    pub fn append_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Set the status of the booking with `id`.
    /// Returns false, changing nothing, when no booking has that id.
    pub fn set_booking_status(&mut self, id: BookingId, status: BookingStatus) -> bool {
        match self.bookings.iter_mut().find(|b| b.id == id) {
            Some(booking) => {
                booking.status = status;
                true
            }
            None => false,
        }
    }

    pub fn selected_provider(&self) -> Option<&str> {
        self.selected_provider.as_deref()
    }

    pub fn set_selected_provider(&mut self, name: String) {
        self.selected_provider = Some(name);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
