// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use servicedesk::application::{BookingRequest, BookingService};
use servicedesk::cli::{RenderOptions, Session};
use servicedesk::domain::{Booking, Priority, ServiceHours, ServiceProvider, ServiceUnits};
use servicedesk::storage::SessionStore;

/// Submission time used by every test: 2026-10-16 09:30
pub fn now() -> NaiveDateTime {
    at("2026-10-16 09:30")
}

pub fn today() -> NaiveDate {
    now().date()
}

/// Helper to parse a date string (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to parse a timestamp (YYYY-MM-DD HH:MM)
pub fn at(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M").unwrap()
}

/// A fresh session with the seeded catalog
pub fn test_service() -> BookingService {
    BookingService::new(SessionStore::new())
}

/// A session over a custom catalog
pub fn service_with_catalog(catalog: Vec<ServiceProvider>) -> Result<BookingService> {
    Ok(BookingService::with_catalog(catalog)?)
}

/// Catalog of eight providers with the given hourly rates, named "P1".."P8"
pub fn rate_catalog(rates: &[f64]) -> Vec<ServiceProvider> {
    rates
        .iter()
        .enumerate()
        .map(|(i, rate)| {
            ServiceProvider::new(format!("P{}", i + 1), "Area", *rate, 4.5, "General Repair")
        })
        .collect()
}

pub struct Bookings;

impl Bookings {
    /// Book a standard 3 hour, single unit job for today
    pub fn standard(
        service: &mut BookingService,
        customer: &str,
        provider: &str,
    ) -> Result<Booking> {
        let request = BookingRequest::new(customer, today()).with_provider(provider);
        Ok(service.create_booking(request, now())?)
    }

    pub fn custom(
        service: &mut BookingService,
        provider: &str,
        hours: u8,
        units: u8,
        priority: Priority,
        created_at: NaiveDateTime,
    ) -> Result<Booking> {
        let request = BookingRequest::new("Alex", created_at.date())
            .with_provider(provider)
            .with_hours(ServiceHours::try_from(hours)?)
            .with_units(ServiceUnits::try_from(units)?)
            .with_priority(priority);
        Ok(service.create_booking(request, created_at)?)
    }
}

/// Feed `script` to a fresh session and return everything it printed along
/// with the session for inspection.
pub fn run_script(script: &str) -> Result<(String, Session<Cursor<Vec<u8>>, Vec<u8>>)> {
    let mut session = Session::new(
        test_service(),
        RenderOptions::default(),
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
    )
    .with_clock(now);
    session.run()?;

    let output = String::from_utf8(session.output().clone())?;
    Ok((output, session))
}

/// In-memory sink for log output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber recording `warn` and above; returns its result
/// and the formatted log lines.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    capture_logs(tracing::Level::WARN, f)
}

pub fn capture_logs<T>(level: tracing::Level, f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
