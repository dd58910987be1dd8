use std::io::Write;

use anyhow::Result;

use crate::application::{AnalyticsReport, BookingQuote, DashboardReport};
use crate::domain::{
    Amount, Booking, ProviderFilter, ServiceProvider, format_amount, format_rate,
};

use super::chart::{ChartRow, bar_chart, share_chart, truncate};

pub const TITLE: &str = "Local Service Provider Management System";

/// Presentation settings shared by every view.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub chart_width: usize,
    pub currency: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_width: 40,
            currency: "$".to_string(),
        }
    }
}

impl RenderOptions {
    fn money(&self, amount: Amount) -> String {
        format!("{}{}", self.currency, format_amount(amount))
    }

    fn rate(&self, rate: Amount) -> String {
        format!("{}{}", self.currency, format_rate(rate))
    }
}

fn heading<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))?;
    Ok(())
}

pub fn banner<W: Write>(out: &mut W) -> Result<()> {
    heading(out, TITLE)?;
    writeln!(out, "Type 'help' for the list of views, 'quit' to leave.")?;
    Ok(())
}

// ========================
// Dashboard
// ========================

pub fn dashboard<W: Write>(
    out: &mut W,
    report: &DashboardReport,
    options: &RenderOptions,
) -> Result<()> {
    heading(out, "Dashboard Overview")?;

    writeln!(out, "  Total Bookings:              {}", report.total_bookings)?;
    writeln!(
        out,
        "  Total Revenue:               {}",
        options.money(report.total_revenue)
    )?;
    writeln!(out, "  Available Service Providers: {}", report.provider_count)?;
    writeln!(
        out,
        "  Avg Provider Rating:         {:.1}/5",
        report.average_rating
    )?;

    section(out, "Popular Service Providers")?;
    if report.popular_providers.is_empty() {
        writeln!(out, "  No bookings yet. Book your first service!")?;
    } else {
        let mut rows: Vec<(String, usize)> = report
            .popular_providers
            .iter()
            .map(|p| (p.provider_name.clone(), p.count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        share_chart(out, &rows, options.chart_width)?;
    }

    section(out, "Price Range Analysis")?;
    let rows: Vec<ChartRow> = report
        .rate_histogram
        .iter()
        .map(|bin| {
            ChartRow::new(
                format!("{} - {}", options.rate(bin.lower.round()), options.rate(bin.upper.round())),
                bin.count as f64,
                bin.count.to_string(),
            )
        })
        .collect();
    bar_chart(out, &rows, options.chart_width)?;

    Ok(())
}

// ========================
// Book Service
// ========================

pub fn booking_form<W: Write>(
    out: &mut W,
    quote: &BookingQuote,
    options: &RenderOptions,
) -> Result<()> {
    heading(out, "Book Your Service Appointment")?;

    section(out, "Service Provider Preview")?;
    provider_card(out, &quote.provider, options)?;

    let breakdown = &quote.breakdown;
    section(out, "Price Breakdown")?;
    writeln!(
        out,
        "  Base rate per hour:          {}",
        options.rate(breakdown.base_rate)
    )?;
    writeln!(
        out,
        "  Service duration:            {} hours",
        breakdown.hours.get()
    )?;
    writeln!(
        out,
        "  Number of service units:     {}",
        breakdown.units.get()
    )?;
    writeln!(
        out,
        "  Priority multiplier ({}): {}x",
        breakdown.priority, breakdown.multiplier
    )?;
    writeln!(out, "  {}", "-".repeat(40))?;
    writeln!(
        out,
        "  Total Price:                 {}",
        options.money(breakdown.total)
    )?;
    Ok(())
}

pub fn booking_confirmed<W: Write>(out: &mut W, booking: &Booking) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Service booking confirmed! Booking ID: {}",
        booking.id
    )?;
    Ok(())
}

// ========================
// My Bookings
// ========================

pub fn bookings<W: Write>(
    out: &mut W,
    bookings: &[&Booking],
    options: &RenderOptions,
) -> Result<()> {
    heading(out, "My Service Bookings")?;

    if bookings.is_empty() {
        writeln!(out, "  No bookings match this status.")?;
        return Ok(());
    }

    for booking in bookings {
        booking_card(out, booking, options)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Use 'cancel <id>' to cancel a booking or 'modify <id>' to change it."
    )?;
    Ok(())
}

fn booking_card<W: Write>(out: &mut W, booking: &Booking, options: &RenderOptions) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  Booking #{} - {}",
        booking.id, booking.provider_name
    )?;
    writeln!(out, "    Customer:      {}", booking.customer_name)?;
    writeln!(
        out,
        "    Service Date:  {} | Duration: {} hours",
        booking.service_date.format("%Y-%m-%d"),
        booking.duration_hours.get()
    )?;
    writeln!(
        out,
        "    Service Units: {} | Priority: {}",
        booking.units.get(),
        booking.priority
    )?;
    writeln!(out, "    Total Price:   {}", options.money(booking.total_price))?;
    writeln!(out, "    Status:        {}", booking.status)?;
    writeln!(out, "    Booked At:     {}", booking.created_at_label())?;
    Ok(())
}

pub fn bookings_csv<W: Write>(out: &mut W, bookings: &[&Booking]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "id",
        "customer",
        "provider",
        "category",
        "service_date",
        "duration_hours",
        "units",
        "priority",
        "total_price",
        "status",
        "created_at",
    ])?;
    for booking in bookings {
        writer.write_record([
            booking.id.to_string(),
            booking.customer_name.clone(),
            booking.provider_name.clone(),
            booking.provider_category.clone(),
            booking.service_date.format("%Y-%m-%d").to_string(),
            booking.duration_hours.get().to_string(),
            booking.units.get().to_string(),
            booking.priority.to_string(),
            format!("{:.2}", booking.total_price),
            booking.status.to_string(),
            booking.created_at_label(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// ========================
// Service Providers
// ========================

pub fn providers<W: Write>(
    out: &mut W,
    providers: &[&ServiceProvider],
    filter: &ProviderFilter,
    options: &RenderOptions,
) -> Result<()> {
    heading(out, "Explore Service Providers")?;
    writeln!(
        out,
        "  Category: {} | Price: {} - {} per hour | Minimum rating: {:.1}",
        filter.category,
        options.rate(filter.min_price),
        options.rate(filter.max_price),
        filter.min_rating
    )?;

    if providers.is_empty() {
        writeln!(out)?;
        writeln!(out, "  No service providers match these filters.")?;
        return Ok(());
    }

    for provider in providers {
        writeln!(out)?;
        provider_card(out, provider, options)?;
    }
    writeln!(out)?;
    writeln!(out, "Use 'select <name>' to book one of these providers.")?;
    Ok(())
}

fn provider_card<W: Write>(
    out: &mut W,
    provider: &ServiceProvider,
    options: &RenderOptions,
) -> Result<()> {
    writeln!(out, "  {}", provider.name)?;
    writeln!(out, "    Service Area: {}", provider.service_area)?;
    writeln!(out, "    Category:     {}", provider.category)?;
    writeln!(out, "    Rating:       {:.1}/5", provider.rating)?;
    writeln!(out, "    Rate:         {}/hour", options.rate(provider.hourly_rate))?;
    Ok(())
}

pub fn providers_csv<W: Write>(out: &mut W, providers: &[&ServiceProvider]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["name", "service_area", "category", "hourly_rate", "rating"])?;
    for provider in providers {
        writer.write_record([
            provider.name.clone(),
            provider.service_area.clone(),
            provider.category.clone(),
            provider.hourly_rate.to_string(),
            provider.rating.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// ========================
// Analytics
// ========================

pub fn analytics<W: Write>(
    out: &mut W,
    report: &AnalyticsReport,
    options: &RenderOptions,
) -> Result<()> {
    heading(out, "Service Analytics")?;

    match &report.booking_activity {
        Some(activity) => {
            section(out, "Revenue by Service Provider")?;
            let rows: Vec<ChartRow> = activity
                .revenue_by_provider
                .iter()
                .map(|r| ChartRow::new(r.provider_name.clone(), r.revenue, options.money(r.revenue)))
                .collect();
            bar_chart(out, &rows, options.chart_width)?;

            section(out, "Bookings by Service Priority")?;
            let rows: Vec<(String, usize)> = activity
                .bookings_by_priority
                .iter()
                .map(|p| (p.priority.to_string(), p.count))
                .collect();
            share_chart(out, &rows, options.chart_width)?;

            section(out, "Daily Booking Trends")?;
            let rows: Vec<ChartRow> = activity
                .daily_trend
                .iter()
                .map(|d| {
                    ChartRow::new(
                        d.date.format("%Y-%m-%d").to_string(),
                        d.count as f64,
                        d.count.to_string(),
                    )
                })
                .collect();
            bar_chart(out, &rows, options.chart_width)?;
        }
        None => {
            writeln!(out)?;
            writeln!(
                out,
                "  No booking data available for analytics. Make some bookings first!"
            )?;
        }
    }

    section(out, "Service Provider Analytics")?;
    writeln!(out)?;
    writeln!(out, "  Rate vs Rating by Category")?;
    writeln!(
        out,
        "  {:<18} {:<26} {:>10} {:>7}",
        "CATEGORY", "PROVIDER", "RATE", "RATING"
    )?;
    writeln!(out, "  {}", "-".repeat(64))?;
    for stats in &report.category_stats {
        for provider in report.providers.iter().filter(|p| p.category == stats.category) {
            writeln!(
                out,
                "  {:<18} {:<26} {:>10} {:>7.1}",
                truncate(&provider.category, 18),
                truncate(&provider.name, 26),
                options.rate(provider.hourly_rate),
                provider.rating
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "  Average Rate by Category")?;
    let rows: Vec<ChartRow> = report
        .category_stats
        .iter()
        .map(|c| {
            ChartRow::new(
                c.category.clone(),
                c.average_rate,
                format!("{}/hour, {:.2} rating", options.money(c.average_rate), c.average_rating),
            )
        })
        .collect();
    bar_chart(out, &rows, options.chart_width)?;

    Ok(())
}
