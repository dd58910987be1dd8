mod common;

use anyhow::Result;
use common::{capture_logs, run_script};
use servicedesk::domain::{BookingStatus, Priority};

#[test]
fn test_empty_customer_name_prints_warning() -> Result<()> {
    let (output, session) = run_script("book --provider 'Handyman Heroes'\n")?;

    assert!(output.contains("Book Your Service Appointment"));
    assert!(output.contains("Error: Please enter customer name"));
    assert!(!output.contains("Service booking confirmed!"));
    assert!(session.service().bookings().is_empty());
    Ok(())
}

#[test]
fn test_book_and_confirm() -> Result<()> {
    let script = "book --customer \"Alex Smith\" --hours 6 --units 2 --priority priority\n";
    let (output, session) = run_script(script)?;

    assert!(output.contains("  Base rate per hour:          $120"));
    assert!(output.contains("  Priority multiplier (Priority): 1.5x"));
    assert!(output.contains("  Total Price:                 $720.00"));
    assert!(output.contains("Service booking confirmed! Booking ID: 1"));

    let bookings = session.service().bookings();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].customer_name, "Alex Smith");
    assert_eq!(bookings[0].priority, Priority::Priority);
    assert_eq!(bookings[0].created_at_label(), "2026-10-16 09:30");
    Ok(())
}

#[test]
fn test_preview_does_not_book() -> Result<()> {
    let (output, session) = run_script("book --customer Alex --preview\n")?;

    assert!(output.contains("Price Breakdown"));
    assert!(!output.contains("Service booking confirmed!"));
    assert!(session.service().bookings().is_empty());
    Ok(())
}

#[test]
fn test_past_date_is_rejected() -> Result<()> {
    let (output, session) = run_script("book --customer Alex --date 2026-10-01\n")?;

    assert!(output.contains("Error: Service date 2026-10-01 is before today (2026-10-16)"));
    assert!(session.service().bookings().is_empty());
    Ok(())
}

#[test]
fn test_invalid_controls_are_refused() -> Result<()> {
    let script = "\
book --customer Alex --hours 5
book --customer Alex --units 11
book --customer Alex --priority urgent
providers --max-price 300
";
    let (output, session) = run_script(script)?;

    assert_eq!(output.matches("error:").count(), 4);
    assert!(session.service().bookings().is_empty());
    Ok(())
}

#[test]
fn test_empty_bookings_view() -> Result<()> {
    let (output, _) = run_script("bookings\n")?;

    assert!(output.contains("No bookings found. Book your first service!"));
    Ok(())
}

#[test]
fn test_bookings_view_and_cancel() -> Result<()> {
    let script = "\
book --customer Alex --provider 'ABC Plumbing Services'
book --customer Sam --provider 'ProCarpet Care'
cancel 1
cancel 1
cancel 7
bookings --status cancelled
";
    let (output, session) = run_script(script)?;

    assert_eq!(output.matches("Booking #1 cancelled.").count(), 2);
    assert!(output.contains("No booking with ID 7."));
    assert!(output.contains("My Service Bookings"));
    assert!(output.contains("  Booking #1 - ABC Plumbing Services"));
    assert!(!output.contains("  Booking #2 - ProCarpet Care"));
    assert!(output.contains("    Status:        Cancelled"));

    let bookings = session.service().bookings();
    assert_eq!(bookings[0].status, BookingStatus::Cancelled);
    assert_eq!(bookings[1].status, BookingStatus::Confirmed);
    Ok(())
}

#[test]
fn test_status_filter_with_no_match() -> Result<()> {
    let script = "\
book --customer Alex
bookings --status completed
";
    let (output, _) = run_script(script)?;

    assert!(output.contains("No bookings match this status."));
    Ok(())
}

#[test]
fn test_modify_is_coming_soon() -> Result<()> {
    let (output, session) = run_script("book --customer Alex\nmodify 1\n")?;

    assert!(output.contains("Modification feature coming soon!"));
    assert_eq!(session.service().bookings()[0].status, BookingStatus::Confirmed);
    Ok(())
}

#[test]
fn test_dashboard_and_analytics_without_bookings() -> Result<()> {
    let (output, _) = run_script("dashboard\nanalytics\n")?;

    assert!(output.contains("Dashboard Overview"));
    assert!(output.contains("  Available Service Providers: 8"));
    assert!(output.contains("No bookings yet. Book your first service!"));
    assert!(output.contains("Price Range Analysis"));
    assert!(output.contains("No booking data available for analytics. Make some bookings first!"));
    assert!(output.contains("Rate vs Rating by Category"));
    Ok(())
}

#[test]
fn test_analytics_with_bookings() -> Result<()> {
    let (output, _) = run_script("book --customer Alex\nanalytics\n")?;

    assert!(output.contains("Revenue by Service Provider"));
    assert!(output.contains("Bookings by Service Priority"));
    assert!(output.contains("Daily Booking Trends"));
    assert!(!output.contains("No booking data available"));
    Ok(())
}

#[test]
fn test_select_opens_booking_form() -> Result<()> {
    let script = "\
select Handyman Heroes
book --customer Alex
";
    let (output, session) = run_script(script)?;

    assert!(output.contains("Selected Handyman Heroes. Opening Book Service..."));
    assert!(output.contains("  Base rate per hour:          $160"));
    assert_eq!(session.service().bookings()[0].provider_name, "Handyman Heroes");
    Ok(())
}

#[test]
fn test_select_unknown_provider() -> Result<()> {
    let (output, _) = run_script("select Nobody\n")?;

    assert!(output.contains("Error: Service provider not found: Nobody"));
    Ok(())
}

#[test]
fn test_provider_browser() -> Result<()> {
    let script = "\
providers --min-price 100 --max-price 160
providers --category Roofing
providers --min-price 200 --max-price 100
providers --category Plumbing --min-rating 4.9
";
    let (output, _) = run_script(script)?;

    assert!(output.contains("Explore Service Providers"));
    assert!(output.contains("  Elite HVAC Solutions"));
    assert!(!output.contains("  GreenThumb Landscaping"));
    assert!(output.contains("Error: Unknown category 'Roofing'. Valid categories: All, Plumbing"));
    assert!(output.contains("Error: minimum price 200 is above maximum price 100"));
    assert!(output.contains("No service providers match these filters."));
    Ok(())
}

#[test]
fn test_provider_csv_export() -> Result<()> {
    let (output, _) = run_script("providers --category HVAC --format csv\n")?;

    assert!(output.contains("name,service_area,category,hourly_rate,rating\n"));
    assert!(output.contains("Elite HVAC Solutions,East District,HVAC,110,4.5\n"));
    Ok(())
}

#[test]
fn test_bookings_json_export() -> Result<()> {
    let (output, _) = run_script("book --customer Alex\nbookings --format json\n")?;

    assert!(output.contains("\"customer_name\": \"Alex\""));
    assert!(output.contains("\"status\": \"Confirmed\""));
    Ok(())
}

#[test]
fn test_views_open_with_defaults() -> Result<()> {
    let script = "\
view dashboard
view book-service
view my-bookings
view service-providers
view analytics
";
    let (output, session) = run_script(script)?;

    assert!(output.contains("Dashboard Overview"));
    assert!(output.contains("Book Your Service Appointment"));
    assert!(output.contains("No bookings found. Book your first service!"));
    assert!(output.contains("Explore Service Providers"));
    assert!(output.contains("Service Analytics"));
    assert!(session.service().bookings().is_empty());
    Ok(())
}

#[test]
fn test_help_lists_commands_and_views() -> Result<()> {
    let (output, _) = run_script("help\n")?;

    assert!(output.contains("Commands:"));
    assert!(output.contains("  providers"));
    assert!(output.contains("Views: Dashboard, Book Service, My Bookings, Service Providers, Analytics"));
    Ok(())
}

#[test]
fn test_quit_stops_reading() -> Result<()> {
    let (output, session) = run_script("quit\nbook --customer Alex\n")?;

    assert!(!output.contains("Book Your Service Appointment"));
    assert!(session.service().bookings().is_empty());
    Ok(())
}

#[test]
fn test_unterminated_quote_is_reported() -> Result<()> {
    let (output, session) = run_script("book --customer \"Alex\n")?;

    assert!(output.contains("Unterminated \" quote"));
    assert!(session.service().bookings().is_empty());
    Ok(())
}

#[test]
fn test_unknown_command_keeps_session_alive() -> Result<()> {
    let (output, session) = run_script("teleport\nbook --customer Alex\n")?;

    assert!(output.contains("error:"));
    assert_eq!(session.service().bookings().len(), 1);
    Ok(())
}

#[test]
fn test_bookings_csv_export_quotes_fields() -> Result<()> {
    let script = "\
book --customer \"Smith, \\\"Al\\\"\" --hours 1
bookings --format csv
";
    let (output, session) = run_script(script)?;

    assert_eq!(session.service().bookings()[0].customer_name, "Smith, \"Al\"");
    assert!(output.contains(
        "id,customer,provider,category,service_date,duration_hours,units,priority,total_price,status,created_at\n"
    ));
    assert!(output.contains(
        "1,\"Smith, \"\"Al\"\"\",ABC Plumbing Services,Plumbing,2026-10-16,1,1,Standard,40.00,Confirmed,2026-10-16 09:30\n"
    ));
    Ok(())
}

#[test]
fn test_dashboard_and_analytics_json_export() -> Result<()> {
    let (output, _) = run_script("book --customer Alex\ndashboard --format json\nanalytics --format json\n")?;

    assert!(output.contains("\"total_bookings\": 1"));
    assert!(output.contains("\"total_revenue\": 120.0"));
    assert!(output.contains("\"provider_count\": 8"));
    assert!(output.contains("\"popular_providers\""));
    assert!(output.contains("\"rate_histogram\""));
    assert!(output.contains("\"booking_activity\""));
    assert!(output.contains("\"revenue_by_provider\""));
    assert!(output.contains("\"category_stats\""));
    Ok(())
}

#[test]
fn test_csv_not_available_for_reports() -> Result<()> {
    let (output, _) = run_script("dashboard --format csv\nanalytics --format csv\n")?;

    assert_eq!(
        output
            .matches("Format 'csv' is not available for this view.")
            .count(),
        2
    );
    assert!(!output.contains("Dashboard Overview"));
    Ok(())
}

#[test]
fn test_session_events_carry_session_id() -> Result<()> {
    let (result, logs) = capture_logs(tracing::Level::DEBUG, || {
        run_script("view dashboard\nbook --customer Alex\ncancel 9\nquit\n")
    });
    let (_, session) = result?;
    let session_field = format!("session={}", session.service().session_id());

    let lines: Vec<&str> = logs.lines().collect();
    assert!(lines.iter().any(|l| l.contains("executing")));
    assert!(lines.iter().any(|l| l.contains("view selected")));
    assert!(lines.iter().any(|l| l.contains("booking confirmed")));
    assert!(lines.iter().all(|l| l.contains(&session_field)));
    Ok(())
}
