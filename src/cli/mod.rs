mod chart;
mod line;
mod render;
mod session;

use std::io;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::application::BookingService;
use crate::domain::{
    BookingId, BookingStatus, Priority, RATING_MAX, RATING_MIN, ServiceHours, ServiceUnits,
};

pub use line::{LineError, split_line};
pub use render::{RenderOptions, TITLE};
pub use session::{Flow, Session};

/// Local Service Provider Management System
#[derive(Parser, Debug)]
#[command(name = "servicedesk")]
#[command(about = "An interactive dashboard for booking local service providers")]
#[command(version)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Width of chart bars, in characters
    #[arg(
        long,
        env = "SERVICEDESK_CHART_WIDTH",
        default_value_t = 40,
        value_parser = clap::value_parser!(u16).range(10..=120)
    )]
    pub chart_width: u16,

    /// Currency symbol printed in front of prices
    #[arg(long, env = "SERVICEDESK_CURRENCY", default_value = "$")]
    pub currency: String,

    /// Do not print the welcome banner
    #[arg(long)]
    pub no_banner: bool,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "servicedesk=debug"
        } else {
            "warn"
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            chart_width: usize::from(self.chart_width),
            currency: self.currency.clone(),
        }
    }

    /// Run an interactive session on stdin/stdout until `quit` or end of input.
    pub fn run(self) -> Result<()> {
        let service = BookingService::start();
        let stdin = io::stdin().lock();
        let stdout = io::stdout().lock();

        let mut session = Session::new(service, self.render_options(), stdin, stdout);
        if !self.no_banner {
            session.banner()?;
        }
        session.run()
    }
}

/// One line typed into the session. The first word names the command.
#[derive(Parser, Debug)]
#[command(multicall = true, disable_help_subcommand = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: ViewCommand,
}

#[derive(Subcommand, Debug)]
pub enum ViewCommand {
    /// Overview metrics and charts
    Dashboard {
        /// Output format: table, json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Book a service appointment
    Book(BookArgs),

    /// List the bookings made in this session
    Bookings {
        /// Only show bookings with this status
        #[arg(long, value_enum, default_value_t = StatusChoice::All)]
        status: StatusChoice,

        /// Output format: table, json, csv
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Cancel a booking
    Cancel {
        /// Booking ID
        id: BookingId,
    },

    /// Change a booking
    Modify {
        /// Booking ID
        id: BookingId,
    },

    /// Browse and filter the service providers
    Providers(ProviderArgs),

    /// Pick a provider and open the booking form for it
    Select {
        /// Provider name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Booking and provider analytics
    Analytics {
        /// Output format: table, json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Switch to one of the five views with default inputs
    View {
        /// View to open
        #[arg(value_enum)]
        view: View,
    },

    /// List the available commands
    Help,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Customer name
    #[arg(short, long, default_value = "")]
    pub customer: String,

    /// Service provider name (defaults to the selected provider)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Service date (YYYY-MM-DD, defaults to today)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Service duration in hours: 1, 2, 3, 4, 6 or 8
    #[arg(long, default_value = "3", value_parser = parse_hours)]
    pub hours: ServiceHours,

    /// Number of service units (1 to 10)
    #[arg(short, long, default_value = "1", value_parser = parse_units)]
    pub units: ServiceUnits,

    /// Service priority: standard, priority, emergency
    #[arg(long, default_value = "standard")]
    pub priority: Priority,

    /// Show the price without booking
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args, Debug)]
pub struct ProviderArgs {
    /// Category to show, or "All"
    #[arg(short, long, default_value = "All")]
    pub category: String,

    /// Lowest hourly rate (0 to 250)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u16).range(0..=250))]
    pub min_price: u16,

    /// Highest hourly rate (0 to 250)
    #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u16).range(0..=250))]
    pub max_price: u16,

    /// Minimum rating (0.0 to 5.0)
    #[arg(long, default_value = "0.0", value_parser = parse_rating)]
    pub min_rating: f64,

    /// Output format: table, json, csv
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl Default for ProviderArgs {
    fn default() -> Self {
        Self {
            category: "All".to_string(),
            min_price: 0,
            max_price: 250,
            min_rating: RATING_MIN,
            format: OutputFormat::Table,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChoice {
    All,
    Confirmed,
    Cancelled,
    Completed,
}

impl StatusChoice {
    pub fn status(self) -> Option<BookingStatus> {
        match self {
            StatusChoice::All => None,
            StatusChoice::Confirmed => Some(BookingStatus::Confirmed),
            StatusChoice::Cancelled => Some(BookingStatus::Cancelled),
            StatusChoice::Completed => Some(BookingStatus::Completed),
        }
    }
}

/// The five presentation modes of the dashboard.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    BookService,
    MyBookings,
    ServiceProviders,
    Analytics,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::BookService => "Book Service",
            View::MyBookings => "My Bookings",
            View::ServiceProviders => "Service Providers",
            View::Analytics => "Analytics",
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid date, use YYYY-MM-DD", value))
}

fn parse_hours(value: &str) -> Result<ServiceHours, String> {
    let hours: u8 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of hours", value))?;
    ServiceHours::try_from(hours).map_err(|e| e.to_string())
}

fn parse_units(value: &str) -> Result<ServiceUnits, String> {
    let units: u8 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of units", value))?;
    ServiceUnits::try_from(units).map_err(|e| e.to_string())
}

fn parse_rating(value: &str) -> Result<f64, String> {
    let rating: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a rating", value))?;
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(rating)
    } else {
        Err(format!(
            "rating must be between {:.1} and {:.1}",
            RATING_MIN, RATING_MAX
        ))
    }
}
