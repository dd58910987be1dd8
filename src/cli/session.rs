use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::debug;

use crate::application::{AppError, BookingRequest, BookingService};
use crate::domain::{BookingId, CategorySelector, ProviderFilter};

use super::{
    BookArgs, OutputFormat, ProviderArgs, RenderOptions, SessionLine, StatusChoice, View,
    ViewCommand, render, split_line,
};

const PROMPT: &str = "servicedesk> ";

/// Whether the session keeps reading commands after one has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session: reads one command per line from `input`, renders
/// the requested view to `output`.
pub struct Session<R, W> {
    service: BookingService,
    options: RenderOptions,
    input: R,
    output: W,
    clock: Box<dyn Fn() -> NaiveDateTime>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(service: BookingService, options: RenderOptions, input: R, output: W) -> Self {
        Self {
            service,
            options,
            input,
            output,
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Replace the local clock, e.g. to pin "today" in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn service(&self) -> &BookingService {
        &self.service
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn banner(&mut self) -> Result<()> {
        render::banner(&mut self.output)
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read command")?;
            if read == 0 {
                writeln!(self.output)?;
                break;
            }

            if self.execute(&line)? == Flow::Quit {
                break;
            }
        }
        debug!(session = %self.service.session_id(), "session ended");
        Ok(())
    }

    /// Execute a single command line.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let words = match split_line(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Also covers --help output
                write!(self.output, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        debug!(session = %self.service.session_id(), ?command, "executing");
        self.dispatch(command)
    }

    fn dispatch(&mut self, command: ViewCommand) -> Result<Flow> {
        match command {
            ViewCommand::Dashboard { format } => self.show_dashboard(format)?,
            ViewCommand::Book(args) => self.book(args)?,
            ViewCommand::Bookings { status, format } => self.show_bookings(status, format)?,
            ViewCommand::Cancel { id } => self.cancel(id)?,
            ViewCommand::Modify { id } => self.modify(id)?,
            ViewCommand::Providers(args) => self.show_providers(args)?,
            ViewCommand::Select { name } => self.select(&name.join(" "))?,
            ViewCommand::Analytics { format } => self.show_analytics(format)?,
            ViewCommand::View { view } => self.open_view(view)?,
            ViewCommand::Help => self.help()?,
            ViewCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report_error(&mut self, error: &AppError) -> Result<()> {
        writeln!(self.output, "Error: {}", error)?;
        Ok(())
    }

    fn unsupported_format(&mut self, format: OutputFormat) -> Result<()> {
        let name = format
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        writeln!(self.output, "Format '{}' is not available for this view.", name)?;
        Ok(())
    }

    fn open_view(&mut self, view: View) -> Result<()> {
        debug!(session = %self.service.session_id(), view = view.label(), "view selected");
        match view {
            View::Dashboard => self.show_dashboard(OutputFormat::Table),
            View::BookService => self.book_form(BookingRequest::new("", self.today())),
            View::MyBookings => self.show_bookings(StatusChoice::All, OutputFormat::Table),
            View::ServiceProviders => self.show_providers(ProviderArgs::default()),
            View::Analytics => self.show_analytics(OutputFormat::Table),
        }
    }

    fn today(&self) -> NaiveDate {
        (self.clock)().date()
    }

    fn show_dashboard(&mut self, format: OutputFormat) -> Result<()> {
        let report = self.service.dashboard();
        match format {
            OutputFormat::Table => render::dashboard(&mut self.output, &report, &self.options),
            OutputFormat::Json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&report)?)?;
                Ok(())
            }
            OutputFormat::Csv => self.unsupported_format(format),
        }
    }

    fn book_form(&mut self, request: BookingRequest) -> Result<()> {
        match self.service.quote(&request) {
            Ok(quote) => render::booking_form(&mut self.output, &quote, &self.options),
            Err(e) => self.report_error(&e),
        }
    }

    fn book(&mut self, args: BookArgs) -> Result<()> {
        let mut request = BookingRequest::new(args.customer, args.date.unwrap_or(self.today()))
            .with_hours(args.hours)
            .with_units(args.units)
            .with_priority(args.priority);
        request.provider_name = args.provider;

        let quote = match self.service.quote(&request) {
            Ok(quote) => quote,
            Err(e) => return self.report_error(&e),
        };
        render::booking_form(&mut self.output, &quote, &self.options)?;

        if args.preview {
            return Ok(());
        }

        let now = (self.clock)();
        match self.service.create_booking(request, now) {
            Ok(booking) => render::booking_confirmed(&mut self.output, &booking),
            Err(e) => {
                writeln!(self.output)?;
                self.report_error(&e)
            }
        }
    }

    fn show_bookings(&mut self, status: StatusChoice, format: OutputFormat) -> Result<()> {
        let bookings = self.service.list_bookings(status.status());
        match format {
            OutputFormat::Json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&bookings)?)?;
            }
            OutputFormat::Csv => render::bookings_csv(&mut self.output, &bookings)?,
            OutputFormat::Table if self.service.bookings().is_empty() => {
                writeln!(self.output)?;
                writeln!(self.output, "No bookings found. Book your first service!")?;
            }
            OutputFormat::Table => render::bookings(&mut self.output, &bookings, &self.options)?,
        }
        Ok(())
    }

    fn cancel(&mut self, id: BookingId) -> Result<()> {
        if self.service.cancel_booking(id) {
            writeln!(self.output, "Booking #{} cancelled.", id)?;
        } else {
            writeln!(self.output, "No booking with ID {}.", id)?;
        }
        Ok(())
    }

    fn modify(&mut self, id: BookingId) -> Result<()> {
        match self.service.modify_booking(id) {
            Ok(booking) => writeln!(self.output, "Booking #{} updated.", booking.id)?,
            Err(AppError::FeatureUnavailable(_)) => {
                writeln!(self.output, "Modification feature coming soon!")?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn show_providers(&mut self, args: ProviderArgs) -> Result<()> {
        if args.min_price > args.max_price {
            writeln!(
                self.output,
                "Error: minimum price {} is above maximum price {}",
                args.min_price, args.max_price
            )?;
            return Ok(());
        }

        let filter = ProviderFilter {
            category: CategorySelector::parse(&args.category),
            min_price: f64::from(args.min_price),
            max_price: f64::from(args.max_price),
            min_rating: args.min_rating,
        };

        let providers = match self.service.browse_providers(&filter) {
            Ok(providers) => providers,
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                return Ok(());
            }
        };

        match args.format {
            OutputFormat::Table => {
                render::providers(&mut self.output, &providers, &filter, &self.options)?
            }
            OutputFormat::Json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&providers)?)?
            }
            OutputFormat::Csv => render::providers_csv(&mut self.output, &providers)?,
        }
        Ok(())
    }

    fn select(&mut self, name: &str) -> Result<()> {
        let provider_name = match self.service.select_provider(name) {
            Ok(provider) => provider.name.clone(),
            Err(e) => return self.report_error(&e),
        };
        writeln!(
            self.output,
            "Selected {}. Opening {}...",
            provider_name,
            View::BookService.label()
        )?;
        let request = BookingRequest::new("", self.today()).with_provider(provider_name);
        self.book_form(request)
    }

    fn show_analytics(&mut self, format: OutputFormat) -> Result<()> {
        let report = self.service.analytics();
        match format {
            OutputFormat::Table => render::analytics(&mut self.output, &report, &self.options),
            OutputFormat::Json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&report)?)?;
                Ok(())
            }
            OutputFormat::Csv => self.unsupported_format(format),
        }
    }

    fn help(&mut self) -> Result<()> {
        let command = SessionLine::command();
        writeln!(self.output, "Commands:")?;
        for sub in command.get_subcommands() {
            let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
            writeln!(self.output, "  {:<10} {}", sub.get_name(), about)?;
        }
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Views: {}",
            [
                View::Dashboard,
                View::BookService,
                View::MyBookings,
                View::ServiceProviders,
                View::Analytics
            ]
            .iter()
            .map(|v| v.label())
            .collect::<Vec<_>>()
            .join(", ")
        )?;
        writeln!(self.output, "Run '<command> --help' for the options of a command.")?;
        Ok(())
    }
}
