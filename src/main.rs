use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::process::ExitCode;
use tripbook::application::workflow::{PaymentForm, ReservationForm, ReservationWorkflow};
use tripbook::config::StoreConfig;
use tripbook::error::ReservationError;
use tripbook::interfaces::csv::report_writer::ReportWriter;
use tripbook::interfaces::view::{ReportRow, ReservationView};
use tripbook::logger;

#[derive(Parser)]
#[command(author, version, about = "Trip reservations and payment tracking", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new client reservation
    Add(AddArgs),
    /// Show a reservation and its current payment details
    Show {
        id: i64,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change payment status, amount paid or invoice number
    Pay(PayArgs),
    /// Print the payment report for a trip date (YYYY-MM-DD)
    Report { trip_date: String },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    birth_date: String,
    #[arg(long = "passport")]
    passport_number: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    passport_expiry: String,
    /// YYYY-MM-DD
    #[arg(long)]
    trip_date: String,
    #[arg(long, allow_hyphen_values = true)]
    base_price: String,
    /// Signed price change, e.g. -100 for a discount
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    adjustment: String,
}

impl From<AddArgs> for ReservationForm {
    fn from(args: AddArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            birth_date: args.birth_date,
            passport_number: args.passport_number,
            passport_expiry: args.passport_expiry,
            trip_date: args.trip_date,
            base_price: args.base_price,
            adjustment: args.adjustment,
        }
    }
}

/// Omitted fields keep the reservation's current values.
#[derive(Args)]
struct PayArgs {
    id: i64,
    /// Invoice number; pass an empty string to clear it
    #[arg(long)]
    invoice: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    amount_paid: Option<String>,
    /// pending, paid_transfer or paid_cash
    #[arg(long)]
    status: Option<String>,
}

async fn run<W: Write>(
    workflow: &ReservationWorkflow,
    command: Command,
    out: &mut W,
) -> tripbook::error::Result<()> {
    match command {
        Command::Add(args) => {
            let reservation = workflow.add(&args.into()).await?;
            writeln!(
                out,
                "Reservation {} for {} saved. Final price: {}",
                reservation.id,
                reservation.client_name(),
                reservation.final_price
            )?;
        }
        Command::Show { id, json } => match workflow.find(id).await? {
            Some(reservation) => {
                let view = ReservationView::from(&reservation);
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
                } else {
                    writeln!(out, "{}", view)?;
                }
            }
            None => writeln!(out, "No reservation with id {}", id)?,
        },
        Command::Pay(args) => {
            let form = match (args.invoice, args.amount_paid, args.status) {
                (Some(invoice_number), Some(amount_paid), Some(status)) => PaymentForm {
                    invoice_number,
                    amount_paid,
                    status,
                },
                (invoice, amount_paid, status) => {
                    let current = workflow
                        .find(args.id)
                        .await?
                        .ok_or(ReservationError::NotFound(args.id))?;
                    PaymentForm {
                        invoice_number: invoice
                            .unwrap_or_else(|| current.invoice_number.unwrap_or_default()),
                        amount_paid: amount_paid
                            .unwrap_or_else(|| current.amount_paid.to_storage()),
                        status: status.unwrap_or_else(|| current.payment_status.to_string()),
                    }
                }
            };

            let reservation = workflow.update_payment(args.id, &form).await?;
            writeln!(
                out,
                "Payment for reservation {} updated: {}, paid {}",
                reservation.id, reservation.payment_status, reservation.amount_paid
            )?;
        }
        Command::Report { trip_date } => {
            let report = workflow.report(&trip_date).await?;
            if report.is_empty() {
                writeln!(out, "No reservations for trip date {}", report.trip_date)?;
            } else {
                let mut writer = ReportWriter::new(out);
                writer.write_rows(report.reservations.iter().map(ReportRow::from))?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let store = cli.store.open_store().await.into_diagnostic()?;
    let workflow = ReservationWorkflow::new(store);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&workflow, cli.command, &mut out).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_user_error() => {
            tracing::debug!(error = %e, "command rejected");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}
