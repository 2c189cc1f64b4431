use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use bakery_export::config::{self, config_dir, load_config, resolve_path, Config};
use bakery_export::error::{ExportError, Result};
use bakery_export::export::{ExportedFile, Exporter, ReportRequest, TransactionKind};
use bakery_export::notify::{
    DispatchRequest, Dispatcher, FileOutbox, LifecycleEvent, MailTransport, SmtpMailer,
};
use bakery_export::render::ExportFormat;
use bakery_export::report::format::format_money;
use bakery_export::report::{Dimension, Orientation, PinnedDimensions, ViewMode};
use bakery_export::store::{Dataset, DatasetSource, TransactionQuery};

#[derive(Parser)]
#[command(name = "bakery-export")]
#[command(version, about = "Report, invoice and change-notification exports for bakery back offices", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.bakery-export or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a config template and sample data
    Init,

    /// List transactions
    List {
        /// Transaction kind (e.g. purchase, sale-return, kitchen-production)
        #[arg(short, long)]
        kind: Option<String>,

        /// Only transactions on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only transactions on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Include cancelled and deleted transactions
        #[arg(long)]
        all: bool,
    },

    /// Export a tabular report for one transaction kind
    Report {
        /// Transaction kind (e.g. purchase, sale-return, kitchen-production)
        kind: String,

        /// Column view: summary, all, or compact
        #[arg(long, default_value = "summary")]
        view: String,

        /// Report from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Report to this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Pin the report to one company id
        #[arg(long)]
        company: Option<String>,

        /// Pin the report to one party id
        #[arg(long)]
        party: Option<String>,

        /// Pin the report to one location id
        #[arg(long)]
        location: Option<String>,

        /// Pin the report to one kitchen id
        #[arg(long)]
        kitchen: Option<String>,

        /// Output format: xlsx or pdf (default: config default_format)
        #[arg(short, long)]
        format: Option<String>,

        /// Landscape pages (pdf only)
        #[arg(long)]
        landscape: bool,

        /// Custom output file path (default: output_dir/<generated name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the invoice of one transaction
    Invoice {
        /// Transaction number (e.g. SAL-0001)
        number: String,

        /// Output format: xlsx or pdf (default: config default_format)
        #[arg(short, long)]
        format: Option<String>,

        /// Custom output file path (default: output_dir/<generated name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Notify users about a committed change to a transaction
    Notify {
        /// Transaction number (e.g. SAL-0001)
        number: String,

        /// What happened: created, updated, deleted, or recovered
        #[arg(short, long)]
        event: String,

        /// Invoice file exported before the change (required for updated)
        #[arg(long)]
        before: Option<PathBuf>,

        /// Who made the change
        #[arg(long, default_value = "system")]
        actor: String,

        /// Attachment format: xlsx or pdf (default: config default_format)
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::List {
            kind,
            from,
            to,
            all,
        } => cmd_list(&cfg_dir, kind, from, to, all),
        Commands::Report {
            kind,
            view,
            from,
            to,
            company,
            party,
            location,
            kitchen,
            format,
            landscape,
            output,
        } => {
            let pins = Pins {
                company,
                party,
                location,
                kitchen,
            };
            cmd_report(&cfg_dir, &kind, &view, from, to, pins, format, landscape, output)
        }
        Commands::Invoice {
            number,
            format,
            output,
        } => cmd_invoice(&cfg_dir, &number, format, output),
        Commands::Notify {
            number,
            event,
            before,
            actor,
            format,
        } => cmd_notify(&cfg_dir, &number, &event, before, &actor, format),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    config::init_config_dir(cfg_dir)?;

    println!("Initialized bakery-export config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Review export and notification settings:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Point [data] at your dataset or edit the sample:  {}/data.json",
        cfg_dir.display()
    );
    println!();
    println!("Then export your first report:");
    println!("  bakery-export report sale --from 2024-01-01");

    Ok(())
}

struct Pins {
    company: Option<String>,
    party: Option<String>,
    location: Option<String>,
    kitchen: Option<String>,
}

struct Workspace {
    dir: PathBuf,
    config: Config,
    dataset: Dataset,
}

impl Workspace {
    fn open(cfg_dir: &Path) -> Result<Self> {
        if !cfg_dir.exists() {
            return Err(ExportError::ConfigNotFound(cfg_dir.to_path_buf()));
        }
        let config = load_config(cfg_dir)?;
        let dataset = Dataset::load(&resolve_path(cfg_dir, &config.data.file))?;
        Ok(Self {
            dir: cfg_dir.to_path_buf(),
            config,
            dataset,
        })
    }

    fn exporter(&self, format: Option<String>) -> Result<Exporter> {
        let format = match format {
            Some(f) => f.parse::<ExportFormat>()?,
            None => self.config.export.default_format,
        };
        Ok(Exporter::new(
            format.renderer(&self.config.pdf),
            &self.config.export.currency_symbol,
        ))
    }

    fn save(&self, file: &ExportedFile, output: Option<PathBuf>) -> Result<PathBuf> {
        let path = match output {
            Some(p) => p,
            None => {
                let dir = resolve_path(&self.dir, &self.config.export.output_dir);
                fs::create_dir_all(&dir)?;
                dir.join(&file.file_name)
            }
        };
        fs::write(&path, &file.bytes)?;
        Ok(path)
    }

    fn outbox(&self) -> FileOutbox {
        let dir = self.config.notify.outbox_dir.as_deref().unwrap_or("outbox");
        FileOutbox::new(resolve_path(&self.dir, dir))
    }
}

fn parse_date(value: Option<String>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                ExportError::InvalidArgument(format!(
                    "Invalid --{flag} date: '{s}' (use YYYY-MM-DD)"
                ))
            })
        })
        .transpose()
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[derive(Tabled)]
struct TransactionListRow {
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "COUNTERPARTY")]
    counterparty: String,
    #[tabled(rename = "LOCATION")]
    location: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

/// List transactions
fn cmd_list(
    cfg_dir: &Path,
    kind: Option<String>,
    from: Option<String>,
    to: Option<String>,
    all: bool,
) -> Result<()> {
    let ws = Workspace::open(cfg_dir)?;
    let query = TransactionQuery {
        kind: kind.map(|k| k.parse::<TransactionKind>()).transpose()?,
        from: parse_date(from, "from")?,
        to: parse_date(to, "to")?,
        include_inactive: all,
        ..Default::default()
    };

    let transactions = ws.dataset.query(&query);
    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let rows = transactions
        .iter()
        .map(|t| {
            let row = ws.dataset.resolve_row(t)?;
            Ok(TransactionListRow {
                number: row.number,
                kind: row.kind.label().to_string(),
                date: row.date.format("%Y-%m-%d").to_string(),
                counterparty: row.party.or(row.kitchen).unwrap_or_else(|| "-".to_string()),
                location: row.location,
                total: format_money(row.grand_total, &ws.config.export.currency_symbol),
                status: t.status.stamp().unwrap_or("ACTIVE").to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Export a tabular report
#[allow(clippy::too_many_arguments)]
fn cmd_report(
    cfg_dir: &Path,
    kind: &str,
    view: &str,
    from: Option<String>,
    to: Option<String>,
    pins: Pins,
    format: Option<String>,
    landscape: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let ws = Workspace::open(cfg_dir)?;
    let kind: TransactionKind = kind.parse()?;
    let view: ViewMode = view.parse()?;
    let date_from = parse_date(from, "from")?;
    let date_to = parse_date(to, "to")?;

    // Pins resolve to display names up front so an unknown id fails before rendering.
    let mut pinned = PinnedDimensions::new();
    if let Some(id) = &pins.company {
        pinned = pinned.pin(Dimension::Company, ws.dataset.company(id)?.entity.name.clone());
    }
    if let Some(id) = &pins.party {
        pinned = pinned.pin(Dimension::Party, ws.dataset.party(id)?.entity.name.clone());
    }
    if let Some(id) = &pins.location {
        pinned = pinned.pin(Dimension::Location, ws.dataset.location(id)?.name.clone());
    }
    if let Some(id) = &pins.kitchen {
        pinned = pinned.pin(Dimension::Kitchen, ws.dataset.kitchen(id)?.name.clone());
    }

    let query = TransactionQuery {
        kind: Some(kind),
        from: date_from,
        to: date_to,
        company_id: pins.company,
        party_id: pins.party,
        location_id: pins.location,
        kitchen_id: pins.kitchen,
        include_inactive: false,
    };
    let rows = ws.dataset.rows(&ws.dataset.query(&query))?;

    let request = ReportRequest {
        view,
        pinned,
        date_from,
        date_to,
        orientation: if landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        },
        subtitle: None,
    };

    let exporter = ws.exporter(format)?;
    let file = exporter.export_report(kind, &rows, &request, now())?;
    let path = ws.save(&file, output)?;

    println!("Generated {}", kind.report_title());
    println!("  Rows:  {}", rows.len());
    println!("  Saved: {}", path.display());

    Ok(())
}

/// Export one invoice
fn cmd_invoice(
    cfg_dir: &Path,
    number: &str,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let ws = Workspace::open(cfg_dir)?;
    let transaction = ws.dataset.transaction_by_number(number)?;
    let invoice = ws.dataset.resolve_invoice(transaction)?;

    let exporter = ws.exporter(format)?;
    let file = exporter.export_invoice(&invoice, now())?;
    let path = ws.save(&file, output)?;

    println!("Generated {} {}", transaction.kind.invoice_type(), transaction.number);
    println!(
        "  Total: {}",
        format_money(invoice.totals.grand_total, exporter.currency_symbol())
    );
    println!("  Saved: {}", path.display());

    Ok(())
}

/// Dispatch change notifications for one transaction
fn cmd_notify(
    cfg_dir: &Path,
    number: &str,
    event: &str,
    before: Option<PathBuf>,
    actor: &str,
    format: Option<String>,
) -> Result<()> {
    let ws = Workspace::open(cfg_dir)?;
    let event: LifecycleEvent = event.parse()?;
    let transaction = ws.dataset.transaction_by_number(number)?;

    let before = before.map(|path| read_snapshot(&path)).transpose()?;

    let at = now();
    let exporter = ws.exporter(format)?;
    let source = DatasetSource::new(&ws.dataset, &exporter, at);
    let outbox = ws.outbox();
    let smtp = ws.config.mail.as_ref().map(SmtpMailer::new).transpose()?;
    let mailer: &dyn MailTransport = match &smtp {
        Some(smtp) => smtp,
        None => &outbox,
    };

    let dispatcher = Dispatcher::new(&source, &ws.dataset, &outbox, mailer, &ws.config.notify);
    let outcome = dispatcher.dispatch(DispatchRequest {
        transaction_id: transaction.id.clone(),
        event,
        actor: actor.to_string(),
        at,
        before,
    })?;

    println!("{} {} {}", transaction.kind.label(), transaction.number, event);
    println!("  Notified: {} user(s)", outcome.notified.len());
    match outcome.email {
        Some(email) => {
            println!("  Email:    {}", email.subject);
            println!("  To:       {}", email.to.join(", "));
            for name in &email.attachments {
                println!("  Attached: {name}");
            }
            if smtp.is_none() {
                println!("  Outbox:   {}", outbox.dir().display());
            }
        }
        None => println!("  Email:    not sent"),
    }

    Ok(())
}

fn read_snapshot(path: &Path) -> Result<ExportedFile> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ExportError::InvalidArgument(format!("--before must be a file: {}", path.display()))
        })?;
    Ok(ExportedFile { bytes, file_name })
}
