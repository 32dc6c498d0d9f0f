use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use sd_core::{Choice, Collections, DashboardSummary};
use sd_fs::{resolve_data_path, set_config_path, FsStore};
use sd_tui::{RunOptions, Section};

#[derive(Parser)]
#[command(name = "servicedesk", version, about = "ServiceDesk business dashboard")]
struct Cli {
    /// Data directory (overrides SERVICEDESK_PATH and the config file).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Log filter, e.g. `info` or `sd_tui=debug`.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Section to open first, e.g. `clients` or `#map`.
    #[arg(long, default_value = "home")]
    section: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create the data directory and remember its location.
    Init {
        /// Optional path to create the data directory at.
        #[arg(long)]
        path: Option<String>,
    },
    /// Print a collection as tab-separated lines.
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },
    /// Print the dashboard summary.
    Summary,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Clients,
    Jobs,
    Quotes,
    Services,
    Events,
    Locations,
}

pub fn run() -> Result<()> {
    let Cli {
        data_dir,
        log_level,
        section,
        command,
    } = Cli::parse();
    match command {
        Some(Command::Init { path }) => init_store(path, &log_level),
        Some(Command::List { kind }) => {
            let data = load_data(data_dir.as_deref(), &log_level)?;
            print!("{}", format_list(&data, kind));
            Ok(())
        }
        Some(Command::Summary) => {
            let data = load_data(data_dir.as_deref(), &log_level)?;
            print!("{}", format_summary(&DashboardSummary::compute(&data)));
            Ok(())
        }
        None => {
            let store = open_store(data_dir.as_deref(), &log_level)?;
            let section = Section::from_fragment(&section)
                .ok_or_else(|| anyhow!("unknown section `{section}`"))?;
            sd_tui::run(RunOptions {
                data_dir: store.path().to_path_buf(),
                section,
            })
        }
    }
}

fn init_store(path: Option<String>, log_level: &str) -> Result<()> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => FsStore::default_path()?,
    };
    let store = FsStore::new(path.clone());
    store.init().context("failed to initialize data directory")?;
    set_config_path(&path).context("failed to save data path")?;
    init_logging(log_level, Some(&store));
    tracing::info!(path = %path.display(), "initialized data directory");
    println!("ServiceDesk initialized at {}", path.display());
    Ok(())
}

/// Resolve the data directory and start logging into it when it exists.
fn open_store(data_dir: Option<&Path>, log_level: &str) -> Result<FsStore> {
    let store = FsStore::new(resolve_data_path(data_dir)?);
    init_logging(log_level, store.exists().then_some(&store));
    Ok(store)
}

fn load_data(data_dir: Option<&Path>, log_level: &str) -> Result<Collections> {
    let store = open_store(data_dir, log_level)?;
    if !store.exists() {
        return Err(anyhow!(
            "ServiceDesk is not initialized. Run `servicedesk init` to get started."
        ));
    }
    let data = Collections::load(&store);
    tracing::debug!(path = %store.path().display(), "loaded dashboard data");
    Ok(data)
}

/// Send logs to the data directory's log file. Without a data directory
/// only the filter is installed, so nothing reaches the terminal.
fn init_logging(level: &str, store: Option<&FsStore>) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = store
        .and_then(|store| open_log(&store.log_path()))
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
        });
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn open_log(path: &Path) -> Option<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn format_list(data: &Collections, kind: ListKind) -> String {
    let rows: Vec<Vec<String>> = match kind {
        ListKind::Clients => data
            .clients
            .iter()
            .map(|client| {
                vec![
                    client.id.to_string(),
                    client.name.clone(),
                    client.contact.clone(),
                    client.last_interaction.to_string(),
                    client.status.label().to_string(),
                ]
            })
            .collect(),
        ListKind::Jobs => data
            .jobs
            .iter()
            .map(|job| {
                vec![
                    job.id.to_string(),
                    job.title.clone(),
                    job.client.clone(),
                    job.status.label().to_string(),
                    job.due_date.to_string(),
                ]
            })
            .collect(),
        ListKind::Quotes => data
            .quotes
            .iter()
            .map(|quote| {
                vec![
                    quote.id.to_string(),
                    quote.client.clone(),
                    format!("{:.2}", quote.amount),
                    quote.status.label().to_string(),
                    quote.created_date.to_string(),
                ]
            })
            .collect(),
        ListKind::Services => data
            .services
            .iter()
            .map(|service| vec![service.id.to_string(), service.name.clone()])
            .collect(),
        ListKind::Events => data
            .events
            .iter()
            .map(|event| {
                vec![
                    event.id.to_string(),
                    event.title.clone(),
                    event.start.to_string(),
                    event.end.map(|end| end.to_string()).unwrap_or_default(),
                ]
            })
            .collect(),
        ListKind::Locations => data
            .locations
            .iter()
            .map(|location| {
                vec![
                    location.id.to_string(),
                    location.name.clone(),
                    format!("{:.6}", location.latitude),
                    format!("{:.6}", location.longitude),
                    location.description.clone().unwrap_or_default(),
                ]
            })
            .collect(),
    };
    rows.iter()
        .map(|row| format!("{}\n", row.join("\t")))
        .collect()
}

fn format_summary(summary: &DashboardSummary) -> String {
    format!(
        "Active Jobs: {} ({})\nJobs In Progress: {} ({})\nFinished Jobs: {} ({})\nNew Leads: {} ({})\n",
        summary.active_jobs,
        summary.active_jobs_share(),
        summary.jobs_in_progress,
        summary.jobs_in_progress_share(),
        summary.finished_jobs,
        summary.finished_jobs_share(),
        summary.new_leads,
        summary.new_leads_share(),
    )
}
