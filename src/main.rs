use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use ru_supplier_link::popup::{export_link_for_tab, FixedTab};
use ru_supplier_link::preferences::{JsonFileStorage, OptionsForm, PreferenceStore};
use ru_supplier_link::rewrite::{rewrite, NavigationEvent, NavigationFilter, PageAction};
use ru_supplier_link::settings::AppConfig;
use ru_supplier_link::url_parser::UrlModel;
use ru_supplier_link::utils::logger::init_logger;

#[derive(Parser, Debug)]
#[command(name = "ru-supplier-link", version, about = "Export/RSS links for zakupki.gov.ru search pages")]
struct Cli {
    /// Configuration file (defaults to ./ru_supplier_link.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preference store file, overrides the configuration
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the proxy RSS link for a search page
    Link { url: String },
    /// Print the export download URL for a search page
    Rewrite { url: String },
    /// Tell whether the page action would be shown for a URL
    Check { url: String },
    /// Show or edit the proxy preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Print the current proxy host and port
    Show,
    /// Save a new proxy host and/or port
    Set {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<String>,
    },
    /// Go back to the default proxy address
    Reset,
}

struct PrintAction;

impl PageAction for PrintAction {
    fn show(&self, tab_id: u32) {
        println!("page action shown for tab {}", tab_id);
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(storage) = cli.storage {
        config.storage_path = storage;
    }
    init_logger(config.log_dir.as_deref())?;
    debug!("Using configuration: {:?}", config);

    let storage = JsonFileStorage::new(&config.storage_path);

    match cli.command {
        Command::Link { url } => {
            let store = PreferenceStore::load(storage)
                .await
                .context("Failed to load preferences")?;
            match export_link_for_tab(&FixedTab(url.clone()), store.last())? {
                Some(link) => println!("{}", link),
                None => {
                    warn!("Not a zakupki.gov.ru search page: {}", url);
                    eprintln!("Not a zakupki.gov.ru search page: {}", url);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Rewrite { url } => {
            let model = UrlModel::parse(&url)?;
            println!("{}", rewrite(model)?);
        }
        Command::Check { url } => {
            let event = NavigationEvent { tab_id: 0, url };
            if !NavigationFilter::new().on_committed(&event, &PrintAction) {
                println!("page action hidden");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Prefs { action } => {
            let mut store = PreferenceStore::load(storage)
                .await
                .context("Failed to load preferences")?;
            let mut form = OptionsForm::from_preferences(store.last());

            match action {
                PrefsAction::Show => {
                    println!("Host: {}", store.last().host);
                    println!("Port: {}", store.last().port);
                    return Ok(ExitCode::SUCCESS);
                }
                PrefsAction::Set { host, port } => {
                    if let Some(host) = host {
                        form.host = host;
                    }
                    if let Some(port) = port {
                        form.port = port;
                    }
                }
                PrefsAction::Reset => form.restore_defaults(),
            }

            let message = form.save(&mut store).await?;
            println!("{}", message);
            if message.is_error() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
