//! Command-line front end for the storefront catalog.
//!
//! Stands in for the app screens: each subcommand maps to one catalog store
//! operation against the file-backed store in `STOREFRONT_DATA_DIR`. Results
//! go to stdout as JSON; notices and logs go to stderr.

use anyhow::{Context, Result, bail};
use serde_json::json;
use std::env;
use std::ffi::OsString;
use storefront::config::DEFAULT_LOG_FILTER;
use storefront::{
    CatalogStore, FileStore, ImagePick, NO_PRODUCTS_TEXT, Notice, NotificationSink, ProductDraft,
    ProductName, StderrSink, StorefrontConfig, TracingSink, open_catalog,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse(env::args_os().skip(1))?;
    let config = StorefrontConfig::from_env();
    init_tracing(&config.log_filter);

    let mut store = open_catalog(&config);
    let sink = (StderrSink, TracingSink);
    match cli.command {
        Command::List { query } => list(&mut store, &sink, &query).await,
        Command::Add { name, price, image } => add(&mut store, &sink, name, price, image).await,
        Command::Remove { name } => remove(&mut store, &sink, name).await,
        Command::Clear => clear(&mut store, &sink).await,
    }
}

fn init_tracing(filter: &str) {
    let env_filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List {
        query: String,
    },
    Add {
        name: String,
        price: String,
        image: Option<String>,
    },
    Remove {
        name: String,
    },
    Clear,
}

struct Cli {
    command: Command,
}

impl Cli {
    fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args
            .into_iter()
            .map(|arg| {
                arg.into_string()
                    .map_err(|raw| anyhow::anyhow!("Invalid UTF-8 in argument {raw:?}"))
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        let Some(subcommand) = args.next() else {
            usage(1);
        };

        let command = match subcommand.as_str() {
            "list" => {
                let mut query = String::new();
                while let Some(flag) = args.next() {
                    match flag.as_str() {
                        "--query" | "-q" => query = next_value(&mut args, &flag)?,
                        other => bail!("Unknown argument for list: {other}"),
                    }
                }
                Command::List { query }
            }
            "add" => {
                let mut name = String::new();
                let mut price = String::new();
                let mut image = None;
                while let Some(flag) = args.next() {
                    match flag.as_str() {
                        "--name" => name = next_value(&mut args, &flag)?,
                        "--price" => price = next_value(&mut args, &flag)?,
                        "--image" => image = Some(next_value(&mut args, &flag)?),
                        other => bail!("Unknown argument for add: {other}"),
                    }
                }
                Command::Add { name, price, image }
            }
            "remove" => {
                let name = args
                    .next()
                    .context("remove requires the product name")?;
                if let Some(extra) = args.next() {
                    bail!("Unexpected argument for remove: {extra}");
                }
                Command::Remove { name }
            }
            "clear" => Command::Clear,
            "--help" | "-h" | "help" => usage(0),
            other => bail!("Unknown command: {other}"),
        };

        Ok(Self { command })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: storefront <command> [args]\n\nCommands:\n  list [--query TEXT]                          Print products whose name contains TEXT (case-insensitive).\n  add --name NAME --price PRICE --image URI    Add a product; names must be unique.\n  remove NAME                                  Delete every product named NAME.\n  clear                                        Reset the stored catalog to empty.\n\nEnvironment:\n  STOREFRONT_DATA_DIR   Directory holding the persisted catalog.\n  STOREFRONT_LOG        Log filter (default storefront=warn)."
    );
    std::process::exit(code);
}

async fn list(
    store: &mut CatalogStore<FileStore>,
    sink: &impl NotificationSink,
    query: &str,
) -> Result<()> {
    let outcome = store.load_or_empty().await;
    if let Some(err) = &outcome.degraded {
        sink.notify(&Notice::load_failed(err));
    }
    let view = store.view(query);
    if view.is_empty() {
        eprintln!("{NO_PRODUCTS_TEXT}");
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

async fn add(
    store: &mut CatalogStore<FileStore>,
    sink: &impl NotificationSink,
    name: String,
    price: String,
    image: Option<String>,
) -> Result<()> {
    let pick = match image {
        Some(uri) => ImagePick::Selected(uri.into()),
        None => ImagePick::Cancelled,
    };
    if let Some(notice) = pick.notice() {
        sink.notify(&notice);
    }

    let draft = ProductDraft::new(name, price, pick.into_image());
    match store.add_draft(draft).await {
        Ok(product) => {
            sink.notify(&Notice::product_added());
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(())
        }
        Err(err) => {
            sink.notify(&Notice::add_failed(&err));
            Err(err).context("add failed")
        }
    }
}

async fn remove(
    store: &mut CatalogStore<FileStore>,
    sink: &impl NotificationSink,
    name: String,
) -> Result<()> {
    let name = ProductName(name);
    match store.remove(&name).await {
        Ok(removed) => {
            sink.notify(&Notice::product_deleted());
            println!("{}", json!({"name": name, "removed": removed}));
            Ok(())
        }
        Err(err) => {
            sink.notify(&Notice::delete_failed(&err));
            Err(err).context("remove failed")
        }
    }
}

async fn clear(store: &mut CatalogStore<FileStore>, sink: &impl NotificationSink) -> Result<()> {
    match store.clear().await {
        Ok(()) => {
            sink.notify(&Notice::catalog_cleared());
            Ok(())
        }
        Err(err) => {
            sink.notify(&Notice::clear_failed(&err));
            Err(err).context("clear failed")
        }
    }
}
