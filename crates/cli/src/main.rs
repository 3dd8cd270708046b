mod cli;
mod terminal;

use std::io::Read;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use satreg_catalog::{ReconcileEvent, SourceKind, SourceRegistry};
use satreg_core::config::{load_dotenv, Config};
use satreg_core::{FileStore, KvStore};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let mut config = Config::from_env();
    if let Some(dir) = args.data_dir.clone() {
        config.storage.data_dir = dir;
    }
    config.log_summary();

    let mut store = FileStore::new(&config.storage.data_dir).with_context(|| {
        format!(
            "failed to open data directory: {}",
            config.storage.data_dir.display()
        )
    })?;
    if let Some(quota) = config.storage.quota_bytes {
        store = store.with_quota(quota);
    }
    let store: Arc<dyn KvStore> = Arc::new(store);

    let mut registry = SourceRegistry::builder(store)
        .default_source(config.sources.default_source.clone())
        .build();

    // No aggregator runs inside the CLI; the next tracker start re-merges.
    registry.set_reconcile_hook(|event: &ReconcileEvent| {
        info!(
            reason = ?event.reason,
            source = %event.source_id,
            enabled = event.enabled.len(),
            "enabled sources changed"
        );
        Ok(())
    });

    run(&mut registry, args.command)
}

fn run(registry: &mut SourceRegistry, command: Command) -> Result<()> {
    match command {
        Command::List { json } => {
            let rows = registry.status_report();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                terminal::print_sources(&rows)?;
            }
        }
        Command::Enabled => {
            for id in registry.enabled_ids() {
                println!("{id}");
            }
        }
        Command::Toggle { id } => {
            if registry.descriptor(&id).is_none() {
                terminal::print_info(&format!("note: '{id}' is not a known source"))?;
            }
            let enabled = registry.toggle(&id);
            println!("{id} {}", if enabled { "enabled" } else { "disabled" });
        }
        Command::AddUrl { name, url } => {
            let id = registry.add_url_source(&name, &url);
            println!("{id}");
        }
        Command::AddText { name, file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            let id = registry.add_text_source(&name, &text);
            if !text.is_empty() && registry.get_stored_text(&id).is_empty() {
                terminal::print_info("warning: storage is full; the text was not saved")?;
            }
            println!("{id}");
        }
        Command::Remove { id } => {
            if !registry.remove_custom_source(&id) {
                bail!("'{id}' is not a user-added source");
            }
            terminal::print_info(&format!("removed {id}"))?;
        }
        Command::Rename { id, name } => {
            if !registry.rename_custom_source(&id, &name) {
                bail!("cannot rename '{id}': not a user-added source");
            }
            terminal::print_info(&format!("renamed {id}"))?;
        }
        Command::Text { id } => match registry.descriptor(&id) {
            Some(source) if source.kind == SourceKind::PastedText => {
                print!("{}", registry.get_stored_text(&id));
            }
            Some(source) => bail!("'{id}' is a {} source, not pasted text", source.kind),
            None => bail!("unknown source '{id}'"),
        },
    }
    Ok(())
}
