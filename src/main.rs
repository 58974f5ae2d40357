use anyhow::{Context, Result};
use clap::Parser;
use csvsync::{ingest, options, sync, Cli, DuckTableStore};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) parse args & CSV ─────────────────────────────────────────
    let cli = Cli::parse();
    let id = cli.table_identity();

    let data = ingest::from_path(&cli.csv_path)
        .with_context(|| format!("loading CSV from {}", cli.csv_path.display()))?;
    info!(
        columns = data.columns().len(),
        rows = data.rows().len(),
        "parsed CSV"
    );

    // ─── 3) credentials & connection ─────────────────────────────────
    let credentials = options::prompt_credentials().context("reading database credentials")?;

    let mut store = match DuckTableStore::connect(&credentials) {
        Ok(store) => store,
        Err(err) => {
            info!(error = %err, "connection failed");
            eprintln!("Couldn't connect to your database.");
            std::process::exit(1);
        }
    };

    // ─── 4) create or append ─────────────────────────────────────────
    let outcome = sync::create_or_append(&mut store, &id, &data)
        .with_context(|| format!("loading {} into {}", cli.csv_path.display(), id))?;
    info!(table = %id, outcome = ?outcome, "done");

    store.close().context("closing the database connection")?;
    Ok(())
}
