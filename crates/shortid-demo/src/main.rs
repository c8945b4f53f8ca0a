//! Demo: declare a model with a generated `id_xxxxxxx` primary key, save a
//! few records into an in-memory store and print them with their form view.

mod model;

use clap::Parser;
use model::{DemoModel, configure_id};
use shortid::{
    config::ShortIdConfig,
    db::{Db, store::MemoryStore},
    error::{Error, ErrorClass, ErrorOrigin},
    form::FormField,
    model::Model,
    obs::metrics_report,
};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

///
/// Args
///

#[derive(Debug, Parser)]
#[command(name = "shortid-demo", about = "Create demo records with generated short ids")]
struct Args {
    /// Number of records to create.
    #[arg(long, default_value_t = 3)]
    count: usize,

    /// Base name for created records.
    #[arg(long, default_value = "record")]
    name: String,

    /// TOML file overriding the id field configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible identifiers.
    #[arg(long, env = "SHORTID_SEED")]
    seed: Option<u64>,

    /// Print records, form and metrics as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(class = %err.class, origin = %err.origin, "{}", err.message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    if let Some(path) = &args.config {
        let config = load_config(path)?;
        info!(
            path = %path.display(),
            prefix = %config.prefix,
            length = config.length,
            "loaded id config"
        );

        if !configure_id(config) {
            return Err(Error::new(
                ErrorClass::Config,
                ErrorOrigin::Interface,
                "id configuration already set",
            ));
        }
    }

    let model = Model::<DemoModel>::declare()?;

    let mut db = match args.seed {
        Some(seed) => Db::with_seed(MemoryStore::new(), seed),
        None => Db::new(MemoryStore::new()),
    };
    db.register(&model)?;

    let batch = (1..=args.count).map(|i| DemoModel::named(format!("{} {i}", args.name)));
    let records = db.save(&model).insert_many(batch)?;
    info!(count = records.len(), "records saved");

    let form = records.first().map(|record| model.form(record));

    if args.json {
        print_json(&records, form.as_deref())
    } else {
        print_text(&records, form.as_deref());
        Ok(())
    }
}

fn load_config(path: &Path) -> Result<ShortIdConfig, Error> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        Error::new(
            ErrorClass::Config,
            ErrorOrigin::Interface,
            format!("{}: {err}", path.display()),
        )
    })?;

    Ok(ShortIdConfig::from_toml_str(&text)?)
}

fn print_text(records: &[DemoModel], form: Option<&[FormField]>) {
    for record in records {
        println!("{}  {}", record.id.as_deref().unwrap_or("-"), record.name);
    }

    if let Some(form) = form {
        println!();
        for field in form {
            let access = if field.disabled { "read-only" } else { "editable" };
            println!(
                "{:<6} {:<10} {}",
                field.label,
                access,
                field.value.as_deref().unwrap_or("")
            );
        }
    }
}

fn print_json(records: &[DemoModel], form: Option<&[FormField]>) -> Result<(), Error> {
    let out = serde_json::json!({
        "records": records,
        "form": form,
        "metrics": metrics_report(),
    });

    let text = serde_json::to_string_pretty(&out).map_err(|err| {
        Error::new(ErrorClass::Invalid, ErrorOrigin::Interface, err.to_string())
    })?;
    println!("{text}");

    Ok(())
}
