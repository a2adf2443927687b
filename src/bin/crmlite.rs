use clap::{Parser, Subcommand};
use crmlite::Db;
use crmlite::import::ImportOptions;
use crmlite::service::{self, ListQuery};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct AppConfig {
    db_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    log_level: Option<String>,
}

fn load_config(cli_cfg: Option<PathBuf>) -> AppConfig {
    // Precedence: CLI > env > config files > defaults
    let mut cfg = AppConfig::default();
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = &cli_cfg {
        paths.push(p.clone());
    }
    if let Ok(p) = std::env::var("CRMLITE_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("crmlite.toml"));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("crmlite.toml"));
    }
    for p in paths {
        if p.exists()
            && let Ok(s) = std::fs::read_to_string(&p)
            && let Ok(file_cfg) = toml::from_str::<AppConfig>(&s)
        {
            if cfg.db_path.is_none() {
                cfg.db_path = file_cfg.db_path;
            }
            if cfg.log_dir.is_none() {
                cfg.log_dir = file_cfg.log_dir;
            }
            if cfg.log_level.is_none() {
                cfg.log_level = file_cfg.log_level;
            }
        }
    }
    if cfg.db_path.is_none()
        && let Ok(s) = std::env::var("CRMLITE_DB")
    {
        cfg.db_path = Some(PathBuf::from(s));
    }
    if cfg.log_dir.is_none()
        && let Ok(s) = std::env::var("CRMLITE_LOG_DIR")
    {
        cfg.log_dir = Some(PathBuf::from(s));
    }
    if cfg.log_level.is_none()
        && let Ok(s) = std::env::var("CRMLITE_LOG_LEVEL")
    {
        cfg.log_level = Some(s);
    }
    cfg
}

#[derive(Parser, Debug)]
#[command(name = "crmlite", version, about = "CRM records/users backend CLI", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override database directory (takes precedence over config/env)
    #[arg(long)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Import a CSV of record rows (or user rows with --users)")]
    Import {
        #[arg(help = "Path to the CSV file")]
        file: PathBuf,
        #[arg(long, help = "Import into the users collection instead of records")]
        users: bool,
        #[arg(long, help = "Field delimiter (single character)", default_value = ",")]
        delimiter: String,
        #[arg(long, help = "Fail on the first bad row instead of skipping it")]
        strict: bool,
    },
    #[command(about = "List records: paginated, filtered, enriched with user profiles")]
    List {
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        limit: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "min-price")]
        min_price: Option<String>,
        #[arg(long = "max-price")]
        max_price: Option<String>,
    },
    #[command(about = "Fetch one record plus all records sharing its email")]
    Get {
        id: String,
    },
    #[command(about = "Create a record from a JSON body")]
    Create {
        #[arg(help = "Record JSON; omit and pass --stdin to read from stdin")]
        json: Option<String>,
        #[arg(long, help = "Read the JSON body from stdin")]
        stdin: bool,
    },
    #[command(about = "Partially update a record (empty-valued fields are ignored)")]
    Update {
        id: String,
        json: String,
    },
    #[command(about = "Overwrite a record's notes")]
    Note {
        id: String,
        note: String,
    },
    #[command(about = "Delete a record")]
    Delete {
        id: String,
    },
    #[command(about = "List users: paginated and filtered, no enrichment")]
    Users {
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        limit: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    #[command(name = "user-email", about = "Look up a user by either email address")]
    UserEmail {
        email: String,
    },
    #[command(about = "Print collection counts")]
    Info,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli, cfg: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db_dir = cli
        .db
        .or_else(|| cfg.db_path.clone())
        .unwrap_or_else(|| PathBuf::from("crmlite_data"));
    let db = Db::open(&db_dir)?;

    match cli.command {
        Commands::Import { file, users, delimiter, strict } => {
            let opts = ImportOptions {
                delimiter: *delimiter.as_bytes().first().unwrap_or(&b','),
                skip_errors: !strict,
                ..ImportOptions::default()
            };
            let report = if users {
                crmlite::import::import_users_file(&db, &file, &opts)?
            } else {
                crmlite::import::import_records_file(&db, &file, &opts)?
            };
            db.flush()?;
            println!("imported {} rows, skipped {}", report.inserted, report.skipped);
        }
        Commands::List { page, limit, search, min_price, max_price } => {
            let q = ListQuery { page, limit, search, min_price, max_price };
            print_json(&service::list_records(&db, &q)?)?;
        }
        Commands::Get { id } => {
            print_json(&service::record_with_siblings(&db, &id)?)?;
        }
        Commands::Create { json, stdin } => {
            let payload = if stdin {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                json.ok_or("missing JSON body (or pass --stdin)")?
            };
            let body: serde_json::Value = serde_json::from_str(&payload)?;
            let created = service::create_record(&db, &body)?;
            db.flush()?;
            print_json(&created)?;
        }
        Commands::Update { id, json } => {
            let body: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&json)?;
            let updated = service::update_record(&db, &id, &body)?;
            db.flush()?;
            print_json(&updated)?;
        }
        Commands::Note { id, note } => {
            let updated = service::update_notes(&db, &id, &note)?;
            db.flush()?;
            println!("note updated");
            print_json(&updated)?;
        }
        Commands::Delete { id } => {
            service::delete_record(&db, &id)?;
            db.flush()?;
            println!("record deleted");
        }
        Commands::Users { page, limit, search } => {
            let q = ListQuery { page, limit, search, ..ListQuery::default() };
            print_json(&service::list_users(&db, &q)?)?;
        }
        Commands::UserEmail { email } => {
            print_json(&service::user_by_email(&db, &email)?)?;
        }
        Commands::Info => {
            println!("records: {}", db.records().len());
            println!("users: {}", db.users().len());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.clone());
    if std::env::var("CRMLITE_LOG_DIR").is_ok() || std::env::var("CRMLITE_LOG_LEVEL").is_ok() {
        crmlite::logger::configure_from_env();
    } else {
        let _ = crmlite::logger::configure_logging(
            cfg.log_dir.as_deref(),
            cfg.log_level.as_deref(),
            None,
        );
    }
    if let Err(e) = run(cli, &cfg) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
