use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use contacts::api::rest::routes;
use contacts::contract::model::{Contact, ContactInput};
use contacts::domain::error::DomainError;
use contacts::domain::service::{Service, ServiceConfig};
use contacts::infra::storage::migrations::Migrator;
use contacts::infra::storage::sea_orm_repo::SeaOrmContactsRepository;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Appends `mode=rwc` so a missing database file is created.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    match query {
        Some(q) if q.contains("mode=") => {
            out.push('?');
            out.push_str(q);
        }
        Some(q) => {
            out.push('?');
            out.push_str(q);
            out.push_str("&mode=rwc");
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

/// Contacts Server - contact management service
#[derive(Parser)]
#[command(name = "contacts-server")]
#[command(about = "Contacts Server - contact management service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Create a contact, or update the one carrying the phone number
    Upsert {
        name: String,
        phone_number: String,
        email: String,
    },
    /// Read and display a single contact by phone number or ID
    Read { identifier: String },
    /// Delete a contact by phone number or ID
    Delete { identifier: String },
    /// Insert a handful of sample contacts
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    if let Some(path) = cli.config.as_deref() {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
        Commands::Upsert {
            name,
            phone_number,
            email,
        } => {
            let service = build_service(&config, &args).await?;
            upsert_contact(&service, name, phone_number, email).await
        }
        Commands::Read { identifier } => {
            let service = build_service(&config, &args).await?;
            read_contact(&service, &identifier).await
        }
        Commands::Delete { identifier } => {
            let service = build_service(&config, &args).await?;
            delete_contact(&service, &identifier).await
        }
        Commands::Seed => {
            let service = build_service(&config, &args).await?;
            seed_contacts(&service).await
        }
    }
}

/// Connect to the configured database and bring the schema up to date.
async fn connect_database(config: &AppConfig, args: &CliArgs) -> Result<DatabaseConnection> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database is not configured"))?;

    // Base dir for resolving relative sqlite paths (already absolute & created)
    let base_dir = PathBuf::from(&config.server.home_dir);

    // Use URL from config; override with in-memory SQLite when --mock is set
    let mut dsn = if args.mock {
        "sqlite::memory:".to_string()
    } else {
        db_config.url.trim().to_owned()
    };
    if dsn.is_empty() {
        bail!("Database URL not configured");
    }

    // Absolutize sqlite DSNs to avoid cwd issues
    if dsn.starts_with("sqlite:") {
        dsn = absolutize_sqlite_dsn(&dsn, &base_dir, true)?;
    }

    let mut opts = ConnectOptions::new(dsn.clone());
    if dsn == "sqlite::memory:" {
        // A pooled in-memory database is one database per connection.
        opts.max_connections(1);
    } else if let Some(max_conns) = db_config.max_conns {
        opts.max_connections(max_conns);
    }

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database: {dsn}"))?;

    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    Ok(db)
}

async fn build_service(config: &AppConfig, args: &CliArgs) -> Result<Arc<Service>> {
    let db = connect_database(config, args).await?;
    let repo = SeaOrmContactsRepository::new(db);
    Ok(Arc::new(Service::new(
        Arc::new(repo),
        ServiceConfig::default(),
    )))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Contacts server starting");

    let service = build_service(&config, &args).await?;
    let app = routes::router(service).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // AppConfig::load_* already normalized & created home_dir
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

/// Resolve a CLI identifier: a UUID first, then the unique phone number.
async fn find_by_identifier(service: &Service, identifier: &str) -> Result<Option<Contact>> {
    if let Ok(id) = Uuid::parse_str(identifier) {
        match service.get_contact(id).await {
            Ok(contact) => return Ok(Some(contact)),
            Err(DomainError::ContactNotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(service.find_by_phone_number(identifier).await?)
}

async fn upsert_contact(
    service: &Service,
    name: String,
    phone_number: String,
    email: String,
) -> Result<()> {
    let input = ContactInput {
        name,
        phone_number,
        email,
    };

    let existing = service
        .find_by_phone_number(&input.phone_number)
        .await
        .context("Error upserting contact")?;

    match existing {
        Some(contact) => {
            let updated = service
                .update_contact(contact.id, input)
                .await
                .context("Error upserting contact")?;
            println!("Contact {} updated successfully!", updated.name);
        }
        None => {
            let created = service
                .create_contact(input)
                .await
                .context("Error upserting contact")?;
            println!("Contact {} created successfully!", created.name);
        }
    }

    Ok(())
}

async fn read_contact(service: &Service, identifier: &str) -> Result<()> {
    let contact = find_by_identifier(service, identifier)
        .await
        .context("Error reading contact")?;

    let Some(contact) = contact else {
        bail!("Contact with identifier '{identifier}' not found.");
    };

    println!("Contact Details:");
    println!("  ID:           {}", contact.id);
    println!("  Name:         {}", contact.name);
    println!("  Phone Number: {}", contact.phone_number);
    println!("  Email:        {}", contact.email);
    println!("  Created At:   {}", contact.created_at);
    println!("  Updated At:   {}", contact.updated_at);

    Ok(())
}

async fn delete_contact(service: &Service, identifier: &str) -> Result<()> {
    let contact = find_by_identifier(service, identifier)
        .await
        .context("Error deleting contact")?;

    let Some(contact) = contact else {
        bail!("Contact with identifier '{identifier}' not found.");
    };

    service
        .delete_contact(contact.id)
        .await
        .context("Error deleting contact")?;

    println!(
        "Contact '{}' (ID: {}) deleted successfully!",
        contact.name, contact.id
    );

    Ok(())
}

async fn seed_contacts(service: &Service) -> Result<()> {
    let samples = [
        ("Alice Johnson", "+61412345678", "alice.johnson@example.com"), // Australian mobile
        ("Bob Williams", "+64219876543", "bob.williams@company.net"),   // New Zealand mobile
        ("Charlie Brown", "+61298765432", "charlie@domain.org"),        // Australian landline
    ];

    for (name, phone_number, email) in samples {
        service
            .create_contact(ContactInput {
                name: name.to_string(),
                phone_number: phone_number.to_string(),
                email: email.to_string(),
            })
            .await
            .context("Error seeding contacts")?;
        println!("Created contact: {name}");
    }

    println!("{} contacts seeded successfully!", samples.len());
    Ok(())
}
