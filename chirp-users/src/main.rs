//! chirp-users - Manage the Chirp user directory

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use libchirp::config::resolve_db_path;
use libchirp::{filter_user_for_client, ApiError, ChirpError, Config, Database, Result, User};

#[derive(Parser, Debug)]
#[command(name = "chirp-users")]
#[command(version, about = "Manage the Chirp user directory")]
#[command(long_about = r#"Manage the user directory that backs profiles and post authors.

EXAMPLES:
    # Register a user (or update an existing id)
    chirp-users add --username alice --image-url https://img.example.com/alice.png

    # Keep a known id, e.g. the one your auth proxy sends
    chirp-users add --id user_2a9f --username bob --image-url https://img.example.com/bob.png

    # List users as public profiles
    chirp-users list
    chirp-users list --format json | jq '.[].username'

EXIT CODES:
    0 - Success
    1 - Error (configuration, database)
    3 - Invalid input
"#)]
struct Cli {
    /// Path to the configuration file (defaults to $CHIRP_CONFIG or ~/.config/chirp/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a user, or replace the record with the same id
    Add(AddArgs),

    /// List users by their public profile fields
    List {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(clap::Args, Debug)]
struct AddArgs {
    /// User id (generated when omitted)
    #[arg(long)]
    id: Option<String>,

    /// Handle shown as @username; must be unique
    #[arg(short, long)]
    username: String,

    /// Avatar URL
    #[arg(long)]
    image_url: String,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    /// Private metadata as a JSON document
    #[arg(long, value_name = "JSON")]
    metadata: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    libchirp::logging::init_default(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let db_path = resolve_db_path(&config.database.path)?;
    let db = Database::new(&db_path.to_string_lossy()).await?;

    match cli.command {
        Command::Add(args) => add_user(&db, args).await,
        Command::List { format } => list_users(&db, format).await,
    }
}

async fn add_user(db: &Database, args: AddArgs) -> Result<()> {
    let username = validate_username(&args.username)?;

    if let Some(metadata) = &args.metadata {
        serde_json::from_str::<serde_json::Value>(metadata)
            .map_err(|e| ChirpError::InvalidInput(format!("metadata is not valid JSON: {}", e)))?;
    }

    if let Some(existing) = db.get_user_by_username(username).await? {
        if args.id.as_deref() != Some(existing.id.as_str()) {
            return Err(ChirpError::InvalidInput(format!(
                "username @{} is taken by {}",
                username, existing.id
            )));
        }
    }

    let id = args
        .id
        .unwrap_or_else(|| format!("user_{}", uuid::Uuid::new_v4().simple()));

    let user = User {
        id,
        username: username.to_string(),
        profile_image_url: args.image_url,
        email_address: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        private_metadata: args.metadata,
        created_at: chrono::Utc::now(),
    };

    db.upsert_user(&user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "user saved");

    println!("{}", user.id);
    Ok(())
}

async fn list_users(db: &Database, format: OutputFormat) -> Result<()> {
    let authors: Vec<_> = db.list_users().await?.iter().map(filter_user_for_client).collect();

    match format {
        OutputFormat::Json => {
            println!("{}", to_json(&authors)?);
        }
        OutputFormat::Text => {
            for author in &authors {
                println!("{}\t@{}\t{}", author.id, author.username, author.profile_image_url);
            }
        }
    }

    Ok(())
}

/// Encoding failures are internal errors, not bad input
fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ChirpError::Api(ApiError::Internal(format!("failed to encode JSON: {}", e)))
    })
}

/// Usernames are stored bare; a single leading '@' is accepted and dropped
fn validate_username(raw: &str) -> Result<&str> {
    let username = raw.trim();
    let username = username.strip_prefix('@').unwrap_or(username);

    if username.is_empty() {
        return Err(ChirpError::InvalidInput("username cannot be empty".to_string()));
    }
    if username.contains(|c: char| c.is_whitespace() || c == '/' || c == '@') {
        return Err(ChirpError::InvalidInput(format!(
            "username '{}' may not contain whitespace, '/' or '@'",
            username
        )));
    }

    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("alice").unwrap(), "alice");
        assert_eq!(validate_username("@alice").unwrap(), "alice");
        assert_eq!(validate_username("  bob ").unwrap(), "bob");
    }

    #[test]
    fn test_validate_username_rejects() {
        for bad in ["", "@", "   ", "a b", "a/b", "@@alice"] {
            let err = validate_username(bad).unwrap_err();
            assert_eq!(err.exit_code(), 3, "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_to_json_failure_is_general_error() {
        // Maps with non-string keys cannot be encoded as JSON objects
        let mut unencodable = std::collections::HashMap::new();
        unencodable.insert((1u8, 2u8), 3u8);

        let err = to_json(&unencodable).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("failed to encode JSON"));
    }

    #[test]
    fn test_to_json_authors() {
        let json = to_json(&[libchirp::Author {
            id: "user_1".to_string(),
            username: "alice".to_string(),
            profile_image_url: "https://img.example.com/alice.png".to_string(),
        }])
        .unwrap();
        assert!(json.contains(r#""username": "alice""#));
    }
}
