use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

use feedly::credentials::StoredCredentials;
use feedly::models::{ContentType, StreamOptions, UnreadCountOptions};
use feedly::opml::{count_by_category, parse_opml, OpmlFeed};
use feedly::{parse_authentication_response, Config, FeedlyClient, Session};

/// Get the config directory path (~/.config/feedly/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("feedly");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "feedly", about = "Command line client for the Feedly Cloud API")]
struct Args {
    /// Config file (defaults to ~/.config/feedly/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the URL that starts the OAuth flow
    AuthUrl {
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        state: Option<String>,
        /// Open the URL in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Finish the OAuth flow with the URI Feedly redirected to
    Login {
        callback_uri: String,
    },
    /// Exchange the stored refresh token for a new access token
    Refresh,
    /// Revoke the stored refresh token and forget all credentials
    Revoke,
    /// Show the user profile
    Profile,
    /// List subscriptions
    Subscriptions,
    /// List categories
    Categories,
    /// List tags
    Tags,
    /// Show unread counts
    Unread,
    /// Show one page of a stream
    Stream {
        /// Stream id, or a bare category/tag label
        id: String,
        #[arg(long, value_enum, default_value_t = StreamKind::Category)]
        kind: StreamKind,
        #[arg(long)]
        count: Option<u32>,
        #[arg(long)]
        continuation: Option<String>,
        #[arg(long)]
        unread_only: bool,
    },
    /// Export subscriptions as OPML (to stdout when no file is given)
    ExportOpml {
        file: Option<PathBuf>,
    },
    /// Import subscriptions from an OPML file
    ImportOpml {
        file: PathBuf,
    },
    /// Mark entries as read
    MarkRead {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StreamKind {
    Feed,
    Category,
    Tag,
}

impl From<StreamKind> for ContentType {
    fn from(kind: StreamKind) -> Self {
        match kind {
            StreamKind::Feed => ContentType::Feed,
            StreamKind::Category => ContentType::Category,
            StreamKind::Tag => ContentType::Tag,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    ensure_config_dir(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let credentials_path = config_dir.join("credentials.toml");

    let session = Session::new();
    let client =
        FeedlyClient::new(&config, session.clone()).context("Failed to create Feedly client")?;

    match args.command {
        Command::AuthUrl { scope, state, open } => {
            let url = client.authentication_url(scope.as_deref(), state.as_deref())?;
            println!("{url}");
            if open {
                open::that(url.as_str()).context("Failed to open browser")?;
            }
        }
        Command::Login { callback_uri } => {
            let response = parse_authentication_response(&callback_uri)
                .context("Callback URI could not be parsed")?;
            let Some(code) = response.code else {
                bail!(
                    "Authorization was not granted: {}",
                    response.error.as_deref().unwrap_or("no code in callback URI")
                );
            };
            let token = client.request_access_token(&code).await?;
            let stored = StoredCredentials::from_token_response(&token, None, Utc::now());
            stored
                .save(&credentials_path)
                .context("Failed to save credentials")?;
            println!("Logged in as {}", stored.user_id);
        }
        Command::Refresh => {
            let stored = load_credentials(&credentials_path)?;
            let Some(refresh_token) = stored.refresh_token.clone() else {
                bail!("No refresh token stored; run `feedly login` again");
            };
            let token = client.request_refresh_token(&refresh_token).await?;
            let refreshed =
                StoredCredentials::from_token_response(&token, Some(refresh_token), Utc::now());
            refreshed
                .save(&credentials_path)
                .context("Failed to save credentials")?;
            println!("Access token refreshed");
        }
        Command::Revoke => {
            let stored = load_credentials(&credentials_path)?;
            if let Some(refresh_token) = &stored.refresh_token {
                client.revoke_refresh_token(refresh_token).await?;
            }
            StoredCredentials::clear(&credentials_path).context("Failed to remove credentials")?;
            println!("Credentials revoked");
        }
        Command::Profile => {
            activate(&session, &credentials_path)?;
            let profile = client.profile().await?;
            if args.json {
                return print_json(&profile);
            }
            println!("{}", profile.display_name().unwrap_or_else(|| profile.id.clone()));
            if let Some(email) = &profile.email {
                println!("{email}");
            }
        }
        Command::Subscriptions => {
            activate(&session, &credentials_path)?;
            let subscriptions = client.subscriptions().await?;
            if args.json {
                return print_json(&subscriptions);
            }
            for sub in &subscriptions {
                let labels: Vec<&str> = sub.categories.iter().map(|c| c.label.as_str()).collect();
                println!(
                    "{}\t{}\t{}",
                    sub.title.as_deref().unwrap_or("(untitled)"),
                    sub.id,
                    labels.join(",")
                );
            }
        }
        Command::Categories => {
            activate(&session, &credentials_path)?;
            let categories = client.categories().await?;
            if args.json {
                return print_json(&categories);
            }
            for category in &categories {
                println!("{}\t{}", category.label, category.id);
            }
        }
        Command::Tags => {
            activate(&session, &credentials_path)?;
            let tags = client.tags().await?;
            if args.json {
                return print_json(&tags);
            }
            for tag in &tags {
                println!("{}\t{}", tag.label.as_deref().unwrap_or("-"), tag.id);
            }
        }
        Command::Unread => {
            activate(&session, &credentials_path)?;
            let counts = client.unread_counts(&UnreadCountOptions::default()).await?;
            if args.json {
                return print_json(&counts);
            }
            for count in counts.iter().filter(|c| c.count > 0) {
                println!("{:>6}  {}", count.count, count.id);
            }
        }
        Command::Stream {
            id,
            kind,
            count,
            continuation,
            unread_only,
        } => {
            activate(&session, &credentials_path)?;
            let options = StreamOptions {
                count,
                continuation,
                unread_only: unread_only.then_some(true),
                ..Default::default()
            };
            let page = client.stream_entries(kind.into(), &id, &options).await?;
            if args.json {
                return print_json(&page);
            }
            for entry in &page.items {
                let date = entry
                    .published
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!(
                    "{:10}  {}  {}",
                    date,
                    entry.title.as_deref().unwrap_or("(untitled)"),
                    entry.id
                );
            }
            if let Some(next) = &page.continuation {
                println!("\nMore entries: --continuation {next}");
            }
        }
        Command::ExportOpml { file } => {
            activate(&session, &credentials_path)?;
            let document = client.export_opml().await?;
            match file {
                Some(path) => {
                    std::fs::write(&path, &document)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    match parse_opml(&document) {
                        Ok(feeds) => {
                            println!("Exported {} feeds to {}", feeds.len(), path.display())
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Exported document could not be summarized");
                            println!("Exported subscriptions to {}", path.display());
                        }
                    }
                }
                None => print!("{document}"),
            }
        }
        Command::ImportOpml { file } => {
            activate(&session, &credentials_path)?;
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read import file: {}", file.display()))?;
            let feeds = parse_opml(&content)
                .with_context(|| format!("{} is not a valid OPML file", file.display()))?;
            client.import_opml(&content).await?;
            if args.json {
                return print_json(&feeds);
            }
            print_import_summary(&feeds, &file);
        }
        Command::MarkRead { ids } => {
            activate(&session, &credentials_path)?;
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            client.mark_entries_as_read(&ids).await?;
            println!("Marked {} entries as read", ids.len());
        }
    }

    Ok(())
}

/// SEC-007: Create the config directory with user-only access.
fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
        tracing::info!(path = %config_dir.display(), "Created config directory");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }
    Ok(())
}

fn load_credentials(path: &Path) -> Result<StoredCredentials> {
    StoredCredentials::load(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .context("Not logged in; run `feedly auth-url` and `feedly login` first")
}

/// Install the stored access token on the session.
fn activate(session: &Session, credentials_path: &Path) -> Result<()> {
    let stored = load_credentials(credentials_path)?;
    if stored.is_expired(Utc::now()) {
        tracing::warn!("Stored access token has expired; run `feedly refresh`");
    }
    session.activate(stored.access_token, stored.user_id);
    Ok(())
}

fn print_import_summary(feeds: &[OpmlFeed], file: &Path) {
    println!("Imported {} feeds from {}", feeds.len(), file.display());
    for (category, count) in count_by_category(feeds) {
        println!("{:>6}  {}", count, category.unwrap_or("(no category)"));
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{output}");
    Ok(())
}
