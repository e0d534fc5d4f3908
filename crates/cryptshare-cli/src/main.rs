//! cryptshare: encrypted file sharing client
//!
//! Commands:
//!   encrypt <file>       - encrypt a local file and register it on the ledger
//!   decrypt <file-id>    - look up, decrypt, and save a registered file
//!   list                 - list file IDs registered by the connected account
//!   config show          - display current configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use cryptshare_backend::HttpEncryptionService;
use cryptshare_core::config::CryptshareConfig;
use cryptshare_core::CryptshareError;
use cryptshare_engine::{decrypt_and_download, password_strength, Upload};
use cryptshare_ledger::{JsonRpcLedger, LedgerRegistry};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cryptshare",
    version,
    about = "Encrypted file sharing with an on-chain metadata registry",
    long_about = "cryptshare: encrypt files under a password via the backend \
                  encryption service and register them on the ledger registry \
                  for later retrieval by file ID"
)]
struct Cli {
    /// Path to cryptshare.toml configuration file
    #[arg(
        long,
        short = 'c',
        env = "CRYPTSHARE_CONFIG",
        default_value = "~/.config/cryptshare/config.toml"
    )]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CRYPTSHARE_LOG", default_value = "warn")]
    log: String,

    /// Log format (json, text)
    #[arg(long, env = "CRYPTSHARE_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a local file and register its metadata on the ledger
    Encrypt {
        /// File to encrypt
        file: PathBuf,
        /// Encryption password (prompted interactively when omitted)
        #[arg(long, short = 'p', env = "CRYPTSHARE_PASSWORD")]
        password: Option<String>,
    },

    /// Decrypt a registered file and save it locally
    Decrypt {
        /// File ID returned at encrypt time
        file_id: String,
        /// Directory to save the decrypted file into
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,
        /// Decryption password (prompted interactively when omitted)
        #[arg(long, short = 'p', env = "CRYPTSHARE_PASSWORD")]
        password: Option<String>,
    },

    /// List file IDs registered by the connected account
    List,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log, &cli.log_format);

    let config_path = expand_tilde(&cli.config);
    let config = load_config(&config_path).await?;

    match cli.command {
        Commands::Encrypt { file, password } => cmd_encrypt(&config, &file, password).await,
        Commands::Decrypt {
            file_id,
            out,
            password,
        } => cmd_decrypt(&config, &file_id, &out, password).await,
        Commands::List => cmd_list(&config).await,
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &config_path),
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

async fn load_config(path: &Path) -> Result<CryptshareConfig> {
    if path.exists() {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config: {}", path.display()))
    } else {
        Ok(CryptshareConfig::default())
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}

/// Expand `~` in path to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s.starts_with("~/") {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(format!("{}/{}", home, &s[2..]))
    } else {
        path.to_path_buf()
    }
}

// ── Capability acquisition ────────────────────────────────────────────────────

async fn connect_ledger(config: &CryptshareConfig) -> Result<JsonRpcLedger> {
    JsonRpcLedger::connect(&config.ledger.rpc_url, &config.ledger.contract_address)
        .await
        .with_context(|| format!("connecting to registry node at {}", config.ledger.rpc_url))
}

fn resolve_password(flag: Option<String>, prompt: &str) -> Result<String> {
    match flag {
        Some(p) => Ok(p),
        None => rpassword::prompt_password(prompt).context("reading password"),
    }
}

// ── Progress helpers ──────────────────────────────────────────────────────────

fn make_spinner(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{prefix:.bold} {spinner} {msg}").unwrap());
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ── `cryptshare encrypt` ──────────────────────────────────────────────────────

async fn cmd_encrypt(
    config: &CryptshareConfig,
    file: &Path,
    password: Option<String>,
) -> Result<()> {
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("path has no filename: {}", file.display()))?;

    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("reading: {}", file.display()))?;

    let password = resolve_password(password, "Encryption password: ")?;
    println!(
        "Encrypting {} ({}) — password strength: {}",
        filename,
        fmt_bytes(bytes.len() as u64),
        password_strength(&password).label()
    );

    let backend = HttpEncryptionService::new(&config.backend.endpoint);
    let ledger = connect_ledger(config).await?;
    info!(account = %ledger.account(), "registry account connected");

    let pb = make_spinner("encrypt");
    let pb_clone = pb.clone();
    let progress: cryptshare_engine::ProgressFn =
        Box::new(move |msg| pb_clone.set_message(msg.to_string()));

    let mut upload = Upload::new(&backend, Some(&ledger));
    let result = upload
        .run(&filename, bytes, &password, Some(&progress))
        .await;
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            println!("File encrypted and registered.");
            println!("  file ID: {}", report.file_id);
            println!("  chunks:  {}", report.num_chunks);
            println!("  tx:      {}", report.tx.transaction_hash);
            println!();
            println!("Keep the file ID and password — both are required to decrypt.");
            Ok(())
        }
        Err(e @ CryptshareError::Registration { .. }) => {
            eprintln!(
                "The encrypted blob was stored, but the ledger registration did not \
                 complete; the file ID is not retrievable. Re-run the encrypt command."
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

// ── `cryptshare decrypt` ──────────────────────────────────────────────────────

async fn cmd_decrypt(
    config: &CryptshareConfig,
    file_id: &str,
    out: &Path,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password, "Decryption password: ")?;

    let backend = HttpEncryptionService::new(&config.backend.endpoint);
    let ledger = connect_ledger(config).await?;

    let pb = make_spinner("decrypt");
    let pb_clone = pb.clone();
    let progress: cryptshare_engine::ProgressFn =
        Box::new(move |msg| pb_clone.set_message(msg.to_string()));

    let artifact = decrypt_and_download(
        Some(&ledger),
        &backend,
        file_id,
        &password,
        out,
        Some(&progress),
    )
    .await;
    pb.finish_and_clear();

    let artifact = artifact?;
    println!("File decrypted.");
    println!("  saved:  {}", artifact.path.display());
    println!("  bytes:  {}", fmt_bytes(artifact.bytes));

    Ok(())
}

// ── `cryptshare list` ─────────────────────────────────────────────────────────

async fn cmd_list(config: &CryptshareConfig) -> Result<()> {
    let ledger = connect_ledger(config).await?;

    let files = ledger.user_files().await?;
    if files.is_empty() {
        println!("No files registered by {}", ledger.account());
        return Ok(());
    }

    println!("Files registered by {}:", ledger.account());
    for file_id in files {
        println!("  {file_id}");
    }
    Ok(())
}

// ── `cryptshare config show` ──────────────────────────────────────────────────

fn cmd_config_show(config: &CryptshareConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!(
            "# Configuration: defaults (no file at {})",
            config_path.display()
        );
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}

// ── Utilities ─────────────────────────────────────────────────────────────────

fn fmt_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
