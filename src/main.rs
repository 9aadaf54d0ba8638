//! rsaio CLI application.
//!
//! This binary inspects, exports, imports and verifies RSA key pairs stored
//! as `public.key` / `private.key` in a key directory.

use clap::{Parser, Subcommand};
use rsaio::config::Config;
use rsaio::crypto::encoding::encode_base64;
use rsaio::crypto::pem::{keypair_from_private_pem, private_key_to_pem, public_key_to_pem};
use rsaio::error::{Result, RsaIoError};
use rsaio::storage::{KeyPairStore, WriteMode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "rsaio")]
#[command(about = "Persist and inspect RSA key pairs stored as base64 key files", long_about = None)]
struct Cli {
    /// Configuration file (default: ./rsaio.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the key pair stored in a key directory
    Inspect {
        /// Key directory (default: storage.key_directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Export the stored key pair
    Export {
        /// Output format: pem or base64
        #[arg(long, default_value = "pem")]
        format: String,

        /// Optional output directory (if not specified, prints to stdout)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Key directory (default: storage.key_directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Import a PKCS#8 PEM private key into a key directory
    Import {
        /// PEM file holding a "PRIVATE KEY" document
        #[arg(long)]
        private_pem: PathBuf,

        /// Replace key files through a temporary file and rename
        #[arg(long)]
        atomic: bool,

        /// Key directory (default: storage.key_directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Check that public.key belongs to private.key
    Verify {
        /// Key directory (default: storage.key_directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging.level);
    debug!("Configuration loaded: {:?}", config);

    match cli.command {
        Commands::Inspect { dir } => handle_inspect(&open_store(&config, dir)),
        Commands::Export {
            format,
            output_dir,
            dir,
        } => handle_export(&open_store(&config, dir), &format, output_dir.as_deref()),
        Commands::Import {
            private_pem,
            atomic,
            dir,
        } => {
            let mut options = config.store_options();
            if atomic {
                options = options.with_write_mode(WriteMode::Atomic);
            }
            let directory = dir.unwrap_or_else(|| config.storage.key_directory.clone());
            handle_import(&KeyPairStore::with_options(directory, options), &private_pem)
        }
        Commands::Verify { dir } => handle_verify(&open_store(&config, dir)),
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_store(config: &Config, dir: Option<PathBuf>) -> KeyPairStore {
    let directory = dir.unwrap_or_else(|| config.storage.key_directory.clone());
    KeyPairStore::with_options(directory, config.store_options())
}

fn handle_inspect(store: &KeyPairStore) -> Result<()> {
    let keypair = store.load()?;

    println!("Key directory: {}", store.directory().display());
    println!("Modulus: {} bits", keypair.modulus_bits());
    println!("Public exponent: {}", keypair.public_exponent());
    println!(
        "Consistent: {}",
        if keypair.is_consistent() { "yes" } else { "no" }
    );
    println!("Public key: {}", encode_base64(&keypair.public_der()?));

    Ok(())
}

fn handle_export(store: &KeyPairStore, format: &str, output_dir: Option<&Path>) -> Result<()> {
    let keypair = store.load()?;

    match format.to_lowercase().as_str() {
        "pem" => {
            let public_pem = public_key_to_pem(&keypair.public)?;
            let private_pem = private_key_to_pem(&keypair.private)?;

            if let Some(output_dir) = output_dir {
                write_output(&output_dir.join("public.pem"), public_pem.as_bytes())?;
                write_output(&output_dir.join("private.pem"), private_pem.as_bytes())?;
                println!("Exported key pair in PEM format to: {}", output_dir.display());
            } else {
                print!("{}", public_pem);
                print!("{}", private_pem.as_str());
            }
        }
        "base64" => {
            if let Some(output_dir) = output_dir {
                KeyPairStore::with_options(output_dir, *store.options()).save(&keypair)?;
                println!(
                    "Exported key pair in base64 format to: {}",
                    output_dir.display()
                );
            } else {
                let private_text = Zeroizing::new(encode_base64(&keypair.private_der()?));
                println!("{}", encode_base64(&keypair.public_der()?));
                println!("{}", private_text.as_str());
            }
        }
        _ => {
            return Err(RsaIoError::ParseError(format!(
                "Unsupported format: '{}'. Use 'pem' or 'base64'",
                format
            )));
        }
    }

    Ok(())
}

fn handle_import(store: &KeyPairStore, private_pem: &Path) -> Result<()> {
    let pem = fs::read_to_string(private_pem).map_err(|e| RsaIoError::storage(private_pem, e))?;
    let keypair = keypair_from_private_pem(&pem)?;

    store.save(&keypair)?;
    info!(
        "Imported {}-bit key from {} into {}",
        keypair.modulus_bits(),
        private_pem.display(),
        store.directory().display()
    );

    println!("Imported key pair into: {}", store.directory().display());
    println!("Public key: {}", encode_base64(&keypair.public_der()?));

    Ok(())
}

fn handle_verify(store: &KeyPairStore) -> Result<()> {
    let keypair = store.verify()?;

    println!(
        "✓ Key pair in {} is consistent ({} bits)",
        store.directory().display(),
        keypair.modulus_bits()
    );

    Ok(())
}

fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| RsaIoError::storage(path, e))
}
