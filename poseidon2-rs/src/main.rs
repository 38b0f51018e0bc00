//! Poseidon2 CLI.
//!
//! Command-line access to the hash functions and the known-answer tests.
//! Results go to stdout; diagnostics go to stderr through `tracing`.

use bn256_poseidon2::conformance::{generate_json, KatParameters, KatRunner};
use bn256_poseidon2::field::MODULUS_HEX;
use bn256_poseidon2::policy::{ComplexityFilter, Limits};
use bn256_poseidon2::poseidon::{hash, hash_bytes, hash_bytes_checked, Domain};
use bn256_poseidon2::{Fr, Poseidon2Error, Poseidon2Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poseidon2")]
#[command(about = "Poseidon2 over the BN256 scalar field", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parameter set as JSON
    Params,

    /// Generate or verify known-answer tests
    Kat {
        #[command(subcommand)]
        action: KatAction,
    },

    /// Hash hex-encoded byte chunks under a domain tag
    HashBytes {
        /// Domain name (generic, poet-node, ...), 0x-prefixed tag, or 4 ASCII chars
        #[arg(long, default_value = "generic")]
        domain: String,

        /// JSON limits file; enables the complexity filter
        #[arg(long)]
        limits: Option<PathBuf>,

        /// Byte chunks as hex
        chunks: Vec<String>,
    },

    /// Hash field elements given as hex
    Hash {
        /// Field elements as hex
        elements: Vec<String>,
    },
}

#[derive(Subcommand)]
enum KatAction {
    /// Emit the vector set produced by this build
    Generate {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replay a vector file; exits 1 on any mismatch
    Verify {
        /// Path to the KAT JSON file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Params => cmd_params(),
        Commands::Kat { action } => match action {
            KatAction::Generate { output } => cmd_kat_generate(output),
            KatAction::Verify { file } => cmd_kat_verify(file),
        },
        Commands::HashBytes {
            domain,
            limits,
            chunks,
        } => cmd_hash_bytes(&domain, limits, &chunks),
        Commands::Hash { elements } => cmd_hash(&elements),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_params() -> Poseidon2Result<ExitCode> {
    let params = serde_json::json!({
        "field_modulus": MODULUS_HEX,
        "parameters": KatParameters::current(),
    });
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_kat_generate(output: Option<PathBuf>) -> Poseidon2Result<ExitCode> {
    let json = generate_json()?;
    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", json)).map_err(|source| Poseidon2Error::Io {
                path: path.display().to_string(),
                source,
            })?;
            debug!(path = %path.display(), "wrote kat file");
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_kat_verify(file: PathBuf) -> Poseidon2Result<ExitCode> {
    let runner = KatRunner::load(&file)?;
    debug!(vectors = runner.vector_count(), "loaded kat file");
    let results = runner.run_all();

    for (id, result) in results.failures() {
        println!("FAIL {}: {:?}", id, result);
    }
    println!("{}", results.summary());

    if results.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_hash_bytes(
    domain: &str,
    limits: Option<PathBuf>,
    chunks: &[String],
) -> Poseidon2Result<ExitCode> {
    let domain = Domain::parse(domain)?;
    let chunks = chunks
        .iter()
        .map(|c| decode_hex(c))
        .collect::<Poseidon2Result<Vec<_>>>()?;

    let digest = match limits {
        Some(path) => {
            let filter = ComplexityFilter::new(Limits::from_json_file(path)?);
            hash_bytes_checked(domain, &chunks, &filter)?
        }
        None => hash_bytes(domain, &chunks),
    };

    println!("0x{}", hex::encode(digest));
    Ok(ExitCode::SUCCESS)
}

fn cmd_hash(elements: &[String]) -> Poseidon2Result<ExitCode> {
    let elements = elements
        .iter()
        .map(|e| Fr::from_hex(e))
        .collect::<Poseidon2Result<Vec<_>>>()?;
    println!("{}", hash(&elements).to_hex());
    Ok(ExitCode::SUCCESS)
}

fn decode_hex(s: &str) -> Poseidon2Result<Vec<u8>> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|_| Poseidon2Error::InvalidHex(s.to_string()))
}
