//! CLI command definitions for the `tseal` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod audit;
pub mod hash;
pub mod manifest;
pub mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::upload::UploadType;

/// Fingerprint and verify uploaded evidence files.
#[derive(Parser)]
#[command(name = "tseal", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding config.toml.
    #[arg(long, global = true, env = "TRUSTSEAL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the hex digest of a file.
    Hash {
        /// File to hash.
        path: PathBuf,

        /// Digest algorithm (sha256, md5, sha1). Defaults to the configured algorithm.
        #[arg(short, long)]
        algorithm: Option<HashAlgorithm>,
    },

    /// Check a file against an expected digest. Exits non-zero unless it matches.
    Verify {
        /// File to check.
        path: PathBuf,

        /// Expected hex digest (case-insensitive).
        expected: String,

        /// Algorithm that produced the expected digest.
        #[arg(short, long)]
        algorithm: Option<HashAlgorithm>,
    },

    /// Fingerprint files into a JSON manifest of upload records.
    Manifest {
        /// Files to record.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Upload category for every record.
        #[arg(long, default_value = "other")]
        upload_type: UploadType,

        /// Digest algorithm. Defaults to the configured algorithm.
        #[arg(short, long)]
        algorithm: Option<HashAlgorithm>,

        /// Related entity type, e.g. "Grievance".
        #[arg(long, requires = "entity_id")]
        entity_type: Option<String>,

        /// Related entity id.
        #[arg(long, requires = "entity_type")]
        entity_id: Option<i64>,

        /// First record id to assign.
        #[arg(long, default_value_t = 1)]
        start_id: i64,

        /// Write the manifest here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-verify every record in a manifest. Exits non-zero unless all verify.
    Audit {
        /// Manifest produced by `tseal manifest` or exported by the upload pipeline.
        manifest: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
