// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use pdnsctl::api::ApiClient;
use pdnsctl::cryptokeys::CryptokeySpec;
use pdnsctl::reconciler::{
    apply_cryptokey, apply_rrsets, apply_tsigkey, apply_zone, query_rrsets,
};
use pdnsctl::rrsets::RrsetDocument;
use pdnsctl::tsigkeys::TsigKeySpec;
use pdnsctl::zones::ZoneSpec;

/// Declarative zone management for PowerDNS Authoritative servers.
#[derive(Debug, Parser)]
#[command(name = "pdnsctl", version, about)]
struct Cli {
    /// Base URL of the PowerDNS API endpoint
    #[arg(long, global = true, env = "PDNS_API_URL", default_value = "http://localhost:8081")]
    api_url: String,

    /// API key sent with every request
    #[arg(long, env = "PDNS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Server instance id
    #[arg(long, global = true, env = "PDNS_SERVER_ID", default_value = "localhost")]
    server_id: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Converge zones to the specs in a YAML file
    Zone {
        /// File holding one zone spec or a list of them
        #[arg(long, short)]
        file: PathBuf,
    },
    /// Converge a zone's RRsets to the entries in a YAML file
    Rrset {
        /// File holding a document with `zone` and `rrsets`
        #[arg(long, short)]
        file: PathBuf,
    },
    /// List a zone's RRsets, optionally filtered
    RrsetQuery {
        /// Zone to inspect
        #[arg(long)]
        zone: String,
        /// Owner name filter
        #[arg(long)]
        name: Option<String>,
        /// Record type filter
        #[arg(long = "type")]
        rtype: Option<String>,
    },
    /// Converge cryptokeys to the specs in a YAML file
    Cryptokey {
        /// File holding one cryptokey spec or a list of them
        #[arg(long, short)]
        file: PathBuf,
    },
    /// Converge TSIG keys to the specs in a YAML file
    Tsigkey {
        /// File holding one TSIG key spec or a list of them
        #[arg(long, short)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("pdnsctl")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Respects RUST_LOG for the filter and RUST_LOG_FORMAT for json/text
    // output. Example: RUST_LOG=debug RUST_LOG_FORMAT=json pdnsctl ...
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
    }

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url, &cli.api_key, &cli.server_id)?;
    debug!(api_url = %cli.api_url, server_id = %cli.server_id, "client ready");

    match &cli.command {
        Command::Zone { file } => {
            for spec in load_specs::<ZoneSpec>(file)? {
                info!(zone = %spec.name, state = ?spec.state, "reconciling zone");
                let outcome = apply_zone(&client, &spec).await?;
                emit(&outcome)?;
            }
        }
        Command::Rrset { file } => {
            let doc: RrsetDocument = load_one(file)?;
            let outcome = apply_rrsets(&client, &doc.zone, &doc.rrsets).await?;
            emit(&outcome)?;
        }
        Command::RrsetQuery { zone, name, rtype } => {
            let result = query_rrsets(&client, zone, name.as_deref(), rtype.as_deref()).await?;
            emit(&result)?;
        }
        Command::Cryptokey { file } => {
            for spec in load_specs::<CryptokeySpec>(file)? {
                let outcome = apply_cryptokey(&client, &spec).await?;
                emit(&outcome)?;
            }
        }
        Command::Tsigkey { file } => {
            for spec in load_specs::<TsigKeySpec>(file)? {
                let outcome = apply_tsigkey(&client, &spec).await?;
                emit(&outcome)?;
            }
        }
    }

    Ok(())
}

/// Load a YAML file that holds either one spec or a list of specs.
fn load_specs<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    if let Ok(many) = serde_yaml::from_str::<Vec<T>>(&text) {
        return Ok(many);
    }
    let one = serde_yaml::from_str::<T>(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(vec![one])
}

/// Load a YAML file holding exactly one document.
fn load_one<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Print an outcome as pretty JSON on stdout.
fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn a_single_spec_loads_as_a_list_of_one() {
        let file = write_temp("name: example.org.\nstate: absent\n");
        let specs: Vec<ZoneSpec> = load_specs(file.path()).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "example.org.");
    }

    #[test]
    fn a_list_of_specs_loads_as_is() {
        let file = write_temp("- {name: a.example.}\n- {name: b.example.}\n");
        let specs: Vec<ZoneSpec> = load_specs(file.path()).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].name, "b.example.");
    }

    #[test]
    fn a_missing_file_reports_its_path() {
        let err = load_specs::<ZoneSpec>(Path::new("/nonexistent/zones.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/zones.yaml"));
    }

    #[test]
    fn an_rrset_document_loads_with_its_zone() {
        let file = write_temp(
            "zone: example.org.\nrrsets:\n  - name: www.example.org.\n    a:\n      - address: 192.0.2.1\n",
        );
        let doc: RrsetDocument = load_one(file.path()).unwrap();
        assert_eq!(doc.zone, "example.org.");
        assert_eq!(doc.rrsets.len(), 1);
    }

    #[test]
    fn cli_arguments_parse() {
        let cli = Cli::try_parse_from([
            "pdnsctl",
            "--api-key",
            "secret",
            "rrset-query",
            "--zone",
            "example.org.",
            "--type",
            "A",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://localhost:8081");
        match cli.command {
            Command::RrsetQuery { zone, name, rtype } => {
                assert_eq!(zone, "example.org.");
                assert_eq!(name, None);
                assert_eq!(rtype.as_deref(), Some("A"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
