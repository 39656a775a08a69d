//! Propstack CLI
//!
//! Resolves the layered property snapshot for the current directory and
//! prints it. Logs go to stderr so stdout can be piped.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use propstack_core::{AwsClientBuilder, LoaderOptions, PropertiesLoader, Properties, PropertyMap, RemoteBackend};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

const MASK: &str = "****";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// `key=value` lines
    Properties,
    /// A single JSON object
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

/// Resolve and print layered properties
#[derive(Parser, Debug)]
#[command(name = "propstack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Properties)]
    format: OutputFormat,

    /// Print values instead of masking them
    #[arg(long)]
    reveal: bool,

    /// Fail unless this key is present and non-empty (repeatable)
    #[arg(long = "require", value_name = "KEY")]
    required: Vec<String>,

    /// Directory holding the bundled properties files
    #[arg(long, default_value = "resources")]
    resource_dir: PathBuf,

    #[arg(long, default_value = "application.properties")]
    base_file: PathBuf,

    #[arg(long, default_value = "overrides.properties")]
    override_file: PathBuf,

    #[arg(long, default_value = "application-test.properties")]
    test_base_file: PathBuf,

    #[arg(long, default_value = "overrides-test.properties")]
    test_override_file: PathBuf,

    /// Variable holding the parameter store prefix
    #[arg(long, default_value = "SSM_PREFIX")]
    prefix_variable: String,

    /// AWS region (falls back to the default region chain)
    #[arg(long)]
    region: Option<String>,

    /// Custom Parameter Store endpoint, e.g. LocalStack
    #[arg(long)]
    ssm_endpoint_url: Option<String>,

    /// Custom Secrets Manager endpoint, e.g. LocalStack
    #[arg(long)]
    secrets_manager_endpoint_url: Option<String>,

    /// Log level: trace, debug, info, warn, error (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn loader_options(&self) -> LoaderOptions {
        LoaderOptions::default()
            .with_resource_dir(&self.resource_dir)
            .with_base_file(&self.base_file)
            .with_override_file(&self.override_file)
            .with_test_base_file(&self.test_base_file)
            .with_test_override_file(&self.test_override_file)
            .with_prefix_variable(&self.prefix_variable)
    }

    fn aws_builder(&self) -> AwsClientBuilder {
        let mut builder = AwsClientBuilder::new();
        if let Some(region) = &self.region {
            builder = builder.with_region(region);
        }
        if let Some(url) = &self.ssm_endpoint_url {
            builder = builder.with_ssm_endpoint_url(url);
        }
        if let Some(url) = &self.secrets_manager_endpoint_url {
            builder = builder.with_secrets_manager_endpoint_url(url);
        }
        builder
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.log_format);

    let loader = PropertiesLoader::new(args.loader_options()).with_backend(RemoteBackend::Aws(args.aws_builder()));
    tracing::debug!(?loader, "Resolving properties");

    let properties = loader.load().await.context("Failed to resolve properties")?;

    check_required(&properties, &args.required)?;

    let output = match args.format {
        OutputFormat::Properties => render_properties(&properties, args.reveal),
        OutputFormat::Json => render_json(&properties, args.reveal)?,
    };
    println!("{}", output);

    Ok(())
}

/// Initialize the tracing subscriber, writing to stderr
fn init_tracing(log_level: &str, format: LogFormat) {
    // Build filter from RUST_LOG env var or use provided log level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(std::io::stderr)).init(),
    }
}

fn check_required(properties: &PropertyMap, keys: &[String]) -> Result<()> {
    let failures: Vec<String> = keys
        .iter()
        .filter_map(|key| properties.string_not_empty(key).err())
        .map(|e| e.to_string())
        .collect();

    if !failures.is_empty() {
        bail!("Required properties missing:\n  {}", failures.join("\n  "));
    }
    Ok(())
}

fn display_value(value: &str, reveal: bool) -> &str {
    if reveal {
        value
    } else {
        MASK
    }
}

fn render_properties(properties: &PropertyMap, reveal: bool) -> String {
    properties
        .iter()
        .map(|(key, value)| format!("{}={}", key, display_value(value, reveal)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json(properties: &PropertyMap, reveal: bool) -> Result<String> {
    let shown: PropertyMap = properties
        .iter()
        .map(|(key, value)| (key, display_value(value, reveal)))
        .collect();
    Ok(serde_json::to_string_pretty(&shown)?)
}
