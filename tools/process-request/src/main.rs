#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use spantag_aws::DynamicRequest;
use spantag_config::{Config, OverridableConfig};
use spantag_decorators::DecorationEngine;
use spantag_protocol::{Attributes, Getter, Value};

/// Extracts and decorates span attributes for an AWS SDK request.
///
/// This command takes a JSON document on stdin and writes the resulting attributes to stdout:
///
///     {
///       "request": {"type": "GetItemRequest", "parent": "DynamoDbRequest", "fields": {...}},
///       "response": {...},
///       "tags": {"component": "java-aws-sdk"}
///     }
///
/// Tags are merged with the extracted attributes before the decoration rules run.
#[derive(Debug, Parser)]
#[command(verbatim_doc_comment)]
struct Cli {
    /// Path to a config folder with `config.yml` and `decorators.yml`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to an input JSON file (defaults to stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// The log level, such as `debug`.
    #[arg(long)]
    log_level: Option<String>,

    /// The log format: `auto`, `pretty`, `simplified` or `json`.
    #[arg(long)]
    log_format: Option<String>,

    /// Pretty print the output JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Deserialize)]
struct Input {
    request: DynamicRequest,
    #[serde(default)]
    response: Option<Value>,
    #[serde(default)]
    tags: Attributes,
}

fn process(input: Input, engine: &DecorationEngine) -> Attributes {
    let response = input.response.as_ref().map(|value| value as &dyn Getter);
    let extracted = spantag_aws::extract(&input.request, response);

    let mut attributes = input.tags;
    attributes.extend(extracted);
    engine.apply(&mut attributes);
    attributes
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::from_path(path).context("failed to load config")?,
            None => Config::default(),
        };

        config.apply_override(OverridableConfig {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        })?;

        Ok(config)
    }

    fn load_input(&self) -> Result<Input> {
        let json = match self.input {
            Some(ref path) => fs::read_to_string(path).context("failed to read input")?,
            None => {
                let mut json = String::new();
                io::stdin()
                    .read_to_string(&mut json)
                    .context("failed to read input")?;
                json
            }
        };

        serde_json::from_str(&json).context("failed to parse input")
    }

    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;
        spantag_log::init(config.logging());

        let engine = config.decoration_engine();
        let attributes = process(self.load_input()?, &engine);

        if self.pretty {
            println!("{}", serde_json::to_string_pretty(&attributes)?);
        } else {
            println!("{}", serde_json::to_string(&attributes)?);
        }

        Ok(())
    }
}

fn print_error(error: &anyhow::Error) {
    eprintln!("Error: {error}");

    let mut cause = error.source();
    while let Some(ref e) = cause {
        eprintln!("  caused by: {e}");
        cause = e.source();
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(error) => {
            print_error(&error);
            std::process::exit(1);
        }
    }
}
