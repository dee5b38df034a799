//! Command-line interface for geocss
//! This binary reads GeoCSS files into style documents and writes them back.
//!
//! Usage:
//!   geocss read `<path>` [--format json|yaml]  - Print the style document of a GeoCSS file
//!   geocss write `<path>`                      - Print a style document (JSON or YAML) as GeoCSS
//!   geocss tokens `<path>`                     - Print the token stream of a GeoCSS file
//!
//! `--config <file>` layers a TOML configuration over the built-in defaults.
//! Logging goes to stderr and is controlled with `RUST_LOG` (default: warn).

use clap::{Arg, Command};
use geocss::geocss::config::Loader;
use geocss::geocss::lexing::lex;
use geocss::{GeoCssConfig, GeoCssStyleParser, Style, StyleParser};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("geocss")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and write GeoCSS cartographic styles")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML configuration file layered over the defaults"),
        )
        .subcommand(
            Command::new("read")
                .about("Read a GeoCSS file and print its style document")
                .arg(
                    Arg::new("path")
                        .help("Path to the GeoCSS file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("write")
                .about("Write a style document (JSON or YAML) as GeoCSS")
                .arg(
                    Arg::new("path")
                        .help("Path to the style document")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a GeoCSS file")
                .arg(
                    Arg::new("path")
                        .help("Path to the GeoCSS file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let config = match load_config(matches.get_one::<String>("config")) {
        Ok(config) => config,
        Err(e) => fail(&format!("Error loading configuration: {}", e)),
    };

    let result = match matches.subcommand() {
        Some(("read", read_matches)) => {
            let path = required(read_matches.get_one::<String>("path"));
            let format = read_matches
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("json");
            handle_read_command(path, format, config)
        }
        Some(("write", write_matches)) => {
            handle_write_command(required(write_matches.get_one::<String>("path")), config)
        }
        Some(("tokens", tokens_matches)) => {
            handle_tokens_command(required(tokens_matches.get_one::<String>("path")))
        }
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(message) => fail(&message),
    }
}

fn required(value: Option<&String>) -> &str {
    match value {
        Some(value) => value,
        None => fail("Error: missing <path> argument"),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn load_config(path: Option<&String>) -> Result<GeoCssConfig, config::ConfigError> {
    let loader = Loader::new();
    match path {
        Some(path) => loader.with_file(path).build(),
        None => loader.build(),
    }
}

fn read_file(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Error reading file '{}': {}", path, e))
}

/// Handle the read command
fn handle_read_command(path: &str, format: &str, config: GeoCssConfig) -> Result<String, String> {
    let source = read_file(path)?;
    let parser = GeoCssStyleParser::with_config(config);
    let result = parser
        .read_style(&source)
        .map_err(|e| format!("Error reading '{}': {}", path, e))?;
    for warning in &result.warnings {
        eprintln!("Warning: {}", warning);
    }

    match format {
        "yaml" => serde_yaml::to_string(&result.output).map_err(|e| format!("Error: {}", e)),
        _ => serde_json::to_string_pretty(&result.output)
            .map(|json| json + "\n")
            .map_err(|e| format!("Error: {}", e)),
    }
}

/// Handle the write command
fn handle_write_command(path: &str, config: GeoCssConfig) -> Result<String, String> {
    let source = read_file(path)?;
    let is_json = path.ends_with(".json");
    let style: Style = if is_json {
        serde_json::from_str(&source).map_err(|e| format!("Error parsing '{}': {}", path, e))?
    } else {
        serde_yaml::from_str(&source).map_err(|e| format!("Error parsing '{}': {}", path, e))?
    };

    let parser = GeoCssStyleParser::with_config(config);
    let result = parser
        .write_style(&style)
        .map_err(|e| format!("Error writing '{}': {}", path, e))?;
    for warning in &result.warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(result.output)
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) -> Result<String, String> {
    let source = read_file(path)?;
    let tokens = lex(&source).map_err(|e| format!("Error lexing '{}': {}", path, e))?;
    Ok(tokens
        .iter()
        .map(|(token, span)| format!("{}..{} {}\n", span.start, span.end, token))
        .collect())
}
