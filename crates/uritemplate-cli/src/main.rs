//! Command-line front-end for the URI Template engine.
//!
//! `expand` renders a template with bindings from a JSON file and/or `--set`
//! pairs; `check` validates template files (one template per non-empty line)
//! and exits non-zero on the first file with violations, which makes it
//! usable as a build step; `variables` lists the names a template
//! references.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use uritemplate_engine::{UriTemplate, VariableValue};

#[derive(Parser)]
#[command(name = "uritemplate", version, about = "Expand and validate RFC 6570 URI Templates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a template with variable bindings
    Expand {
        /// The URI Template string
        template: String,
        /// JSON object of bindings: strings stay strings, numbers
        /// stringify, arrays become lists, objects become associative
        /// arrays (key-sorted); null and bool bindings count as absent
        #[arg(long, value_name = "FILE")]
        variables: Option<PathBuf>,
        /// Additional string bindings as NAME=VALUE (repeatable, override
        /// the JSON file)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
    /// Validate template files, one template per non-empty line
    Check {
        /// Files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the variable names referenced by a template
    Variables {
        /// The URI Template string
        template: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Expand {
            template,
            variables,
            set,
        } => expand(&template, variables.as_deref(), &set),
        Command::Check { files } => check(&files),
        Command::Variables { template } => variables(&template),
    }
}

fn expand(template: &str, variables_path: Option<&Path>, set: &[String]) -> ExitCode {
    let template = match UriTemplate::parse(template) {
        Ok(template) => template,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut bindings: HashMap<String, VariableValue> = HashMap::new();
    if let Some(path) = variables_path {
        match load_bindings(path) {
            Ok(loaded) => bindings.extend(loaded),
            Err(message) => {
                eprintln!("error: {message}");
                return ExitCode::FAILURE;
            }
        }
    }
    for pair in set {
        let Some((name, value)) = pair.split_once('=') else {
            eprintln!("error: --set expects NAME=VALUE, got {pair:?}");
            return ExitCode::FAILURE;
        };
        bindings.insert(name.to_string(), VariableValue::from(value));
    }

    match template.expand(&bindings) {
        Ok(expansion) => {
            println!("{expansion}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn load_bindings(path: &Path) -> Result<HashMap<String, VariableValue>, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    let serde_json::Value::Object(object) = json else {
        return Err(format!("{}: bindings must be a JSON object", path.display()));
    };

    let mut bindings = HashMap::new();
    for (name, value) in object {
        if let Some(value) = variable_value_from_json(&value) {
            bindings.insert(name, value);
        }
    }
    Ok(bindings)
}

fn variable_value_from_json(value: &serde_json::Value) -> Option<VariableValue> {
    match value {
        serde_json::Value::String(text) => Some(VariableValue::String(text.clone())),
        serde_json::Value::Number(number) => Some(VariableValue::String(number.to_string())),
        serde_json::Value::Array(items) => Some(VariableValue::List(
            items.iter().filter_map(json_scalar_to_string).collect(),
        )),
        serde_json::Value::Object(object) => Some(VariableValue::AssociativeArray(
            object
                .iter()
                .filter_map(|(key, item)| Some((key.clone(), json_scalar_to_string(item)?)))
                .collect(),
        )),
        serde_json::Value::Null | serde_json::Value::Bool(_) => None,
    }
}

fn json_scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn check(files: &[PathBuf]) -> ExitCode {
    let mut failures = 0usize;
    for path in files {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                eprintln!("{}: {error}", path.display());
                failures += 1;
                continue;
            }
        };
        for (line_index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Err(error) = UriTemplate::parse(line) {
                eprintln!("{}:{}: {error}", path.display(), line_index + 1);
                failures += 1;
            }
        }
    }
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn variables(template: &str) -> ExitCode {
    match UriTemplate::parse(template) {
        Ok(template) => {
            for name in template.variable_names() {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
