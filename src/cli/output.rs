//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{EdtArgs, OutputFormat};
use crate::error::Result;

/// Result structure for a compiled request.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompileResult {
    pub path: String,
    pub body: Value,
}

/// Result structure for a page window.
#[derive(Debug, Serialize, Deserialize)]
pub struct WindowResult {
    pub total: u64,
    pub per_page: u64,
    pub page: u64,
    pub offset: u64,
    pub last_page: u64,
    pub has_more_pages: bool,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &EdtArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &EdtArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    match &value {
        Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val, args)?;
                println!("{key}: {formatted_val}");
            }
        }
        other => println!("{}", format_value(other, args)?),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &EdtArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a single value for human output.
fn format_value(value: &Value, args: &EdtArgs) -> Result<String> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Object(_) | Value::Array(_) if args.pretty => serde_json::to_string_pretty(value)?,
        other => other.to_string(),
    })
}
