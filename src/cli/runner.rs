use crate::errors::FilterError;
use crate::query::{self, MongoDialect, QueryDialect};
use bson::{Bson, Document};
use std::io::Write;

use super::command::Command;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Plain,
    Json,
}

fn doc_json(doc: Document) -> serde_json::Value {
    Bson::Document(doc).into_relaxed_extjson()
}

fn io_err(e: std::io::Error) -> FilterError {
    FilterError::Io(e.to_string())
}

/// Runs one command, writing its result to `out`.
///
/// # Errors
/// Returns parse or structural errors from the input, or `FilterError::Io` when `out` fails.
pub fn run(cmd: Command, mode: OutputMode, out: &mut dyn Write) -> Result<(), FilterError> {
    let dialect = MongoDialect;
    match cmd {
        Command::Compile { filter_json } => {
            let filter = query::parse_filter_json(&filter_json)?;
            let compiled = dialect.compile_filter(&filter)?;
            match mode {
                OutputMode::Plain => writeln!(out, "{compiled}").map_err(io_err)?,
                OutputMode::Json => {
                    writeln!(out, "{}", serde_json::json!({ "filter": compiled })).map_err(io_err)?;
                }
            }
        }
        Command::Sort { fields } => {
            let sorts = fields
                .iter()
                .map(|s| query::parse_sort_field(s))
                .collect::<Result<Vec<_>, _>>()?;
            let clause = dialect.compile_sort(&sorts).map(doc_json);
            match (mode, clause) {
                (OutputMode::Plain, Some(v)) => writeln!(out, "{v}").map_err(io_err)?,
                (OutputMode::Plain, None) => writeln!(out, "none").map_err(io_err)?,
                (OutputMode::Json, v) => {
                    writeln!(out, "{}", serde_json::json!({ "sort": v })).map_err(io_err)?;
                }
            }
        }
        Command::Update { update_json } => {
            let spec = query::parse_update_json(&update_json)?;
            let compiled = dialect.compile_update(&spec)?;
            let update = doc_json(compiled.update);
            match mode {
                OutputMode::Plain => {
                    writeln!(out, "filter: {}", compiled.filter).map_err(io_err)?;
                    writeln!(out, "update: {update}").map_err(io_err)?;
                }
                OutputMode::Json => {
                    let v = serde_json::json!({ "filter": compiled.filter, "update": update });
                    writeln!(out, "{v}").map_err(io_err)?;
                }
            }
        }
        Command::ShowConfig { config } => match mode {
            OutputMode::Plain => {
                let s = toml::to_string(&config).map_err(|e| FilterError::Config(e.to_string()))?;
                write!(out, "{s}").map_err(io_err)?;
            }
            OutputMode::Json => {
                writeln!(out, "{}", serde_json::to_string(&config)?).map_err(io_err)?;
            }
        },
    }
    Ok(())
}
