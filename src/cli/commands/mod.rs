//! CLI command implementations

pub mod diagram;
pub mod folders;
pub mod publish;
pub mod tables;
pub mod validate;

use crate::api::EllieClient;
use crate::cli::error::CliError;
use crate::model::{ModelLoader, ResolvedModel};
use crate::models::DuplicatePolicy;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Load input content from file or stdin
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        return Ok(content);
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        return Err(CliError::FileNotFound(path));
    }
    std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
}

/// Read a document and apply duplicate handling
pub fn load_model(input: &str, policy: DuplicatePolicy) -> Result<ResolvedModel, CliError> {
    let content = load_input(input)?;
    Ok(ModelLoader::new(policy).load(&content)?)
}

/// Print to stdout, or write to `output` when given
pub fn write_output(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, content)
            .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string())),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

/// Client for the configured instance; an API key is mandatory
pub fn connect(slug: Option<&str>, api_key: Option<&str>) -> Result<EllieClient, CliError> {
    match api_key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(EllieClient::new(slug, key)),
        _ => Err(CliError::InvalidArgument(
            "API key required: pass --api-key or set ELLIE_API_KEY".to_string(),
        )),
    }
}
