//! Folders command handler

use super::connect;
use crate::cli::error::CliError;
use crate::import::odcs_shared::scalar_to_string;

/// Handle the folders command: test the connection and list folders
pub fn handle_folders(slug: Option<&str>, api_key: Option<&str>) -> Result<(), CliError> {
    let client = connect(slug, api_key)?;
    let folders = client.list_folders()?;

    eprintln!("Connected to {}", client.base_url());
    for folder in &folders {
        println!(
            "{}\t{}",
            folder.name,
            scalar_to_string(&folder.id).unwrap_or_else(|| folder.id.to_string())
        );
    }
    Ok(())
}
