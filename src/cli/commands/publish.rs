//! Publish command handler

use super::{connect, load_model};
use crate::api::Folder;
use crate::cli::error::CliError;
use crate::export::ellie::{EllieExporter, PROGRESS_STATUSES, PayloadOptions};
use crate::import::odcs_shared::scalar_to_string;
use crate::model::TableSelection;
use crate::models::DuplicatePolicy;
use serde_json::Value as JsonValue;
use tracing::warn;

/// Where the model should be created
#[derive(Debug, Clone, PartialEq)]
pub enum FolderTarget {
    /// Identifier given directly
    Id(JsonValue),
    /// Folder name, looked up in the folder listing
    Name(String),
    Unset,
}

impl FolderTarget {
    /// An explicit id wins over a name
    pub fn from_args(folder_id: Option<&str>, folder: Option<&str>) -> Self {
        match (folder_id, folder) {
            (Some(id), _) => FolderTarget::Id(parse_folder_id(id)),
            (None, Some(name)) => FolderTarget::Name(name.to_string()),
            (None, None) => FolderTarget::Unset,
        }
    }
}

/// Arguments for the publish command
#[derive(Debug, Clone)]
pub struct PublishArgs {
    pub input: String,
    pub policy: DuplicatePolicy,
    pub selection: TableSelection,
    pub model_name: String,
    pub progress_status: String,
    pub folder: FolderTarget,
    pub slug: Option<String>,
    pub api_key: Option<String>,
    pub dry_run: bool,
}

/// Numeric ids are sent as numbers, anything else as a string
pub fn parse_folder_id(raw: &str) -> JsonValue {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map(JsonValue::from)
        .unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}

/// Find a folder id by exact name
pub fn find_folder(folders: &[Folder], name: &str) -> Result<JsonValue, CliError> {
    folders
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.id.clone())
        .ok_or_else(|| CliError::FolderNotFound(name.to_string()))
}

/// Handle the publish command
pub fn handle_publish(args: &PublishArgs) -> Result<(), CliError> {
    let model = load_model(&args.input, args.policy)?;

    if !PROGRESS_STATUSES.contains(&args.progress_status.as_str()) {
        warn!("Unrecognised progress status: {}", args.progress_status);
    }

    if args.dry_run {
        // Never contacts the service; a folder given by name stays unresolved
        let folder_id = match &args.folder {
            FolderTarget::Id(id) => id.clone(),
            FolderTarget::Name(name) => {
                warn!("Dry run: folder {} is not looked up", name);
                JsonValue::Null
            }
            FolderTarget::Unset => JsonValue::Null,
        };
        let result =
            EllieExporter::new().export(&model, &args.selection, &options(args, folder_id))?;
        println!("{}", result.content);
        return Ok(());
    }

    let client = connect(args.slug.as_deref(), args.api_key.as_deref())?;
    let folder_id = match &args.folder {
        FolderTarget::Id(id) => id.clone(),
        FolderTarget::Name(name) => find_folder(&client.list_folders()?, name)?,
        FolderTarget::Unset => {
            return Err(CliError::InvalidArgument(
                "A target folder is required: pass --folder or --folder-id".to_string(),
            ));
        }
    };

    let request = EllieExporter::new().build(&model, &args.selection, &options(args, folder_id));
    let created = client.create_model(&request)?;
    println!(
        "Model created with ID: {}",
        created
            .model_id
            .as_ref()
            .and_then(scalar_to_string)
            .unwrap_or_default()
    );
    Ok(())
}

fn options(args: &PublishArgs, folder_id: JsonValue) -> PayloadOptions {
    PayloadOptions {
        model_name: args.model_name.clone(),
        folder_id,
        progress_status: args.progress_status.clone(),
    }
}
