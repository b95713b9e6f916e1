//! HTTP client for the Ellie REST API

use super::ApiError;
use crate::export::ellie::CreateModelRequest;
use crate::import::odcs_shared::{first_present_string, scalar_to_string};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

/// Host used when no subdomain slug is configured
pub const DEFAULT_BASE_URL: &str = "https://ellie.ai";

/// `https://{slug}.ellie.ai`, or the default host for an empty or missing slug
pub fn base_url(slug: Option<&str>) -> String {
    match slug.map(str::trim) {
        Some(slug) if !slug.is_empty() => format!("https://{}.ellie.ai", slug),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// Folder available for new models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    /// Folder identifier, passed back verbatim as `folderId`
    pub id: JsonValue,
}

/// Outcome of a successful model creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedModel {
    pub model_id: Option<JsonValue>,
}

/// Extract folders from a folder listing body.
///
/// Accepts `{"folders": [...]}` or a bare array. Each entry may spell its name
/// `name` or `folderName` and its identifier `folderId` or `id`; entries missing
/// either are skipped. A repeated name keeps its first position and its last id.
pub fn parse_folders(body: &JsonValue) -> Vec<Folder> {
    let entries = match body {
        JsonValue::Array(items) => items.as_slice(),
        JsonValue::Object(obj) => obj
            .get("folders")
            .and_then(|v| v.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };

    let mut folders: Vec<Folder> = Vec::new();
    for obj in entries.iter().filter_map(|e| e.as_object()) {
        let Some(name) = first_present_string(obj, &["name", "folderName"]) else {
            continue;
        };
        let id = if obj.contains_key("folderId") {
            obj.get("folderId")
        } else {
            obj.get("id")
        };
        let Some(id) = id.filter(|v| !v.is_null()).cloned() else {
            continue;
        };

        match folders.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.id = id,
            None => folders.push(Folder { name, id }),
        }
    }
    folders
}

/// Read `modelId` from a creation response body
pub fn parse_created_model(body: &JsonValue) -> CreatedModel {
    CreatedModel {
        model_id: body.get("modelId").filter(|v| !v.is_null()).cloned(),
    }
}

/// Blocking Ellie API client
#[derive(Debug, Clone)]
pub struct EllieClient {
    base_url: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl EllieClient {
    /// Client for `https://{slug}.ellie.ai` (or the default host)
    pub fn new(slug: Option<&str>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(base_url(slug), api_key)
    }

    /// Client for an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn folders_url(&self) -> String {
        self.endpoint("folders")
    }

    pub fn models_url(&self) -> String {
        self.endpoint("models")
    }

    fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/api/v1/{}?token={}",
            self.base_url,
            resource,
            urlencoding::encode(&self.api_key)
        )
    }

    /// List folders; any non-success status is a connection failure
    pub fn list_folders(&self) -> Result<Vec<Folder>, ApiError> {
        let response = self.http.get(self.folders_url()).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("Folder listing failed with status {}", status);
            return Err(ApiError::ConnectionFailed {
                status: status.as_u16(),
            });
        }

        let body: JsonValue = response
            .json()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let folders = parse_folders(&body);
        info!("Connected to {}: {} folders", self.base_url, folders.len());
        Ok(folders)
    }

    /// Create a model; only `201 Created` counts as success
    pub fn create_model(&self, request: &CreateModelRequest) -> Result<CreatedModel, ApiError> {
        let response = self.http.post(self.models_url()).json(request).send()?;
        let status = response.status();
        let text = response.text()?;

        if status != StatusCode::CREATED {
            warn!("Model creation failed with status {}", status);
            return Err(ApiError::SubmissionFailed {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: JsonValue =
            serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let created = parse_created_model(&body);
        info!(
            "Created model {} with ID {}",
            request.model.name,
            created
                .model_id
                .as_ref()
                .and_then(scalar_to_string)
                .unwrap_or_default()
        );
        Ok(created)
    }
}
