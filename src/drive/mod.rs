//! Minimal Google Drive v3 client: folder listing.

pub mod list;

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const ROOT_FOLDER: &str = "root";

const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, modifiedTime)";

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Drive API returned HTTP {status} for folder '{folder}': {message}")]
    Api {
        status: u16,
        folder: String,
        message: String,
    },

    #[error("Drive request failed: {0}")]
    Transport(String),

    #[error("Unreadable Drive response: {0}")]
    Decode(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default)]
    pub modified_time: String,
}

impl DriveFile {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

pub struct DriveClient {
    agent: ureq::Agent,
    base_url: String,
    access_token: String,
}

impl DriveClient {
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(access_token, DRIVE_API_BASE)
    }

    pub fn with_base_url(access_token: &str, base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Every non-trashed file directly inside `folder_id`, across all pages.
    pub fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFile>, DriveError> {
        let query = format!("'{}' in parents and trashed = false", escape_query_value(folder_id));
        let url = format!("{}/files", self.base_url);
        let mut files = vec![];
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .agent
                .get(&url)
                .set("Authorization", &format!("Bearer {}", self.access_token))
                .query("q", &query)
                .query("spaces", "drive")
                .query("fields", LIST_FIELDS);
            if let Some(ref token) = page_token {
                request = request.query("pageToken", token);
            }

            let page: FileList = match request.call() {
                Ok(response) => response.into_json()?,
                Err(ureq::Error::Status(status, response)) => {
                    let message = response
                        .into_string()
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                    return Err(DriveError::Api {
                        status,
                        folder: folder_id.to_string(),
                        message,
                    });
                }
                Err(e) => return Err(DriveError::Transport(e.to_string())),
            };

            debug!("folder '{}': {} entries in page", folder_id, page.files.len());
            files.extend(page.files);
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }
        Ok(files)
    }

    /// First folder named `name` directly under My Drive.
    pub fn find_folder(&self, name: &str) -> Result<Option<DriveFile>, DriveError> {
        let entries = self.list_folder(ROOT_FOLDER)?;
        Ok(entries.into_iter().find(|f| f.is_folder() && f.name == name))
    }
}

/// Escape a value for a single-quoted string in a Drive `q` expression.
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
