//! Connection settings for the hosted backend.

use serde::{Deserialize, Serialize};

/// Where and how to reach the backend's REST and realtime interfaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`.
    pub base_url: String,
    /// Public (anon) API key, sent on every request.
    pub api_key: String,
    /// Session access token; the API key is used as bearer when absent.
    pub access_token: Option<String>,
    /// Identity of the signed-in user, sent with new candidates.
    pub user_id: Option<String>,
    pub table: String,
    /// Endpoint of the add-candidate function.
    pub create_path: String,
    /// Storage bucket holding uploaded CVs.
    pub resume_bucket: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            access_token: None,
            user_id: None,
            table: "candidates".to_string(),
            create_path: "/functions/v1/add_candidate".to_string(),
            resume_bucket: "resumes".to_string(),
        }
    }
}

impl SourceConfig {
    /// Realtime topic of the table.
    pub fn topic(&self) -> String {
        format!("realtime:{}", self.table)
    }

    /// REST path of the table.
    pub fn table_path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    /// Storage path an object is uploaded to.
    pub fn upload_path(&self, object: &str) -> String {
        format!("/storage/v1/object/{}/{}", self.resume_bucket, object)
    }

    /// Public URL of an uploaded object.
    pub fn public_url(&self, object: &str) -> String {
        self.url(&format!("/storage/v1/object/public/{}/{}", self.resume_bucket, object))
    }

    /// Joins a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Token for the `Authorization` header.
    pub fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}
