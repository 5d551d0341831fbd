//! Magic import — CSV analysis and expense import.
//!
//! Two independent one-shot calls. `analyze` is advisory; `import` is only
//! reachable after `analyze` reported success, which is the single client-
//! side rule this flow enforces.

pub mod models;
pub mod page;

use std::path::Path;

use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientError;

use models::{CsvAnalysis, ImportOutcome};

/// One CSV file moving through the analyze → import flow.
pub struct CsvImport {
    file_name: String,
    content: Vec<u8>,
    analysis: Option<CsvAnalysis>,
}

impl CsvImport {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
            analysis: None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let content = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self::new(file_name, content))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn analysis(&self) -> Option<&CsvAnalysis> {
        self.analysis.as_ref()
    }

    /// Import is gated on a successful analyze pass.
    pub fn can_import(&self) -> bool {
        self.analysis.is_some()
    }

    fn ensure_analyzed(&self) -> Result<(), ClientError> {
        if self.can_import() {
            Ok(())
        } else {
            Err(ClientError::AnalyzeRequired)
        }
    }

    fn file_part(&self) -> Result<Part, ClientError> {
        Ok(Part::bytes(self.content.clone())
            .file_name(self.file_name.clone())
            .mime_str("text/csv")?)
    }

    /// Uploads the file for structure analysis and stores the result. Only a
    /// `success: true` response lands here, so a stored analysis is the gate.
    pub async fn analyze(&mut self, api: &ApiClient) -> Result<&CsvAnalysis, ClientError> {
        let form = Form::new().part("file", self.file_part()?);
        let analysis: CsvAnalysis = api
            .post_multipart("/api/migration/analyze-csv", form)
            .await?;
        Ok(self.analysis.insert(analysis))
    }

    /// Imports the expenses. Refused until [`CsvImport::analyze`] succeeded.
    pub async fn import(
        &self,
        api: &ApiClient,
        organization_id: Uuid,
    ) -> Result<ImportOutcome, ClientError> {
        self.ensure_analyzed()?;
        let form = Form::new()
            .part("file", self.file_part()?)
            .text("organization_id", organization_id.to_string());
        api.post_multipart("/api/migration/import-expenses", form)
            .await
    }
}
