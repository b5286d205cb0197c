use crate::domain::ports::InputSource;
use crate::utils::error::{HarnessError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads puzzle inputs from files under a base directory.
#[derive(Debug, Clone)]
pub struct LocalInputs {
    base_path: PathBuf,
}

impl LocalInputs {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl InputSource for LocalInputs {
    async fn fetch_text(&self, locator: &str) -> Result<String> {
        let full_path = self.base_path.join(locator);
        tracing::debug!("Reading input from: {}", full_path.display());

        let data = tokio::fs::read(&full_path).await?;
        String::from_utf8(data).map_err(|_| HarnessError::InvalidUtf8Error {
            locator: locator.to_string(),
        })
    }
}
