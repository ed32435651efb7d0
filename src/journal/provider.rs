/// Sources of journal data, abstracting over files on disk and the bundled sample
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use super::{JournalBook, JournalError};

/// Sample dataset compiled into the binary
const BUNDLED_JOURNALS: &str = include_str!("../../data/journals.json");

/// Trait for journal sources, implemented by the file and bundled providers
#[async_trait]
pub trait JournalProvider: Send + Sync {
    /// Human readable origin, shown in the status bar and logs
    fn describe(&self) -> String;

    /// Raw JSON document
    async fn fetch(&self) -> Result<String, JournalError>;
}

/// Journals read from a JSON file
#[derive(Debug, Clone)]
pub struct FileJournals {
    path: PathBuf,
}

impl FileJournals {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JournalProvider for FileJournals {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, JournalError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// The sample journals shipped with the application
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledJournals;

#[async_trait]
impl JournalProvider for BundledJournals {
    fn describe(&self) -> String {
        "bundled sample".to_string()
    }

    async fn fetch(&self) -> Result<String, JournalError> {
        Ok(BUNDLED_JOURNALS.to_string())
    }
}

/// File provider when a path is configured, otherwise the bundled sample
pub fn provider_for(path: Option<&str>) -> Arc<dyn JournalProvider> {
    match path {
        Some(path) => Arc::new(FileJournals::new(path)),
        None => Arc::new(BundledJournals),
    }
}

/// Fetch and parse a journal book from any provider
pub async fn load_book(provider: &dyn JournalProvider) -> Result<JournalBook, JournalError> {
    let json = provider.fetch().await?;
    let book = JournalBook::from_json(&json)?;
    tracing::info!(
        "JOURNAL: {} journal(s) from {} ({} rejected)",
        book.len(),
        provider.describe(),
        book.rejected().len()
    );
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bundled_journals_parse_cleanly() {
        let book = load_book(&BundledJournals).await.unwrap();
        assert!(!book.is_empty());
        assert!(book.rejected().is_empty());
        assert!(book.lookup("2024-06-15").is_some());
    }

    #[test]
    fn test_provider_for_path() {
        assert_eq!(provider_for(None).describe(), "bundled sample");
        assert_eq!(provider_for(Some("/tmp/j.json")).describe(), "/tmp/j.json");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let provider = FileJournals::new("/nonexistent/daybook/journals.json");
        let result = load_book(&provider).await;
        assert!(matches!(result, Err(JournalError::Io(_))));
    }

    #[tokio::test]
    async fn test_file_provider_reads_json() {
        let path = std::env::temp_dir().join(format!("daybook-journals-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"[{"imgUrl": "x.jpg", "rating": 3, "date": "01/02/2024"}]"#,
        )
        .await
        .unwrap();

        let book = load_book(&FileJournals::new(&path)).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        let entry = book.lookup("2024-02-01").unwrap();
        assert!(entry.journal.categories.is_empty());
        assert_eq!(entry.stars(), 3);
    }
}
