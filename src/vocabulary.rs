use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::SAMPLE_VOCABULARY;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary: {0}")]
    Io(#[from] std::io::Error),

    #[error("vocabulary file is empty")]
    EmptyFile,

    #[error("column `{column}` not found in header `{header}`")]
    MissingColumn { column: String, header: String },
}

/// Entries in the order they were loaded, duplicates and casing untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<String>,
}

impl Vocabulary {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn sample() -> Self {
        SAMPLE_VOCABULARY.iter().map(|s| s.to_string()).collect()
    }

    pub async fn load<P: AsRef<Path>>(path: P, column: &str) -> Result<Self, VocabularyError> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        let vocabulary = Self::parse_csv(&text, column)?;
        info!(
            path = %path.as_ref().display(),
            entries = vocabulary.len(),
            "loaded vocabulary"
        );
        Ok(vocabulary)
    }

    /// Like [`Vocabulary::load`], but a missing file falls back to the sample list.
    pub async fn load_or_sample<P: AsRef<Path>>(
        path: P,
        column: &str,
    ) -> Result<Self, VocabularyError> {
        match Self::load(path.as_ref(), column).await {
            Err(VocabularyError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    path = %path.as_ref().display(),
                    "vocabulary file not found, using sample list"
                );
                Ok(Self::sample())
            }
            other => other,
        }
    }

    pub fn parse_csv(text: &str, column: &str) -> Result<Self, VocabularyError> {
        let mut lines = text.lines();
        let header_line = lines
            .next()
            .map(|l| l.trim_start_matches('\u{feff}'))
            .ok_or(VocabularyError::EmptyFile)?;

        let header = split_record(header_line);
        let idx = header
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| VocabularyError::MissingColumn {
                column: column.to_string(),
                header: header_line.to_string(),
            })?;

        let mut entries = Vec::new();
        for (n, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match split_record(line).into_iter().nth(idx) {
                Some(value) if !value.trim().is_empty() => entries.push(value.trim().to_string()),
                _ => debug!(line = n + 2, "skipping row without a `{column}` value"),
            }
        }

        Ok(Self { entries })
    }

    pub fn head(&self, n: usize) -> &[String] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn sort(&mut self) {
        self.entries.sort_by_cached_key(|e| e.to_lowercase());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<String> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Splits one CSV line. Quoted fields may contain commas and `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
