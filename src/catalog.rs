//! Catalog store: the immutable record collection and its loader

use std::collections::HashSet;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Fallback name used for identifier synthesis when a record has no name.
const UNNAMED_ID_STEM: &str = "champ";

/// The loaded collection. Built once, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    /// Freeze a freshly loaded collection, assigning identifiers where the
    /// source omitted them and repairing duplicates.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        for (position, record) in records.iter_mut().enumerate() {
            if record.id.is_empty() {
                record.id = synthesize_id(&record.name, position);
            }
            if seen.insert(record.id.clone()) {
                continue;
            }
            let mut repaired = format!("{}-{}", record.id, position);
            let mut attempt = 1;
            while !seen.insert(repaired.clone()) {
                repaired = format!("{}-{}-{}", record.id, position, attempt);
                attempt += 1;
            }
            tracing::warn!(id = %record.id, %repaired, "duplicate record id");
            record.id = repaired;
        }
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Resolve a relationship reference: name first, then identifier, both
    /// compared case-insensitively.
    pub fn find_by_name_or_id(&self, token: &str) -> Option<&Record> {
        let needle = token.to_lowercase();
        self.records
            .iter()
            .find(|record| record.name.to_lowercase() == needle)
            .or_else(|| {
                self.records
                    .iter()
                    .find(|record| record.id.to_lowercase() == needle)
            })
    }

    /// Distinct role names in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for record in &self.records {
            for role in record.role_names() {
                if !categories.iter().any(|known| known == role) {
                    categories.push(role.to_string());
                }
            }
        }
        categories
    }
}

/// Deterministic identifier for a record without one: lower-cased name with
/// whitespace runs collapsed to `-`, suffixed with the record's position.
pub fn synthesize_id(name: &str, position: usize) -> String {
    let stem = if name.is_empty() {
        UNNAMED_ID_STEM
    } else {
        name
    };
    let mut id = String::with_capacity(stem.len() + 4);
    let mut in_whitespace = false;
    for ch in stem.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    id.push('-');
    id.push_str(&position.to_string());
    id
}

// ============================================================================
// Loading
// ============================================================================

/// Where the catalog document comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            CatalogSource::Url(source.to_string())
        } else {
            CatalogSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetch and parse the catalog document. Identifier synthesis happens in
/// [`Catalog::from_records`] once the records reach the store.
pub async fn load(source: &CatalogSource) -> Result<Vec<Record>, LoadError> {
    let body = match source {
        CatalogSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?
        }
        CatalogSource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            response.text().await?
        }
    };

    let records: Vec<Record> = serde_json::from_str(&body)?;
    tracing::info!(%source, count = records.len(), "catalog loaded");
    Ok(records)
}
