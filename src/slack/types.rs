use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One element of a `files.list` page, reduced to the columns the listing
/// tool prints. Uploads missing a field (tombstoned files) fall back to the
/// field's default rather than failing the whole page.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRecord {
    pub id: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub name: String,
}

impl FileRecord {
    /// Tab-separated line as printed by the listing tool.
    pub fn tsv_line(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.id, self.user, self.is_public, self.name)
    }
}

/// The `paging` block of a `files.list` response. `page` is 1-based; an
/// empty listing reports `pages: 0`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FilesPaging {
    pub page: u64,
    pub pages: u64,
}

impl FilesPaging {
    /// True when the upstream reports no further pages.
    pub fn is_last(&self) -> bool {
        self.page >= self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_record_tsv_line() {
        let record = FileRecord {
            id: "F0001".to_string(),
            user: "U0001".to_string(),
            is_public: true,
            name: "report.pdf".to_string(),
        };

        assert_eq!(record.tsv_line(), "F0001\tU0001\ttrue\treport.pdf");
    }

    #[test]
    fn test_file_record_defaults_missing_fields() {
        let record: FileRecord = serde_json::from_value(json!({ "id": "F0002" })).unwrap();

        assert_eq!(record.id, "F0002");
        assert_eq!(record.user, "");
        assert!(!record.is_public);
        assert_eq!(record.tsv_line(), "F0002\t\tfalse\t");
    }

    #[test]
    fn test_files_paging_last_page() {
        let paging: FilesPaging =
            serde_json::from_value(json!({ "page": 3, "pages": 3, "count": 100, "total": 250 }))
                .unwrap();
        assert!(paging.is_last());

        let paging: FilesPaging = serde_json::from_value(json!({ "page": 1, "pages": 3 })).unwrap();
        assert!(!paging.is_last());
    }

    #[test]
    fn test_files_paging_empty_listing() {
        // files.list reports pages: 0 when nothing matches the filter.
        let paging: FilesPaging = serde_json::from_value(json!({ "page": 1, "pages": 0 })).unwrap();
        assert!(paging.is_last());
    }
}
