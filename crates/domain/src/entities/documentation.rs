//! Documentation records as returned by the documentation endpoints

use crate::value_objects::DocLevel;
use serde::{Deserialize, Serialize};

/// Result of `GET /documentation/id?path=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationRef {
    pub id: i64,
    #[serde(default)]
    pub level: Option<DocLevel>,
}

impl DocumentationRef {
    /// Level reported by the server, or a guess from the path.
    pub fn resolved_level(&self, path: &str) -> DocLevel {
        self.level
            .unwrap_or_else(|| DocLevel::infer_from_path(path))
    }
}

/// Independently editable part of a folder/project document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    #[serde(default)]
    pub documentation_id: Option<i64>,
    pub section_name: String,
    pub section_content: String,
}

/// `PUT /documentation/{id}` body
#[derive(Debug, Clone, Serialize)]
pub struct DocumentUpdate<'a> {
    pub doc_content: &'a str,
}

/// `PUT /documentation/sections/{id}` body
#[derive(Debug, Clone, Serialize)]
pub struct SectionUpdate<'a> {
    pub section_content: &'a str,
}

/// Result of `GET /evaluation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub evaluation: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Entry of `GET /documentation/projects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Unescape the raw documentation body.
///
/// The endpoint returns the document as a JSON-ish string: literal `\n`
/// sequences, wrapping quotes and escape backslashes are removed.
pub fn process_documentation(raw: &str) -> String {
    let text = raw.replace("\\n", "\n");
    let text = text.strip_prefix('"').unwrap_or(&text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.replace('\\', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_documentation() {
        let raw = r##""# Title\n\nSome \"quoted\" text""##;
        assert_eq!(process_documentation(raw), "# Title\n\nSome \"quoted\" text");
    }

    #[test]
    fn test_process_documentation_plain_text_untouched() {
        assert_eq!(process_documentation("plain"), "plain");
    }

    #[test]
    fn test_resolved_level_falls_back_to_path() {
        let doc: DocumentationRef = serde_json::from_str(r#"{"id": 4}"#).expect("valid json");
        assert_eq!(doc.resolved_level("src/"), DocLevel::Folder);

        let doc: DocumentationRef =
            serde_json::from_str(r#"{"id": 4, "level": "project"}"#).expect("valid json");
        assert_eq!(doc.resolved_level("src/"), DocLevel::Project);
    }
}
