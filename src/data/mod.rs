pub mod model;

pub use model::{Item, Step, StepDefinition};

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

const BUNDLED_ITEMS: &str = include_str!("../../data/items.json");

static BUNDLED: OnceLock<Result<Arc<StepCollection>, String>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON step data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML step data: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("step `{key}` is malformed: {reason}")]
    Shape { key: String, reason: String },
    #[error("bundled step data is invalid: {0}")]
    Bundled(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    EmptyTitle { index: usize, key: String },
    NoItems { index: usize, key: String },
    DuplicateItemId { index: usize, key: String, id: String },
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle { index, key } => write!(f, "step {index} ({key}) has no title"),
            Self::NoItems { index, key } => write!(f, "step {index} ({key}) has no items"),
            Self::DuplicateItemId { index, key, id } => {
                write!(f, "step {index} ({key}) repeats item id `{id}`")
            }
        }
    }
}

/// Ordered, read-only list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepCollection {
    steps: Vec<Step>,
}

impl StepCollection {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Parses the bundled asset on first use and hands out the shared copy.
    pub fn bundled() -> Result<Arc<StepCollection>, DataError> {
        BUNDLED
            .get_or_init(|| {
                Self::from_json_str(BUNDLED_ITEMS)
                    .map(Arc::new)
                    .map_err(|err| err.to_string())
            })
            .clone()
            .map_err(DataError::Bundled)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let entries: IndexMap<String, JsonValue> = serde_json::from_str(text)?;
        Self::from_entries(entries)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, DataError> {
        let entries: IndexMap<String, JsonValue> = serde_yaml::from_str(text)?;
        Self::from_entries(entries)
    }

    /// Reads a step file, picking YAML for `.yaml`/`.yml` and JSON otherwise.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let collection = if is_yaml {
            Self::from_yaml_str(&text)?
        } else {
            Self::from_json_str(&text)?
        };
        tracing::debug!(path = %path.display(), steps = collection.size(), "loaded step data");
        Ok(collection)
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index).map(|step| &step.definition)
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.steps.get(index).map(|step| step.key.as_str())
    }

    pub fn size(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn lint(&self) -> Vec<LintWarning> {
        let mut warnings = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            let key = step.key.clone();
            if step.definition.title.trim().is_empty() {
                warnings.push(LintWarning::EmptyTitle {
                    index,
                    key: key.clone(),
                });
            }
            if step.definition.items.is_empty() {
                warnings.push(LintWarning::NoItems {
                    index,
                    key: key.clone(),
                });
            }
            let mut seen = HashSet::new();
            for item in &step.definition.items {
                if !seen.insert(item.id.as_str()) {
                    warnings.push(LintWarning::DuplicateItemId {
                        index,
                        key: key.clone(),
                        id: item.id.to_string(),
                    });
                }
            }
        }
        warnings
    }

    // Top-level entries go through IndexMap so step order follows the document.
    fn from_entries(entries: IndexMap<String, JsonValue>) -> Result<Self, DataError> {
        let mut steps = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            match entry {
                JsonValue::Object(_) => {
                    let definition = parse_definition(&key, entry)?;
                    steps.push(Step { key, definition });
                }
                JsonValue::Array(elements) => {
                    for (position, element) in elements.into_iter().enumerate() {
                        let step_key = format!("{key}[{position}]");
                        if !element.is_object() {
                            return Err(DataError::Shape {
                                key: step_key,
                                reason: "expected a step object".to_string(),
                            });
                        }
                        let definition = parse_definition(&step_key, element)?;
                        steps.push(Step {
                            key: step_key,
                            definition,
                        });
                    }
                }
                other => {
                    return Err(DataError::Shape {
                        key,
                        reason: format!("expected a step object or a list of steps, found {}", kind(&other)),
                    });
                }
            }
        }

        let collection = Self { steps };
        for warning in collection.lint() {
            tracing::warn!("{warning}");
        }
        Ok(collection)
    }
}

fn parse_definition(key: &str, value: JsonValue) -> Result<StepDefinition, DataError> {
    serde_json::from_value(value).map_err(|err| DataError::Shape {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_steps_all_have_titles() {
        let steps = StepCollection::bundled().expect("bundled data");
        assert_eq!(steps.size(), 3);
        for index in 0..steps.size() {
            let step = steps.get(index).expect("step in range");
            assert!(!step.title.is_empty());
        }
        assert!(steps.get(steps.size()).is_none());
        assert!(steps.lint().is_empty());
    }

    #[test]
    fn keeps_document_order() {
        let steps = StepCollection::from_json_str(
            r#"{"zeta": {"title": "Z"}, "alpha": {"title": "A"}, "mid": {"title": "M"}}"#,
        )
        .expect("parse");
        let keys: Vec<&str> = (0..steps.size()).filter_map(|i| steps.key(i)).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn list_entries_are_flattened_in_order() {
        let steps = StepCollection::from_json_str(
            r#"{
                "intro": {"title": "Intro"},
                "pages": [{"title": "P1"}, {"title": "P2"}],
                "outro": {"title": "Outro"}
            }"#,
        )
        .expect("parse");
        assert_eq!(steps.size(), 4);
        assert_eq!(steps.key(1), Some("pages[0]"));
        assert_eq!(steps.key(2), Some("pages[1]"));
        assert_eq!(steps.get(2).map(|s| s.title.as_str()), Some("P2"));
        assert_eq!(steps.key(3), Some("outro"));
    }

    #[test]
    fn missing_or_null_items_become_empty() {
        let steps = StepCollection::from_json_str(
            r#"{"a": {"title": "A", "description": "d"}, "b": {"title": "B", "items": null}}"#,
        )
        .expect("parse");
        assert!(steps.get(0).expect("a").items.is_empty());
        assert!(steps.get(1).expect("b").items.is_empty());
        assert_eq!(
            steps.lint(),
            vec![
                LintWarning::NoItems {
                    index: 0,
                    key: "a".to_string()
                },
                LintWarning::NoItems {
                    index: 1,
                    key: "b".to_string()
                },
            ]
        );
    }

    #[test]
    fn null_text_fields_become_empty() {
        let steps = StepCollection::from_json_str(
            r#"{"a": {"title": null, "description": null, "items": [{"id": 1, "label": null}]}}"#,
        )
        .expect("parse");
        let step = steps.get(0).expect("a");
        assert_eq!(step.title, "");
        assert_eq!(step.description, "");
        assert_eq!(step.items[0].id.as_str(), "1");
        assert_eq!(step.items[0].label, "");

        let yaml = StepCollection::from_yaml_str("a:\n  title: ~\n  items:\n    - id: 2\n      label:\n")
            .expect("yaml");
        assert_eq!(yaml.get(0).expect("a").title, "");
        assert_eq!(yaml.get(0).expect("a").items[0].label, "");
    }

    #[test]
    fn numeric_item_ids_are_accepted() {
        let steps = StepCollection::from_json_str(
            r#"{"a": {"title": "A", "items": [{"id": 1, "label": "One"}, {"id": "2", "label": "Two"}]}}"#,
        )
        .expect("parse");
        let items = &steps.get(0).expect("a").items;
        assert_eq!(items[0].id.as_str(), "1");
        assert_eq!(items[1].id.as_str(), "2");
    }

    #[test]
    fn scalar_entry_is_a_shape_error() {
        let err = StepCollection::from_json_str(r#"{"a": {"title": "A"}, "b": 3}"#)
            .expect_err("scalar entry");
        match err {
            DataError::Shape { key, .. } => assert_eq!(key, "b"),
            other => panic!("unexpected error: {other}"),
        }

        let err = StepCollection::from_json_str(r#"{"a": ["nope"]}"#).expect_err("bad element");
        assert!(matches!(err, DataError::Shape { ref key, .. } if key == "a[0]"));

        let err = StepCollection::from_json_str("[1, 2]").expect_err("array root");
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn yaml_documents_parse_the_same_way() {
        let steps = StepCollection::from_yaml_str(
            "first:\n  title: First\n  items:\n    - id: 1\n      label: One\n    - id: x\n      label: Ex\n",
        )
        .expect("yaml");
        let step = steps.get(0).expect("first");
        assert_eq!(step.title, "First");
        assert_eq!(step.items[0].id.as_str(), "1");
        assert_eq!(step.items[1].label, "Ex");
    }

    #[test]
    fn lint_flags_duplicates_and_empty_titles() {
        let steps = StepCollection::new(vec![Step {
            key: "dup".to_string(),
            definition: StepDefinition::new("", "")
                .with_item("1", "One")
                .with_item("1", "Again"),
        }]);
        let warnings = steps.lint();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].to_string(), "step 0 (dup) has no title");
        assert_eq!(warnings[1].to_string(), "step 0 (dup) repeats item id `1`");
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let json_path = dir.path().join("steps.json");
        let yaml_path = dir.path().join("steps.yml");
        std::fs::write(&json_path, r#"{"a": {"title": "From JSON"}}"#).expect("write");
        std::fs::write(&yaml_path, "a:\n  title: From YAML\n").expect("write");

        let json = StepCollection::load(&json_path).expect("json");
        let yaml = StepCollection::load(&yaml_path).expect("yaml");
        assert_eq!(json.get(0).map(|s| s.title.as_str()), Some("From JSON"));
        assert_eq!(yaml.get(0).map(|s| s.title.as_str()), Some("From YAML"));

        let missing = StepCollection::load(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(DataError::Read { .. })));
    }
}
