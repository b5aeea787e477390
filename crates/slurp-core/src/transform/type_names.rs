use indexmap::IndexMap;

/// Documented type names and the target type names they map to.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("String", "str"),
    ("UUID", "str"),
    ("Integer", "int"),
    ("Boolean", "bool"),
    ("Date", "datetime"),
    ("Enum (milestone)", "CategoryType"),
    ("Enum (done, in progress, to do)", "MilestoneWorkflowState"),
    ("Enum (bug, chore, feature)", "StoryType"),
    ("Enum (blocks, duplicates, relates to)", "StoryLinkVerb"),
    ("Enum (box, dropbox, google, onedrive, url)", "LinkedFileType"),
    ("Enum (done, started, unstarted)", "WorkflowStateTypes"),
    ("No Content", "void"),
];

const NULLABLE_SUFFIX: &str = " or null";

/// Closing forms of an example array such as `[ Story, … ]`.
const EXAMPLE_ARRAY_SUFFIXES: &[&str] = &[", … ]", ", …]"];

/// Table-driven mapping from documented type names to target type names.
///
/// Unknown names pass through unchanged; they are assumed to name a domain
/// type defined elsewhere.
#[derive(Debug, Clone)]
pub struct TypeMap {
    names: IndexMap<String, String>,
}

impl Default for TypeMap {
    fn default() -> Self {
        Self {
            names: BUILTIN_TYPES
                .iter()
                .map(|(doc, target)| (doc.to_string(), target.to_string()))
                .collect(),
        }
    }
}

impl TypeMap {
    /// Built-in table with `extra` entries layered on top.
    pub fn with_overrides<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut map = Self::default();
        for (doc, target) in extra {
            map.names.insert(doc.clone(), target.clone());
        }
        map
    }

    pub fn map_name(&self, documented: &str) -> String {
        self.names
            .get(documented)
            .cloned()
            .unwrap_or_else(|| documented.to_string())
    }

    /// Normalize a parameter's documented type, e.g. `Array [Integer] or null`.
    pub fn normalize_param_type(&self, documented: &str) -> String {
        let mut inner = documented.trim();

        let is_array = inner.starts_with("Array");
        if is_array {
            if let (Some(open), Some(close)) = (inner.find('['), inner.rfind(']')) {
                if open < close {
                    inner = inner[open + 1..close].trim();
                }
            }
        }

        let nullable = inner.ends_with(NULLABLE_SUFFIX);
        if nullable {
            inner = inner[..inner.len() - NULLABLE_SUFFIX.len()].trim();
        }

        let mut mapped = self.map_name(inner);
        if is_array {
            mapped = sequence_of(&mapped);
        }
        if nullable {
            mapped = optional(&mapped);
        }
        mapped
    }

    /// Normalize the type text of a 2xx response row.
    pub fn normalize_response(&self, documented: &str) -> String {
        match example_array_item(documented) {
            Some(item) => sequence_of(&self.map_name(item)),
            None => self.map_name(documented),
        }
    }
}

/// `[ Story, … ]` names a list of `Story`.
fn example_array_item(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("[ ")?;
    EXAMPLE_ARRAY_SUFFIXES
        .iter()
        .find_map(|suffix| rest.strip_suffix(suffix))
}

fn sequence_of(inner: &str) -> String {
    format!("List[{inner}]")
}

fn optional(inner: &str) -> String {
    format!("Optional[{inner}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let map = TypeMap::default();
        assert_eq!(map.map_name("Integer"), "int");
        assert_eq!(map.map_name("UUID"), "str");
        assert_eq!(map.map_name("Enum (bug, chore, feature)"), "StoryType");
        assert_eq!(map.map_name("No Content"), "void");
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(TypeMap::default().map_name("StoryContents"), "StoryContents");
    }

    #[test]
    fn test_array_param() {
        let map = TypeMap::default();
        assert_eq!(map.normalize_param_type("Array [Integer]"), "List[int]");
        assert_eq!(map.normalize_param_type("Array [ UUID ]"), "List[str]");
        assert_eq!(map.normalize_param_type("Array [Label]"), "List[Label]");
    }

    #[test]
    fn test_nullable_param() {
        let map = TypeMap::default();
        assert_eq!(map.normalize_param_type("Date or null"), "Optional[datetime]");
        assert_eq!(
            map.normalize_param_type("Array [UUID or null]"),
            "Optional[List[str]]"
        );
    }

    #[test]
    fn test_array_without_brackets_keeps_text() {
        assert_eq!(TypeMap::default().normalize_param_type("Array"), "List[Array]");
    }

    #[test]
    fn test_overrides() {
        let extra: IndexMap<String, String> =
            [("Float".to_string(), "float".to_string()), ("Integer".to_string(), "int64".to_string())]
                .into_iter()
                .collect();
        let map = TypeMap::with_overrides(&extra);
        assert_eq!(map.map_name("Float"), "float");
        assert_eq!(map.map_name("Integer"), "int64");
        assert_eq!(map.map_name("String"), "str");
    }

    #[test]
    fn test_response_example_array() {
        let map = TypeMap::default();
        assert_eq!(map.normalize_response("[ Story, … ]"), "List[Story]");
        assert_eq!(map.normalize_response("[ Story, …]"), "List[Story]");
        assert_eq!(map.normalize_response("Story"), "Story");
        assert_eq!(map.normalize_response("No Content"), "void");
        assert_eq!(map.normalize_response("[ Story ]"), "[ Story ]");
    }
}
