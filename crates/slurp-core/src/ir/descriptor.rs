use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Response sentinel for operations without a response body.
pub const VOID_RESPONSE: &str = "void";

/// Category assigned to freshly parsed descriptors.
pub const UNCATEGORIZED: &str = "N/A";

/// HTTP verb of an operation. Serialized lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 7] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Head,
        HttpVerb::Options,
        HttpVerb::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Delete => "delete",
            HttpVerb::Head => "head",
            HttpVerb::Options => "options",
            HttpVerb::Patch => "patch",
        }
    }

    /// Match a definition-line token, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        let lower = token.to_lowercase();
        Self::ALL.into_iter().find(|verb| verb.as_str() == lower)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented input of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub desc: String,
    pub required: bool,
    pub body_param: bool,
}

impl Parameter {
    /// Documentation order: required first, then name, type, and description.
    pub fn doc_order(&self, other: &Self) -> Ordering {
        other
            .required
            .cmp(&self.required)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.type_name.cmp(&other.type_name))
            .then_with(|| self.desc.cmp(&other.desc))
    }

    /// Name usable as an identifier in generated code.
    pub fn ident(&self) -> String {
        self.name.replace('-', "_")
    }
}

/// Normalized record describing one API operation.
///
/// Field order follows the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub title: String,
    pub identifier: String,
    pub response: String,
    pub params: Vec<Parameter>,
    pub description: Vec<String>,
    pub http_verb: HttpVerb,
    pub url_path: String,
    pub category: String,
}

impl OperationDescriptor {
    pub fn is_void(&self) -> bool {
        self.response == VOID_RESPONSE
    }

    /// Parameters embedded in the URL path or query string.
    pub fn url_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| !p.body_param)
    }

    /// Parameters sent in the request payload.
    pub fn body_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.body_param)
    }

    /// Generation order: category, then title.
    pub fn source_order(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.title.cmp(&other.title))
    }
}
