use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A client method argument.
///
/// The API treats a field that was never sent differently from a field sent
/// as `null`, so both states are kept apart from a supplied value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Arg<T> {
    /// The caller did not supply the argument; the field is not sent.
    #[default]
    Omitted,
    /// The caller explicitly asked for `null`.
    Null,
    Present(T),
}

impl<T> Arg<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Arg::Omitted)
    }

    /// `None` becomes an explicit null.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Arg::Present(v),
            None => Arg::Null,
        }
    }

    /// Collapse to the value that would be sent, if any.
    pub fn sent(self) -> Option<Option<T>> {
        match self {
            Arg::Omitted => None,
            Arg::Null => Some(None),
            Arg::Present(v) => Some(Some(v)),
        }
    }
}

impl<T> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Arg::Present(value)
    }
}

/// Omitted and null both serialize as `null`; pair with
/// `#[serde(skip_serializing_if = "Arg::is_omitted")]` to drop omitted fields.
impl<T: Serialize> Serialize for Arg<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Arg::Omitted | Arg::Null => serializer.serialize_none(),
            Arg::Present(v) => v.serialize(serializer),
        }
    }
}

/// JSON request payload assembled from named arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    fields: Map<String, Value>,
}

impl RequestBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field unless the argument was omitted.
    pub fn field<T: Serialize>(
        mut self,
        name: &str,
        arg: Arg<T>,
    ) -> Result<Self, serde_json::Error> {
        match arg.sent() {
            None => {}
            Some(None) => {
                self.fields.insert(name.to_string(), Value::Null);
            }
            Some(Some(v)) => {
                self.fields.insert(name.to_string(), serde_json::to_value(v)?);
            }
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_omitted_fields_are_dropped() {
        let body = RequestBody::new()
            .field("name", Arg::Present("Bugs"))
            .unwrap()
            .field("color", Arg::<String>::Omitted)
            .unwrap()
            .field("external_id", Arg::<String>::Null)
            .unwrap();
        assert_eq!(
            body.into_value(),
            json!({ "name": "Bugs", "external_id": null })
        );
    }

    #[test]
    fn test_default_is_omitted() {
        let arg: Arg<i64> = Arg::default();
        assert!(arg.is_omitted());
        assert_eq!(arg.sent(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Arg::from_option(Some(3)), Arg::Present(3));
        assert_eq!(Arg::<i32>::from_option(None), Arg::Null);
    }

    #[test]
    fn test_skip_serializing_omitted() {
        #[derive(Serialize)]
        struct CategoryUpdate {
            #[serde(skip_serializing_if = "Arg::is_omitted")]
            archived: Arg<bool>,
            #[serde(skip_serializing_if = "Arg::is_omitted")]
            color: Arg<String>,
            #[serde(skip_serializing_if = "Arg::is_omitted")]
            name: Arg<String>,
        }

        let update = CategoryUpdate {
            archived: true.into(),
            color: Arg::Null,
            name: Arg::Omitted,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "archived": true, "color": null })
        );
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::new().field("a", Arg::<u8>::Omitted).unwrap();
        assert!(body.is_empty());
        assert_eq!(body.into_value(), json!({}));
    }
}
