use serde::Deserialize;
use spantag_protocol::{Getter, Object, Val, Value};

/// An AWS SDK request that can be classified and read from.
///
/// The type names are declared by the request, they are never inferred. For the AWS SDK, the
/// type name is the name of the concrete request shape, such as `GetItemRequest`, and the parent
/// type name is the name of the common base of the service, such as `DynamoDbRequest`.
pub trait SdkRequest: Getter {
    /// The concrete type name of the request.
    fn type_name(&self) -> &str;

    /// The type name of the declared parent, if any.
    fn parent_type_name(&self) -> Option<&str> {
        None
    }
}

/// A request backed by a dynamic payload.
///
/// This is the deserialized form used by tools and tests:
///
/// ```json
/// {"type": "ScanRequest", "parent": "DynamoDbRequest", "fields": {"Limit": 10}}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DynamicRequest {
    /// The concrete type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The parent type name.
    #[serde(default)]
    pub parent: Option<String>,
    /// The members of the request.
    #[serde(default)]
    pub fields: Object,
}

impl DynamicRequest {
    /// Creates a request of the given type without fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Sets the parent type name.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets a member of the request.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Getter for DynamicRequest {
    fn get_field(&self, name: &str) -> Option<Val<'_>> {
        self.fields.get_field(name)
    }

    fn to_value(&self) -> Option<Value> {
        self.fields.to_value()
    }
}

impl SdkRequest for DynamicRequest {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn parent_type_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let request: DynamicRequest = serde_json::from_str(
            r#"{"type": "ScanRequest", "parent": "DynamoDbRequest", "fields": {"Limit": 10}}"#,
        )
        .unwrap();

        assert_eq!(
            request,
            DynamicRequest::new("ScanRequest")
                .with_parent("DynamoDbRequest")
                .with_field("Limit", 10i64)
        );
        assert_eq!(request.get_field("Limit"), Some(Val::I64(10)));
    }

    #[test]
    fn test_deserialize_minimal() {
        let request: DynamicRequest = serde_json::from_str(r#"{"type": "S3Request"}"#).unwrap();
        assert_eq!(request.type_name(), "S3Request");
        assert_eq!(request.parent_type_name(), None);
        assert!(request.fields.is_empty());
    }
}
