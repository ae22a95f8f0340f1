use spantag_protocol::{Attributes, Getter, resolve};

use crate::classify::classify;
use crate::field::{Direction, FieldSpec};
use crate::kind::RequestKind;
use crate::render::render;
use crate::request::SdkRequest;
use crate::table::FieldMappingTable;

/// Extracts span attributes from a request and, if available, its response.
///
/// Returns an empty map if the request cannot be classified. Fields that are missing from the
/// request or response are skipped. When no response is given, response fields are skipped
/// entirely.
///
/// This is equivalent to [`classify`] followed by [`extract_request`] and [`extract_response`].
pub fn extract<R>(request: &R, response: Option<&dyn Getter>) -> Attributes
where
    R: SdkRequest + ?Sized,
{
    let mut attributes = Attributes::new();

    let Some(kind) = classify(request) else {
        return attributes;
    };

    extract_request(kind, request, &mut attributes);
    if let Some(response) = response {
        extract_response(kind, response, &mut attributes);
    }

    attributes
}

/// Writes the request attributes of `kind` into `attributes`.
///
/// Use this together with [`extract_response`] when the response becomes available later than
/// the request.
pub fn extract_request<T>(kind: RequestKind, request: &T, attributes: &mut Attributes)
where
    T: Getter + ?Sized,
{
    extract_fields(kind, Direction::Request, request, attributes);
}

/// Writes the response attributes of `kind` into `attributes`.
pub fn extract_response<T>(kind: RequestKind, response: &T, attributes: &mut Attributes)
where
    T: Getter + ?Sized,
{
    extract_fields(kind, Direction::Response, response, attributes);
}

fn extract_fields<T>(kind: RequestKind, direction: Direction, root: &T, attributes: &mut Attributes)
where
    T: Getter + ?Sized,
{
    for spec in FieldMappingTable::get().fields(kind, direction) {
        extract_field(spec, root, attributes);
    }
}

fn extract_field<T>(spec: &FieldSpec, root: &T, attributes: &mut Attributes)
where
    T: Getter + ?Sized,
{
    if let Some(value) = resolve(root, spec.path()).and_then(|val| render(val, spec.policy())) {
        attributes.insert(spec.attribute(), value);
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;
    use spantag_protocol::{AttributeValue, Value};

    use crate::request::DynamicRequest;

    use super::*;

    fn request(json: serde_json::Value) -> DynamicRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_request_only() {
        let request = request(serde_json::json!({
            "type": "QueryRequest",
            "fields": {
                "TableName": "users",
                "IndexName": "by-email",
                "Limit": 25,
                "ScanIndexForward": false,
                "AttributesToGet": ["id", "email"]
            }
        }));

        let attributes = extract(&request, None);

        insta::assert_json_snapshot!(attributes, @r###"
        {
          "aws.dynamodb.attributes_to_get": "[id,email]",
          "aws.dynamodb.index_name": "by-email",
          "aws.dynamodb.limit": 25,
          "aws.dynamodb.scan_index_forward": false
        }
        "###);
    }

    #[test]
    fn test_response_fields() {
        let request = request(serde_json::json!({
            "type": "ScanRequest",
            "fields": {"Segment": 1, "TotalSegments": 4}
        }));
        let response: Value = serde_json::from_str(r#"{"Count": 7, "ScannedCount": 20}"#).unwrap();

        let attributes = extract(&request, Some(&response));

        insta::assert_json_snapshot!(attributes, @r###"
        {
          "aws.dynamodb.count": 7,
          "aws.dynamodb.scanned_count": 20,
          "aws.dynamodb.segment": 1,
          "aws.dynamodb.total_segments": 4
        }
        "###);
    }

    #[test]
    fn test_nested_path() {
        let request = request(serde_json::json!({
            "type": "CreateTableRequest",
            "fields": {
                "ProvisionedThroughput": {"ReadCapacityUnits": 5, "WriteCapacityUnits": 2}
            }
        }));

        let attributes = extract(&request, None);
        assert_eq!(
            attributes.get("aws.dynamodb.provisioned_throughput.read_capacity_units"),
            Some(&AttributeValue::I64(5))
        );
        assert_eq!(
            attributes.get("aws.dynamodb.provisioned_throughput.write_capacity_units"),
            Some(&AttributeValue::I64(2))
        );
    }

    #[test]
    fn test_generic_kind_yields_nothing() {
        let request = DynamicRequest::new("DescribeTableRequest")
            .with_parent("DynamoDbRequest")
            .with_field("TableName", "users");

        assert!(extract(&request, None).is_empty());
    }

    #[test]
    fn test_split_extraction() {
        let mut attributes = Attributes::new();

        let request = DynamicRequest::new("ListTablesRequest").with_field("Limit", 3i64);
        extract_request(RequestKind::ListTables, &request, &mut attributes);
        assert_eq!(attributes.len(), 1);

        let response: Value = serde_json::from_str(r#"{"TableNames": ["a", "b"]}"#).unwrap();
        extract_response(RequestKind::ListTables, &response, &mut attributes);

        assert_eq!(
            attributes.get("aws.dynamodb.table_count"),
            Some(&AttributeValue::I64(2))
        );
        assert_eq!(attributes.len(), 2);
    }
}
