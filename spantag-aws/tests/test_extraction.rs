use similar_asserts::assert_eq;
use spantag_aws::{DynamicRequest, RequestKind, SdkRequest, classify, extract};
use spantag_protocol::{AttributeValue, Attributes, Getter, Object, Val, Value};

/// A typed request shape, as an SDK would generate it.
struct GetItemRequest {
    table_name: String,
    consistent_read: Option<bool>,
    projection_expression: Option<String>,
}

impl Getter for GetItemRequest {
    fn get_field(&self, name: &str) -> Option<Val<'_>> {
        match name {
            "TableName" => Some(Val::from(&self.table_name)),
            "ConsistentRead" => self.consistent_read.map(Val::from),
            "ProjectionExpression" => self.projection_expression.as_ref().map(Val::from),
            _ => None,
        }
    }
}

impl SdkRequest for GetItemRequest {
    fn type_name(&self) -> &str {
        "GetItemRequest"
    }

    fn parent_type_name(&self) -> Option<&str> {
        Some("DynamoDbRequest")
    }
}

#[test]
fn test_get_item_without_response() {
    let request = GetItemRequest {
        table_name: "users".to_owned(),
        consistent_read: Some(true),
        projection_expression: None,
    };

    let attributes = extract(&request, None);

    let expected = Attributes::from_iter([("aws.dynamodb.consistent_read", true)]);
    assert_eq!(attributes, expected);
    assert!(!attributes.contains_key("aws.dynamodb.consumed_capacity"));
}

struct ConsumedCapacity {
    table_name: String,
    capacity_units: f64,
}

impl Getter for ConsumedCapacity {
    fn get_field(&self, name: &str) -> Option<Val<'_>> {
        match name {
            "TableName" => Some(Val::from(&self.table_name)),
            "CapacityUnits" => Some(Val::from(self.capacity_units)),
            _ => None,
        }
    }

    fn to_value(&self) -> Option<Value> {
        let mut object = Object::new();
        object.insert("TableName".to_owned(), self.table_name.as_str().into());
        object.insert("CapacityUnits".to_owned(), self.capacity_units.into());
        Some(Value::Object(object))
    }
}

struct GetItemResponse {
    consumed_capacity: Option<ConsumedCapacity>,
}

impl Getter for GetItemResponse {
    fn get_field(&self, name: &str) -> Option<Val<'_>> {
        match name {
            "ConsumedCapacity" => Some(Val::Struct(self.consumed_capacity.as_ref()?)),
            _ => None,
        }
    }
}

#[test]
fn test_get_item_with_response() {
    let request = GetItemRequest {
        table_name: "users".to_owned(),
        consistent_read: None,
        projection_expression: Some("id, email".to_owned()),
    };
    let response = GetItemResponse {
        consumed_capacity: Some(ConsumedCapacity {
            table_name: "users".to_owned(),
            capacity_units: 0.5,
        }),
    };

    let attributes = extract(&request, Some(&response));

    insta::assert_json_snapshot!(attributes, @r###"
    {
      "aws.dynamodb.consumed_capacity": "{\"CapacityUnits\":0.5,\"TableName\":\"users\"}",
      "aws.dynamodb.projection_expression": "id, email"
    }
    "###);
}

#[test]
fn test_get_item_json_response() {
    let request = DynamicRequest::new("GetItemRequest").with_parent("DynamoDbRequest");
    let response: Value = serde_json::from_str(
        r#"{"ConsumedCapacity": {"TableName": "users", "CapacityUnits": 0.5}}"#,
    )
    .unwrap();

    let attributes = extract(&request, Some(&response));

    assert_eq!(
        attributes.get_str("aws.dynamodb.consumed_capacity"),
        Some(r#"{"CapacityUnits":0.5,"TableName":"users"}"#)
    );
}

#[test]
fn test_put_item_json_response() {
    let request = DynamicRequest::new("PutItemRequest").with_field("TableName", "users");
    let response: Value = serde_json::from_str(
        r#"{
            "ItemCollectionMetrics": {
                "ItemCollectionKey": {"id": {"S": "1"}},
                "SizeEstimateRangeGB": [0.0, 1.0]
            }
        }"#,
    )
    .unwrap();

    let attributes = extract(&request, Some(&response));

    insta::assert_json_snapshot!(attributes, @r###"
    {
      "aws.dynamodb.item_collection_metrics": "{\"ItemCollectionKey\":{\"id\":{\"S\":\"1\"}},\"SizeEstimateRangeGB\":[0.0,1.0]}"
    }
    "###);
}

#[test]
fn test_batch_write_item_metrics_by_table() {
    let request: DynamicRequest = serde_json::from_str(
        r#"{
            "type": "BatchWriteItemRequest",
            "fields": {"RequestItems": {"users": [], "orders": []}}
        }"#,
    )
    .unwrap();
    let response: Value = serde_json::from_str(
        r#"{"ItemCollectionMetrics": {"users": [{"SizeEstimateRangeGB": [0.0, 1.0]}]}}"#,
    )
    .unwrap();

    let attributes = extract(&request, Some(&response));

    let expected = Attributes::from_iter([
        ("aws.dynamodb.item_collection_metrics", "[users]"),
        ("aws.dynamodb.table_names", "[orders,users]"),
    ]);
    assert_eq!(attributes, expected);
}

#[test]
fn test_response_without_capacity() {
    let request = GetItemRequest {
        table_name: "users".to_owned(),
        consistent_read: Some(false),
        projection_expression: None,
    };
    let response = GetItemResponse {
        consumed_capacity: None,
    };

    let attributes = extract(&request, Some(&response));

    let expected = Attributes::from_iter([("aws.dynamodb.consistent_read", false)]);
    assert_eq!(attributes, expected);
}

#[test]
fn test_list_tables_count() {
    let request = DynamicRequest::new("ListTablesRequest").with_parent("DynamoDbRequest");
    let response: Value =
        serde_json::from_str(r#"{"TableNames": ["users", "orders", "events"]}"#).unwrap();

    let attributes = extract(&request, Some(&response));

    assert_eq!(
        attributes.get("aws.dynamodb.table_count"),
        Some(&AttributeValue::I64(3))
    );
    assert_eq!(attributes.len(), 1);
}

#[test]
fn test_batch_get_item_table_names() {
    let request: DynamicRequest = serde_json::from_str(
        r#"{
            "type": "BatchGetItemRequest",
            "fields": {
                "RequestItems": {
                    "users": {"Keys": [{"id": {"S": "1"}}]},
                    "orders": {"Keys": [{"id": {"S": "2"}}]}
                }
            }
        }"#,
    )
    .unwrap();

    let attributes = extract(&request, None);

    assert_eq!(
        attributes.get_str("aws.dynamodb.table_names"),
        Some("[orders,users]")
    );
}

#[test]
fn test_generic_fallback() {
    let request = DynamicRequest::new("PutObjectRequest")
        .with_parent("S3Request")
        .with_field("Bucket", "uploads");

    assert_eq!(classify(&request), Some(RequestKind::S3Request));
    assert!(extract(&request, None).is_empty());
}

#[test]
fn test_unknown_request() {
    let request = DynamicRequest::new("SendEmailRequest")
        .with_parent("SesRequest")
        .with_field("Limit", 10i64);

    assert_eq!(classify(&request), None);
    assert!(extract(&request, None).is_empty());
}

#[test]
fn test_missing_fields_are_omitted() {
    let request = DynamicRequest::new("QueryRequest").with_field("Select", "COUNT");
    let response: Value = serde_json::from_str("{}").unwrap();

    let attributes = extract(&request, Some(&response));

    let expected = Attributes::from_iter([("aws.dynamodb.select", "COUNT")]);
    assert_eq!(attributes, expected);
}
