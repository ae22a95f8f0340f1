use std::fmt;

use serde::Serialize;

use crate::field::FieldSpec;

const CONSUMED_CAPACITY: FieldSpec =
    FieldSpec::response("aws.dynamodb.consumed_capacity", "ConsumedCapacity");
const ITEM_COLLECTION_METRICS: FieldSpec =
    FieldSpec::response("aws.dynamodb.item_collection_metrics", "ItemCollectionMetrics");
const READ_CAPACITY_UNITS: FieldSpec = FieldSpec::request(
    "aws.dynamodb.provisioned_throughput.read_capacity_units",
    "ProvisionedThroughput.ReadCapacityUnits",
);
const WRITE_CAPACITY_UNITS: FieldSpec = FieldSpec::request(
    "aws.dynamodb.provisioned_throughput.write_capacity_units",
    "ProvisionedThroughput.WriteCapacityUnits",
);
const ATTRIBUTES_TO_GET: FieldSpec =
    FieldSpec::request("aws.dynamodb.attributes_to_get", "AttributesToGet");
const CONSISTENT_READ: FieldSpec =
    FieldSpec::request("aws.dynamodb.consistent_read", "ConsistentRead");
const INDEX_NAME: FieldSpec = FieldSpec::request("aws.dynamodb.index_name", "IndexName");
const LIMIT: FieldSpec = FieldSpec::request("aws.dynamodb.limit", "Limit");
const PROJECTION_EXPRESSION: FieldSpec =
    FieldSpec::request("aws.dynamodb.projection_expression", "ProjectionExpression");
const SELECT: FieldSpec = FieldSpec::request("aws.dynamodb.select", "Select");
const TABLE_NAMES: FieldSpec =
    FieldSpec::request("aws.dynamodb.table_names", "RequestItems").keys();
// Batch writes report metrics per table, keyed by table name.
const BATCH_ITEM_COLLECTION_METRICS: FieldSpec = ITEM_COLLECTION_METRICS.keys();

const CREATE_TABLE: &[FieldSpec] = &[
    FieldSpec::request(
        "aws.dynamodb.global_secondary_indexes",
        "GlobalSecondaryIndexes",
    ),
    FieldSpec::request(
        "aws.dynamodb.local_secondary_indexes",
        "LocalSecondaryIndexes",
    ),
    READ_CAPACITY_UNITS,
    WRITE_CAPACITY_UNITS,
];

const LIST_TABLES: &[FieldSpec] = &[
    FieldSpec::request(
        "aws.dynamodb.exclusive_start_table_name",
        "ExclusiveStartTableName",
    ),
    FieldSpec::response("aws.dynamodb.table_count", "TableNames").count(),
    LIMIT,
];

const QUERY: &[FieldSpec] = &[
    ATTRIBUTES_TO_GET,
    CONSISTENT_READ,
    INDEX_NAME,
    LIMIT,
    PROJECTION_EXPRESSION,
    FieldSpec::request("aws.dynamodb.scan_index_forward", "ScanIndexForward"),
    SELECT,
    CONSUMED_CAPACITY,
];

const SCAN: &[FieldSpec] = &[
    ATTRIBUTES_TO_GET,
    CONSISTENT_READ,
    INDEX_NAME,
    LIMIT,
    PROJECTION_EXPRESSION,
    FieldSpec::request("aws.dynamodb.segment", "Segment"),
    SELECT,
    FieldSpec::request("aws.dynamodb.total_segments", "TotalSegments"),
    CONSUMED_CAPACITY,
    FieldSpec::response("aws.dynamodb.count", "Count"),
    FieldSpec::response("aws.dynamodb.scanned_count", "ScannedCount"),
];

const UPDATE_TABLE: &[FieldSpec] = &[
    FieldSpec::request("aws.dynamodb.attribute_definitions", "AttributeDefinitions"),
    FieldSpec::request(
        "aws.dynamodb.global_secondary_index_updates",
        "GlobalSecondaryIndexUpdates",
    ),
    READ_CAPACITY_UNITS,
    WRITE_CAPACITY_UNITS,
];

/// The AWS service a request belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Family {
    /// Amazon DynamoDB.
    #[serde(rename = "DynamoDB")]
    DynamoDb,
    /// Amazon S3.
    S3,
    /// Amazon SQS.
    #[serde(rename = "SQS")]
    Sqs,
    /// Amazon Kinesis.
    Kinesis,
}

impl Family {
    /// Returns the service name as AWS spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DynamoDb => "DynamoDB",
            Self::S3 => "S3",
            Self::Sqs => "SQS",
            Self::Kinesis => "Kinesis",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinguishes generic family kinds from operation specific kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Matches the common base type of all requests of a service family.
    Generic,
    /// Matches the concrete request type of a single operation.
    Operation,
}

/// A supported kind of AWS SDK request.
///
/// The table of kinds is static. Each kind matches exactly one request type name within its
/// [`Tier`], and each [`Family`] has exactly one generic kind. Generic kinds carry no fields, they
/// only classify requests of a known service for which no operation kind exists.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum RequestKind {
    /// Any DynamoDB request.
    DynamoDbRequest,
    /// Any S3 request.
    S3Request,
    /// Any SQS request.
    SqsRequest,
    /// Any Kinesis request.
    KinesisRequest,
    /// DynamoDB `BatchGetItem`.
    BatchGetItem,
    /// DynamoDB `BatchWriteItem`.
    BatchWriteItem,
    /// DynamoDB `CreateTable`.
    CreateTable,
    /// DynamoDB `DeleteItem`.
    DeleteItem,
    /// DynamoDB `GetItem`.
    GetItem,
    /// DynamoDB `ListTables`.
    ListTables,
    /// DynamoDB `PutItem`.
    PutItem,
    /// DynamoDB `Query`.
    Query,
    /// DynamoDB `Scan`.
    Scan,
    /// DynamoDB `UpdateItem`.
    UpdateItem,
    /// DynamoDB `UpdateTable`.
    UpdateTable,
}

impl RequestKind {
    /// All request kinds, generic kinds first.
    pub const ALL: &'static [Self] = &[
        Self::DynamoDbRequest,
        Self::S3Request,
        Self::SqsRequest,
        Self::KinesisRequest,
        Self::BatchGetItem,
        Self::BatchWriteItem,
        Self::CreateTable,
        Self::DeleteItem,
        Self::GetItem,
        Self::ListTables,
        Self::PutItem,
        Self::Query,
        Self::Scan,
        Self::UpdateItem,
        Self::UpdateTable,
    ];

    /// Returns the stable name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::DynamoDbRequest => "DynamoDbRequest",
            Self::S3Request => "S3Request",
            Self::SqsRequest => "SqsRequest",
            Self::KinesisRequest => "KinesisRequest",
            Self::BatchGetItem => "BatchGetItem",
            Self::BatchWriteItem => "BatchWriteItem",
            Self::CreateTable => "CreateTable",
            Self::DeleteItem => "DeleteItem",
            Self::GetItem => "GetItem",
            Self::ListTables => "ListTables",
            Self::PutItem => "PutItem",
            Self::Query => "Query",
            Self::Scan => "Scan",
            Self::UpdateItem => "UpdateItem",
            Self::UpdateTable => "UpdateTable",
        }
    }

    /// Returns the request type name this kind matches.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::DynamoDbRequest => "DynamoDbRequest",
            Self::S3Request => "S3Request",
            Self::SqsRequest => "SqsRequest",
            Self::KinesisRequest => "KinesisRequest",
            Self::BatchGetItem => "BatchGetItemRequest",
            Self::BatchWriteItem => "BatchWriteItemRequest",
            Self::CreateTable => "CreateTableRequest",
            Self::DeleteItem => "DeleteItemRequest",
            Self::GetItem => "GetItemRequest",
            Self::ListTables => "ListTablesRequest",
            Self::PutItem => "PutItemRequest",
            Self::Query => "QueryRequest",
            Self::Scan => "ScanRequest",
            Self::UpdateItem => "UpdateItemRequest",
            Self::UpdateTable => "UpdateTableRequest",
        }
    }

    /// Returns the service family of this kind.
    pub fn family(self) -> Family {
        match self {
            Self::DynamoDbRequest
            | Self::BatchGetItem
            | Self::BatchWriteItem
            | Self::CreateTable
            | Self::DeleteItem
            | Self::GetItem
            | Self::ListTables
            | Self::PutItem
            | Self::Query
            | Self::Scan
            | Self::UpdateItem
            | Self::UpdateTable => Family::DynamoDb,
            Self::S3Request => Family::S3,
            Self::SqsRequest => Family::Sqs,
            Self::KinesisRequest => Family::Kinesis,
        }
    }

    /// Returns whether this kind is generic or operation specific.
    pub fn tier(self) -> Tier {
        match self {
            Self::DynamoDbRequest | Self::S3Request | Self::SqsRequest | Self::KinesisRequest => {
                Tier::Generic
            }
            _ => Tier::Operation,
        }
    }

    /// Returns all field specs of this kind in declaration order, across both directions.
    ///
    /// Use [`FieldMappingTable::fields`](crate::FieldMappingTable::fields) to get the specs of a
    /// single direction.
    pub fn field_specs(self) -> &'static [FieldSpec] {
        match self {
            Self::DynamoDbRequest | Self::S3Request | Self::SqsRequest | Self::KinesisRequest => {
                &[]
            }
            Self::BatchGetItem => &[TABLE_NAMES, CONSUMED_CAPACITY],
            Self::BatchWriteItem => &[
                TABLE_NAMES,
                CONSUMED_CAPACITY,
                BATCH_ITEM_COLLECTION_METRICS,
            ],
            Self::CreateTable => CREATE_TABLE,
            Self::DeleteItem | Self::PutItem | Self::UpdateItem => {
                &[CONSUMED_CAPACITY, ITEM_COLLECTION_METRICS]
            }
            Self::GetItem => &[PROJECTION_EXPRESSION, CONSUMED_CAPACITY, CONSISTENT_READ],
            Self::ListTables => LIST_TABLES,
            Self::Query => QUERY,
            Self::Scan => SCAN,
            Self::UpdateTable => UPDATE_TABLE,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
