//! Names of the attributes read and written by the built-in decorators.

/// The instrumentation component that produced the span, such as `okhttp`.
pub const COMPONENT: &str = "component";
/// `client` or `server`.
pub const SPAN_KIND: &str = "span.kind";
/// The span type, such as `http`, `web` or `sql`.
pub const SPAN_TYPE: &str = "span.type";
/// Marks a span as failed.
pub const ERROR: &str = "error";
/// The database system, such as `postgresql` or `mongo`.
pub const DB_TYPE: &str = "db.type";
/// The database statement.
pub const DB_STATEMENT: &str = "db.statement";
/// The service a span is attributed to.
pub const SERVICE_NAME: &str = "service.name";
/// The name of the operation.
pub const OPERATION_NAME: &str = "operation.name";
/// The resource, used to group spans of the same operation.
pub const RESOURCE_NAME: &str = "resource.name";
/// The HTTP response status code.
pub const HTTP_STATUS_CODE: &str = "http.status_code";
/// The full request URL.
pub const HTTP_URL: &str = "http.url";
/// The HTTP request method.
pub const HTTP_METHOD: &str = "http.method";
