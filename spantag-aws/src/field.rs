use std::fmt;

use serde::Serialize;

/// Selects the object a [`FieldSpec`] is resolved against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The outgoing request.
    Request,
    /// The response returned by the service.
    Response,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Response => f.write_str("response"),
        }
    }
}

/// Declares how a resolved value is turned into an attribute.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuePolicy {
    /// Stores the value itself.
    ///
    /// Scalars are stored typed. Lists are rendered as `[a,b]`, keyed containers and structured
    /// objects as compact JSON.
    #[default]
    Raw,
    /// Stores the keys of a keyed container as `[a,b]`, such as the table names of a batch
    /// request.
    ///
    /// Values that are not keyed containers are omitted.
    Keys,
    /// Stores the number of elements of a list or keyed container.
    ///
    /// Values that are not collections are omitted.
    Count,
}

/// Maps a field of a request or response to a span attribute.
///
/// Field specs are declared statically in the request table. Use [`FieldSpec::request`] and
/// [`FieldSpec::response`] to create them:
///
/// ```
/// use spantag_aws::{Direction, FieldSpec, ValuePolicy};
///
/// let spec = FieldSpec::response("aws.dynamodb.table_count", "TableNames").count();
/// assert_eq!(spec.direction(), Direction::Response);
/// assert_eq!(spec.policy(), ValuePolicy::Count);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct FieldSpec {
    attribute: &'static str,
    path: &'static str,
    direction: Direction,
    policy: ValuePolicy,
}

impl FieldSpec {
    /// Creates a spec for a field of the request.
    pub const fn request(attribute: &'static str, path: &'static str) -> Self {
        Self {
            attribute,
            path,
            direction: Direction::Request,
            policy: ValuePolicy::Raw,
        }
    }

    /// Creates a spec for a field of the response.
    pub const fn response(attribute: &'static str, path: &'static str) -> Self {
        Self {
            attribute,
            path,
            direction: Direction::Response,
            policy: ValuePolicy::Raw,
        }
    }

    /// Stores the element count of the resolved collection instead of its contents.
    pub const fn count(self) -> Self {
        Self {
            policy: ValuePolicy::Count,
            ..self
        }
    }

    /// Stores the keys of the resolved keyed container instead of its contents.
    pub const fn keys(self) -> Self {
        Self {
            policy: ValuePolicy::Keys,
            ..self
        }
    }

    /// The namespaced attribute name, for example `aws.dynamodb.limit`.
    pub fn attribute(&self) -> &'static str {
        self.attribute
    }

    /// The path of the value, see [`resolve`](spantag_protocol::resolve).
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Whether this spec reads from the request or from the response.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// How the resolved value is stored.
    pub fn policy(&self) -> ValuePolicy {
        self.policy
    }
}
