use std::fmt;

use spantag_protocol::{AttributeValue, Attributes};

use crate::resource::url_resource_name;
use crate::tags;

/// The computation performed by a decoration rule when it matches.
///
/// Each kind has a registered identifier, which is the name used in configuration files, and a
/// default [template](crate::RuleTemplate) providing the tags it matches and writes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DecoratorKind {
    /// Sets `span.type` to `web` for server spans and to `http` otherwise.
    HttpComponent,
    /// Copies the error flag as a boolean.
    ErrorFlag,
    /// Attributes database spans to a service named after the database type.
    DbType,
    /// Uses the database statement as the resource name.
    DbStatementAsResourceName,
    /// Derives the operation name from the instrumentation component.
    Operation,
    /// Groups all `404` responses into a single resource.
    Status404,
    /// Uses the normalized request URL as the resource name.
    UrlAsResourceName,
    /// Writes the configured value, or the matched value, to the target tag.
    SetTag,
}

impl DecoratorKind {
    /// Returns the identifier of this kind in configuration files.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::HttpComponent => "HTTPComponent",
            Self::ErrorFlag => "ErrorFlag",
            Self::DbType => "DBTypeDecorator",
            Self::DbStatementAsResourceName => "DBStatementAsResourceName",
            Self::Operation => "OperationDecorator",
            Self::Status404 => "Status404Decorator",
            Self::UrlAsResourceName => "URLAsResourceName",
            Self::SetTag => "SetTag",
        }
    }

    /// Computes and writes the tags of this kind.
    ///
    /// `matched` is the value of the matching tag and `target` the primary tag this kind writes.
    pub(crate) fn decorate(
        self,
        matched: &AttributeValue,
        target: &str,
        attributes: &mut Attributes,
    ) {
        match self {
            Self::HttpComponent => {
                let span_type = match attributes.get_str(tags::SPAN_KIND) {
                    Some("server") => "web",
                    _ => "http",
                };
                attributes.insert(target, span_type);
            }
            Self::ErrorFlag => {
                let is_error = match matched {
                    AttributeValue::Bool(value) => *value,
                    other => other.to_string().eq_ignore_ascii_case("true"),
                };
                attributes.insert(target, is_error);
            }
            Self::DbType => {
                let db_type = matched.to_string();
                let span_type = match db_type.as_str() {
                    "mongo" | "mongodb" => "mongodb",
                    "cassandra" => "cassandra",
                    "memcached" => "memcached",
                    _ => "sql",
                };
                attributes.insert(tags::SPAN_TYPE, span_type);
                attributes.insert(tags::OPERATION_NAME, format!("{db_type}.query"));
                attributes.insert(target, db_type);
            }
            Self::DbStatementAsResourceName => {
                // Mongo statements contain the full query document.
                if attributes.get_str(tags::COMPONENT) == Some("java-mongo") {
                    return;
                }

                let statement = matched.to_string();
                if !statement.trim().is_empty() {
                    attributes.insert(target, statement);
                }
            }
            Self::Operation => {
                let Some(component) = matched.as_str() else {
                    return;
                };

                let operation = match component {
                    "apache-httpclient" => "apache.http",
                    "java-aws-sdk" => "aws.http",
                    "java-jms" => "jms",
                    "okhttp" => "okhttp.http",
                    _ => return,
                };
                attributes.insert(target, operation);
            }
            Self::Status404 => {
                attributes.insert(target, "404");
            }
            Self::UrlAsResourceName => {
                let is_404 = attributes
                    .get(tags::HTTP_STATUS_CODE)
                    .is_some_and(|status| status.loosely_eq(&AttributeValue::I64(404)));
                if is_404 {
                    return;
                }

                let method = attributes.get_str(tags::HTTP_METHOD);
                if let Some(resource) = url_resource_name(method, &matched.to_string()) {
                    attributes.insert(target, resource);
                }
            }
            Self::SetTag => {
                attributes.insert(target, matched.clone());
            }
        }
    }
}

impl fmt::Display for DecoratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn decorate(kind: DecoratorKind, matched: &str, target: &str, attributes: &mut Attributes) {
        kind.decorate(&AttributeValue::from(matched), target, attributes);
    }

    #[test]
    fn test_http_component_server() {
        let mut attributes = Attributes::from_iter([("span.kind", "server")]);
        decorate(DecoratorKind::HttpComponent, "okhttp", "span.type", &mut attributes);
        assert_eq!(attributes.get_str("span.type"), Some("web"));
    }

    #[test]
    fn test_error_flag() {
        let mut attributes = Attributes::new();
        decorate(DecoratorKind::ErrorFlag, "TRUE", "error", &mut attributes);
        assert_eq!(attributes.get("error"), Some(&AttributeValue::Bool(true)));

        decorate(DecoratorKind::ErrorFlag, "yes", "error", &mut attributes);
        assert_eq!(attributes.get("error"), Some(&AttributeValue::Bool(false)));
    }

    #[test]
    fn test_db_type() {
        let mut attributes = Attributes::new();
        decorate(DecoratorKind::DbType, "mongo", "service.name", &mut attributes);

        insta::assert_json_snapshot!(attributes, @r###"
        {
          "operation.name": "mongo.query",
          "service.name": "mongo",
          "span.type": "mongodb"
        }
        "###);
    }

    #[test]
    fn test_db_statement_skips_mongo() {
        let mut attributes = Attributes::from_iter([("component", "java-mongo")]);
        decorate(
            DecoratorKind::DbStatementAsResourceName,
            r#"{"find": "users"}"#,
            "resource.name",
            &mut attributes,
        );
        assert!(!attributes.contains_key("resource.name"));
    }

    #[test]
    fn test_db_statement_skips_empty() {
        let mut attributes = Attributes::new();
        decorate(DecoratorKind::DbStatementAsResourceName, "  ", "resource.name", &mut attributes);
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_operation_unknown_component() {
        let mut attributes = Attributes::new();
        decorate(DecoratorKind::Operation, "grpc", "operation.name", &mut attributes);
        assert!(attributes.is_empty());

        decorate(DecoratorKind::Operation, "java-jms", "operation.name", &mut attributes);
        assert_eq!(attributes.get_str("operation.name"), Some("jms"));
    }

    #[test]
    fn test_url_skipped_for_404() {
        let mut attributes = Attributes::from_iter([("http.status_code", "404")]);
        decorate(
            DecoratorKind::UrlAsResourceName,
            "https://example.com/missing/1",
            "resource.name",
            &mut attributes,
        );
        assert!(!attributes.contains_key("resource.name"));
    }
}
