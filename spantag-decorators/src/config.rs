use serde::{Deserialize, Serialize};
use spantag_protocol::AttributeValue;

use crate::rule::SetValue;

/// Configuration of the decoration rules.
///
/// ```yaml
/// decorators:
///   - type: HTTPComponent
///     matchingTag: component
///     matchingValue: okhttp
///   - type: SetTag
///     matchingTag: http.route
///     setTag: resource.name
///     setValue: {field: http.route}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorsConfig {
    /// The rules in the order they are applied.
    pub decorators: Vec<DecoratorConfig>,
}

/// A single entry of [`DecoratorsConfig`].
///
/// All fields are optional here. Missing values are taken from the defaults of the decorator type,
/// and entries that remain incomplete are rejected when the rule is created.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecoratorConfig {
    /// The identifier of the decorator kind, such as `URLAsResourceName`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The tag to match on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_tag: Option<String>,
    /// The value the matching tag must have.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_value: Option<AttributeValue>,
    /// The tag to write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_tag: Option<String>,
    /// The value to write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_value: Option<SetValue>,
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_yaml() {
        let config: DecoratorsConfig = serde_yaml::from_str(
            r#"
decorators:
  - type: Status404Decorator
    matchingValue: 404
    unknownField: ignored
  - type: SetTag
    matchingTag: http.route
    setTag: resource.name
    setValue: {field: http.route}
"#,
        )
        .unwrap();

        insta::assert_debug_snapshot!(config, @r###"
        DecoratorsConfig {
            decorators: [
                DecoratorConfig {
                    kind: Some(
                        "Status404Decorator",
                    ),
                    matching_tag: None,
                    matching_value: Some(
                        I64(
                            404,
                        ),
                    ),
                    set_tag: None,
                    set_value: None,
                },
                DecoratorConfig {
                    kind: Some(
                        "SetTag",
                    ),
                    matching_tag: Some(
                        "http.route",
                    ),
                    matching_value: None,
                    set_tag: Some(
                        "resource.name",
                    ),
                    set_value: Some(
                        Field {
                            field: "http.route",
                        },
                    ),
                },
            ],
        }
        "###);
    }

    #[test]
    fn test_serialize_skips_unset() {
        let config = DecoratorConfig {
            kind: Some("ErrorFlag".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"type":"ErrorFlag"}"#
        );
    }

    #[test]
    fn test_empty() {
        let config: DecoratorsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DecoratorsConfig::default());
    }
}
