use serde::{Deserialize, Serialize};
use spantag_protocol::{AttributeValue, Attributes};

use crate::config::DecoratorConfig;
use crate::error::RuleError;
use crate::kind::DecoratorKind;
use crate::registry::{self, RuleTemplate};

/// The value written to the target tag of a rule.
///
/// In configuration, a reference is written as an object and anything else is a literal:
///
/// ```yaml
/// setValue: web                 # literal
/// setValue: {field: http.route} # copy from another attribute
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetValue {
    /// Copies the value of another attribute. The rule does nothing if it is not set.
    Field {
        /// The name of the source attribute.
        field: String,
    },
    /// A fixed value.
    Literal(AttributeValue),
}

/// A single match-and-rewrite rule.
///
/// A rule matches a set of attributes if its matching tag is present and, if a matching value is
/// configured, has that value. Values are compared by their string form, so `404` matches `"404"`.
/// On a match, the target tag is overwritten with the configured value, or with the value computed
/// by the rule's [`DecoratorKind`].
///
/// Rules are immutable. Create them with [`DecorationRule::builder`] or from configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationRule {
    kind: DecoratorKind,
    matching_tag: String,
    matching_value: Option<AttributeValue>,
    set_tag: String,
    set_value: Option<SetValue>,
}

impl DecorationRule {
    /// Starts building a rule of the given kind from the kind's defaults.
    pub fn builder(kind: DecoratorKind) -> RuleBuilder {
        RuleBuilder::from_template(registry::template(kind))
    }

    /// Creates a rule from a configuration entry.
    ///
    /// Values present in the entry override the defaults of the decorator kind.
    pub fn from_config(config: &DecoratorConfig) -> Result<Self, RuleError> {
        let identifier = config.kind.as_deref().ok_or(RuleError::MissingType)?;
        let factory = registry::lookup(identifier)
            .ok_or_else(|| RuleError::UnknownKind(identifier.to_owned()))?;

        let mut builder = RuleBuilder::from_template(factory());
        if let Some(ref tag) = config.matching_tag {
            builder = builder.matching_tag(tag.as_str());
        }
        if let Some(ref value) = config.matching_value {
            builder = builder.matching_value(value.clone());
        }
        if let Some(ref tag) = config.set_tag {
            builder = builder.set_tag(tag.as_str());
        }
        if let Some(ref value) = config.set_value {
            builder = builder.set_value(value.clone());
        }

        builder.build()
    }

    /// The kind of this rule.
    pub fn kind(&self) -> DecoratorKind {
        self.kind
    }

    /// The tag this rule matches on.
    pub fn matching_tag(&self) -> &str {
        &self.matching_tag
    }

    /// The value the matching tag must have, if any.
    pub fn matching_value(&self) -> Option<&AttributeValue> {
        self.matching_value.as_ref()
    }

    /// The tag written on a match.
    pub fn set_tag(&self) -> &str {
        &self.set_tag
    }

    /// The configured value written on a match.
    pub fn set_value(&self) -> Option<&SetValue> {
        self.set_value.as_ref()
    }

    /// Returns the value of the matching tag if this rule matches.
    pub fn matches<'a>(&self, attributes: &'a Attributes) -> Option<&'a AttributeValue> {
        let value = attributes.get(&self.matching_tag)?;

        match self.matching_value {
            Some(ref expected) if !value.loosely_eq(expected) => None,
            _ => Some(value),
        }
    }

    /// Applies this rule to a set of attributes.
    ///
    /// Returns `true` if the rule matched.
    pub fn apply(&self, attributes: &mut Attributes) -> bool {
        let Some(matched) = self.matches(attributes).cloned() else {
            return false;
        };

        match self.set_value {
            Some(SetValue::Literal(ref value)) => {
                attributes.insert(self.set_tag.as_str(), value.clone());
            }
            Some(SetValue::Field { ref field }) => {
                if let Some(value) = attributes.get(field).cloned() {
                    attributes.insert(self.set_tag.as_str(), value);
                }
            }
            None => self.kind.decorate(&matched, &self.set_tag, attributes),
        }

        true
    }
}

/// Builder for [`DecorationRule`].
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    kind: DecoratorKind,
    matching_tag: Option<String>,
    matching_value: Option<AttributeValue>,
    set_tag: Option<String>,
    set_value: Option<SetValue>,
}

impl RuleBuilder {
    fn from_template(template: RuleTemplate) -> Self {
        Self {
            kind: template.kind,
            matching_tag: template.matching_tag.map(str::to_owned),
            matching_value: template.matching_value.map(AttributeValue::from),
            set_tag: template.set_tag.map(str::to_owned),
            set_value: None,
        }
    }

    /// Sets the tag to match on.
    pub fn matching_tag(mut self, tag: impl Into<String>) -> Self {
        self.matching_tag = Some(tag.into());
        self
    }

    /// Restricts the rule to a value of the matching tag.
    pub fn matching_value(mut self, value: impl Into<AttributeValue>) -> Self {
        self.matching_value = Some(value.into());
        self
    }

    /// Sets the tag written on a match.
    pub fn set_tag(mut self, tag: impl Into<String>) -> Self {
        self.set_tag = Some(tag.into());
        self
    }

    /// Sets the value written on a match, replacing the computed value of the kind.
    pub fn set_value(mut self, value: SetValue) -> Self {
        self.set_value = Some(value);
        self
    }

    /// Validates and creates the rule.
    pub fn build(self) -> Result<DecorationRule, RuleError> {
        let matching_tag = self
            .matching_tag
            .filter(|tag| !tag.is_empty())
            .ok_or(RuleError::MissingMatchingTag(self.kind.identifier()))?;

        let set_tag = self
            .set_tag
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| matching_tag.clone());

        Ok(DecorationRule {
            kind: self.kind,
            matching_tag,
            matching_value: self.matching_value,
            set_tag,
            set_value: self.set_value,
        })
    }
}
