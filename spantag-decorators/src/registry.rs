use crate::kind::DecoratorKind;
use crate::tags;

/// The defaults a decorator kind starts out with before configuration is applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RuleTemplate {
    /// The kind of rule created from this template.
    pub kind: DecoratorKind,
    /// The tag the rule matches on.
    pub matching_tag: Option<&'static str>,
    /// The value the matching tag must have.
    pub matching_value: Option<&'static str>,
    /// The primary tag written by the rule. Defaults to the matching tag.
    pub set_tag: Option<&'static str>,
}

impl RuleTemplate {
    const fn new(kind: DecoratorKind) -> Self {
        Self {
            kind,
            matching_tag: None,
            matching_value: None,
            set_tag: None,
        }
    }

    const fn matching(self, tag: &'static str) -> Self {
        Self {
            matching_tag: Some(tag),
            ..self
        }
    }

    const fn matching_value(self, value: &'static str) -> Self {
        Self {
            matching_value: Some(value),
            ..self
        }
    }

    const fn setting(self, tag: &'static str) -> Self {
        Self {
            set_tag: Some(tag),
            ..self
        }
    }
}

/// A function creating the template of a decorator kind.
pub type TemplateFactory = fn() -> RuleTemplate;

fn http_component() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::HttpComponent)
        .matching(tags::COMPONENT)
        .setting(tags::SPAN_TYPE)
}

fn error_flag() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::ErrorFlag).matching(tags::ERROR)
}

fn db_type() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::DbType)
        .matching(tags::DB_TYPE)
        .setting(tags::SERVICE_NAME)
}

fn db_statement_as_resource_name() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::DbStatementAsResourceName)
        .matching(tags::DB_STATEMENT)
        .setting(tags::RESOURCE_NAME)
}

fn operation() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::Operation)
        .matching(tags::COMPONENT)
        .setting(tags::OPERATION_NAME)
}

fn status_404() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::Status404)
        .matching(tags::HTTP_STATUS_CODE)
        .matching_value("404")
        .setting(tags::RESOURCE_NAME)
}

fn url_as_resource_name() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::UrlAsResourceName)
        .matching(tags::HTTP_URL)
        .setting(tags::RESOURCE_NAME)
}

fn set_tag() -> RuleTemplate {
    RuleTemplate::new(DecoratorKind::SetTag)
}

/// All registered decorator kinds by identifier.
static REGISTRY: &[(&str, TemplateFactory)] = &[
    ("HTTPComponent", http_component),
    ("ErrorFlag", error_flag),
    ("DBTypeDecorator", db_type),
    ("DBStatementAsResourceName", db_statement_as_resource_name),
    ("OperationDecorator", operation),
    ("Status404Decorator", status_404),
    ("URLAsResourceName", url_as_resource_name),
    ("SetTag", set_tag),
];

/// Looks up the template factory registered for an identifier.
///
/// Identifiers are case sensitive.
pub fn lookup(identifier: &str) -> Option<TemplateFactory> {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == identifier)
        .map(|(_, factory)| *factory)
}

/// Returns the template of a kind.
pub fn template(kind: DecoratorKind) -> RuleTemplate {
    match kind {
        DecoratorKind::HttpComponent => http_component(),
        DecoratorKind::ErrorFlag => error_flag(),
        DecoratorKind::DbType => db_type(),
        DecoratorKind::DbStatementAsResourceName => db_statement_as_resource_name(),
        DecoratorKind::Operation => operation(),
        DecoratorKind::Status404 => status_404(),
        DecoratorKind::UrlAsResourceName => url_as_resource_name(),
        DecoratorKind::SetTag => set_tag(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_identifiers() {
        for (identifier, factory) in REGISTRY {
            let template = factory();
            assert_eq!(template.kind.identifier(), *identifier);
            assert_eq!(template, super::template(template.kind));
        }
    }

    #[test]
    fn test_lookup() {
        let factory = lookup("Status404Decorator").unwrap();
        assert_eq!(factory().matching_value, Some("404"));

        assert!(lookup("status404decorator").is_none());
        assert!(lookup("ServiceNameDecorator").is_none());
    }
}
