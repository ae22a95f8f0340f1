use spantag_log::LogError;

use crate::kind::DecoratorKind;
use crate::rule::{DecorationRule, RuleBuilder};

/// Returns the builders of the built-in rules, in application order.
fn builtin_builders() -> [RuleBuilder; 8] {
    [
        DecorationRule::builder(DecoratorKind::HttpComponent).matching_value("okhttp"),
        DecorationRule::builder(DecoratorKind::HttpComponent).matching_value("java-aws-sdk"),
        DecorationRule::builder(DecoratorKind::ErrorFlag),
        DecorationRule::builder(DecoratorKind::DbType),
        DecorationRule::builder(DecoratorKind::DbStatementAsResourceName),
        DecorationRule::builder(DecoratorKind::Operation),
        DecorationRule::builder(DecoratorKind::Status404),
        DecorationRule::builder(DecoratorKind::UrlAsResourceName),
    ]
}

/// Returns the rules used when no decorator configuration is supplied.
///
/// The order matters. `Status404Decorator` runs before `URLAsResourceName`, which in turn leaves
/// the resource name of `404` responses alone.
pub fn builtin_rules() -> Vec<DecorationRule> {
    builtin_builders()
        .into_iter()
        .filter_map(|builder| match builder.build() {
            Ok(rule) => Some(rule),
            Err(error) => {
                spantag_log::error!("invalid built-in decoration rule: {}", LogError(&error));
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let rules: Vec<_> = builtin_rules()
            .iter()
            .map(|rule| {
                format!(
                    "{} {}={}",
                    rule.kind(),
                    rule.matching_tag(),
                    rule.matching_value()
                        .map_or_else(|| "*".to_owned(), ToString::to_string)
                )
            })
            .collect();

        insta::assert_debug_snapshot!(rules, @r###"
        [
            "HTTPComponent component=okhttp",
            "HTTPComponent component=java-aws-sdk",
            "ErrorFlag error=*",
            "DBTypeDecorator db.type=*",
            "DBStatementAsResourceName db.statement=*",
            "OperationDecorator component=*",
            "Status404Decorator http.status_code=404",
            "URLAsResourceName http.url=*",
        ]
        "###);
    }
}
