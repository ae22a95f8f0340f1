//! The shared engine is process-wide state, so this binary holds a single test.

use similar_asserts::assert_eq;
use spantag_decorators::{DecorationEngine, DecorationRule, DecoratorKind, SetValue};
use spantag_protocol::Attributes;

fn route_engine() -> DecorationEngine {
    let rule = DecorationRule::builder(DecoratorKind::SetTag)
        .matching_tag("http.route")
        .set_tag("resource.name")
        .set_value(SetValue::Field {
            field: "http.route".to_owned(),
        })
        .build()
        .unwrap();

    DecorationEngine::new(vec![rule])
}

#[test]
fn test_install_first_writer_wins() {
    DecorationEngine::install(route_engine()).unwrap();
    assert_eq!(DecorationEngine::global(), &route_engine());

    let rejected = DecorationEngine::builtin().install().unwrap_err();
    assert_eq!(rejected, DecorationEngine::builtin());
    assert_eq!(DecorationEngine::global(), &route_engine());

    let mut attributes = Attributes::from_iter([("http.route", "/users/{id}")]);
    DecorationEngine::global().apply(&mut attributes);
    assert_eq!(attributes.get_str("resource.name"), Some("/users/{id}"));
}
