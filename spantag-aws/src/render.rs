//! Turns resolved field values into attribute values.

use spantag_protocol::{AttributeValue, Val, Value};

use crate::field::ValuePolicy;

/// Renders a resolved value according to the declared policy.
///
/// Returns `None` if the value cannot be stored under the policy, or if its rendering is empty.
pub(crate) fn render(val: Val<'_>, policy: ValuePolicy) -> Option<AttributeValue> {
    match policy {
        ValuePolicy::Raw => render_raw(val),
        ValuePolicy::Keys => render_keys(val).map(AttributeValue::String),
        ValuePolicy::Count => val.element_count().map(AttributeValue::from),
    }
}

fn render_raw(val: Val<'_>) -> Option<AttributeValue> {
    let rendered = match val {
        Val::Array(items) => render_list(items.iter().filter_map(render_element))?,
        Val::Object(object) => serde_json::to_string(object).ok()?,
        Val::Struct(getter) => serde_json::to_string(&getter.to_value()?).ok()?,
        Val::String(string) if string.is_empty() => return None,
        scalar => return AttributeValue::from_scalar(scalar),
    };

    Some(AttributeValue::String(rendered))
}

fn render_keys(val: Val<'_>) -> Option<String> {
    match val {
        Val::Object(object) => render_list(object.keys().cloned()),
        Val::Struct(getter) => match getter.to_value()? {
            Value::Object(object) => render_list(object.into_keys()),
            _ => None,
        },
        _ => None,
    }
}

fn render_list<I>(elements: I) -> Option<String>
where
    I: Iterator<Item = String>,
{
    let elements: Vec<String> = elements.filter(|element| !element.is_empty()).collect();
    if elements.is_empty() {
        return None;
    }

    Some(format!("[{}]", elements.join(",")))
}

/// Strings are taken verbatim, everything else as compact JSON.
fn render_element(value: &Value) -> Option<String> {
    match value {
        Value::String(string) => Some(string.clone()),
        other => serde_json::to_string(other).ok(),
    }
}
