use std::borrow::Cow;

use crate::traits::Getter;
use crate::value::Val;

/// An iterator over the segments of a field path.
///
/// Created by [`segments`]. Yields `None` for an empty segment, which makes the whole path invalid.
#[derive(Debug, Clone)]
pub struct Segments<'p> {
    rest: Option<&'p str>,
}

impl<'p> Iterator for Segments<'p> {
    type Item = Option<Cow<'p, str>>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        let mut owned: Option<String> = None;
        let mut start = 0;
        let mut chars = rest.char_indices();

        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => match chars.clone().next() {
                    Some((next_index, escaped @ ('.' | '\\'))) => {
                        let buf = owned.get_or_insert_with(String::new);
                        buf.push_str(&rest[start..index]);
                        buf.push(escaped);
                        start = next_index + escaped.len_utf8();
                        chars.next();
                    }
                    _ => continue,
                },
                '.' => {
                    self.rest = Some(&rest[index + 1..]);
                    return Some(finish(owned, &rest[start..index], &rest[..index]));
                }
                _ => continue,
            }
        }

        self.rest = None;
        Some(finish(owned, &rest[start..], rest))
    }
}

fn finish<'p>(owned: Option<String>, tail: &'p str, whole: &'p str) -> Option<Cow<'p, str>> {
    let segment = match owned {
        Some(mut buf) => {
            buf.push_str(tail);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(whole),
    };

    (!segment.is_empty()).then_some(segment)
}

/// Splits a field path into its segments.
///
/// See [`resolve`] for the syntax.
///
/// # Example
///
/// ```
/// use spantag_protocol::segments;
///
/// let parts: Vec<_> = segments(r"a.b\.c").map(Option::unwrap).collect();
/// assert_eq!(parts, ["a", "b.c"]);
/// ```
pub fn segments(path: &str) -> Segments<'_> {
    Segments { rest: Some(path) }
}

/// Resolves a field path against a root object.
///
/// Returns `None` if any segment along the path is missing or cannot be descended into. Missing
/// data is expected and never an error.
///
/// # Syntax
///
/// A path consists of segments separated by `.`, each naming a member of a structured object
/// ([`Getter`]) or a key of a keyed container ([`Val::Object`]). Lists are not indexed; a path
/// ending at a list returns the list as-is.
///
/// Special characters are escaped with a `\`:
///  - `\.` matches a literal dot in a segment.
///  - `\\` matches a literal backslash in a segment.
///
/// Empty paths and paths with empty segments, such as `a..b`, never resolve.
///
/// # Example
///
/// ```
/// use spantag_protocol::{resolve, Val, Value};
///
/// let value: Value = serde_json::from_str(r#"{"tags": {"http.method": "GET"}}"#).unwrap();
///
/// assert_eq!(resolve(&value, r"tags.http\.method"), Some(Val::String("GET")));
/// assert_eq!(resolve(&value, "tags.http.method"), None);
/// ```
pub fn resolve<'a, T>(root: &'a T, path: &str) -> Option<Val<'a>>
where
    T: Getter + ?Sized,
{
    let mut segments = segments(path);
    let mut current = root.get_field(&segments.next()??)?;

    for segment in segments {
        let segment = segment?;
        current = match current {
            Val::Object(object) => object.get(&*segment).map(Val::from)?,
            Val::Struct(getter) => getter.get_field(&segment)?,
            _ => return None,
        };
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use crate::value::{Object, Value};

    use super::*;

    fn collect(path: &str) -> Vec<Option<String>> {
        segments(path)
            .map(|segment| segment.map(Cow::into_owned))
            .collect()
    }

    fn payload() -> Value {
        serde_json::from_str(
            r#"{
                "TableName": "users",
                "ConsistentRead": true,
                "ProvisionedThroughput": {"ReadCapacityUnits": 10},
                "AttributesToGet": ["id", "name"],
                "a.b": {"c": 1}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_segments_plain() {
        assert_eq!(
            collect("a.b.c"),
            vec![Some("a".to_owned()), Some("b".to_owned()), Some("c".to_owned())]
        );
    }

    #[test]
    fn test_segments_escaped() {
        assert_eq!(
            collect(r"a\.b.c\\d"),
            vec![Some("a.b".to_owned()), Some(r"c\d".to_owned())]
        );
    }

    #[test]
    fn test_segments_unknown_escape() {
        assert_eq!(collect(r"a\b"), vec![Some(r"a\b".to_owned())]);
    }

    #[test]
    fn test_segments_empty() {
        assert_eq!(collect(""), vec![None]);
        assert_eq!(collect("a..b"), vec![Some("a".to_owned()), None, Some("b".to_owned())]);
        assert_eq!(collect("a."), vec![Some("a".to_owned()), None]);
    }

    #[test]
    fn test_resolve_top_level() {
        let payload = payload();
        assert_eq!(resolve(&payload, "TableName"), Some(Val::String("users")));
        assert_eq!(resolve(&payload, "ConsistentRead"), Some(Val::Bool(true)));
    }

    #[test]
    fn test_resolve_nested() {
        let payload = payload();
        assert_eq!(
            resolve(&payload, "ProvisionedThroughput.ReadCapacityUnits"),
            Some(Val::I64(10))
        );
    }

    #[test]
    fn test_resolve_list_as_is() {
        let payload = payload();
        let expected = [Value::from("id"), Value::from("name")];
        assert_eq!(
            resolve(&payload, "AttributesToGet"),
            Some(Val::Array(&expected))
        );
        assert_eq!(resolve(&payload, "AttributesToGet.0"), None);
    }

    #[test]
    fn test_resolve_escaped_key() {
        let payload = payload();
        assert_eq!(resolve(&payload, r"a\.b.c"), Some(Val::I64(1)));
        assert_eq!(resolve(&payload, "a.b.c"), None);
    }

    #[test]
    fn test_resolve_missing() {
        let payload = payload();
        assert_eq!(resolve(&payload, "Missing"), None);
        assert_eq!(resolve(&payload, "TableName.Length"), None);
        assert_eq!(resolve(&payload, ""), None);
        assert_eq!(resolve(&payload, "ProvisionedThroughput..ReadCapacityUnits"), None);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let payload = payload();
        let path = "ProvisionedThroughput.ReadCapacityUnits";
        assert_eq!(resolve(&payload, path), resolve(&payload, path));
    }

    struct Throughput {
        read: Option<u64>,
    }

    impl Getter for Throughput {
        fn get_field(&self, name: &str) -> Option<Val<'_>> {
            match name {
                "ReadCapacityUnits" => self.read.map(Val::from),
                _ => None,
            }
        }
    }

    struct Request {
        throughput: Throughput,
        items: Object,
    }

    impl Getter for Request {
        fn get_field(&self, name: &str) -> Option<Val<'_>> {
            Some(match name {
                "ProvisionedThroughput" => Val::Struct(&self.throughput),
                "RequestItems" => Val::Object(&self.items),
                _ => return None,
            })
        }
    }

    #[test]
    fn test_resolve_structured() {
        let mut items = Object::new();
        items.insert("users".to_owned(), Value::Bool(true));

        let request = Request {
            throughput: Throughput { read: Some(3) },
            items,
        };

        assert_eq!(
            resolve(&request, "ProvisionedThroughput.ReadCapacityUnits"),
            Some(Val::U64(3))
        );
        assert_eq!(resolve(&request, "RequestItems.users"), Some(Val::Bool(true)));
        assert_eq!(resolve(&request, "ProvisionedThroughput.Missing"), None);
    }

    #[test]
    fn test_resolve_structured_none() {
        let request = Request {
            throughput: Throughput { read: None },
            items: Object::new(),
        };

        assert_eq!(
            resolve(&request, "ProvisionedThroughput.ReadCapacityUnits"),
            None
        );
    }
}
