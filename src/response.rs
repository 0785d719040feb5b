//! Typed traversal of MediaWiki JSON responses.
//!
//! The MediaWiki query API nests its payloads under dynamically keyed
//! objects (e.g. revisions live under a page-ID key that differs per
//! article). Rather than walking responses with untyped indexing, each
//! extraction site declares a [`Step`] path and evaluates it with [`walk`],
//! so the expected shape is explicit and every violation maps to a named
//! [`ShapeError`].

use serde_json::Value;
use thiserror::Error;

/// A violated expectation about the shape of a JSON response.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// An expected object key was absent.
    #[error("missing key `{key}`")]
    MissingKey { key: String },

    /// A node expected to hold exactly one entry held a different number.
    #[error("expected exactly one entry, found {found}")]
    ExpectedSingleton { found: usize },

    /// A node expected to be a JSON object was something else.
    #[error("expected a JSON object")]
    ExpectedObject,

    /// A node expected to be a JSON array was something else.
    #[error("expected a JSON array")]
    ExpectedArray,

    /// A field expected to hold an integer (or integer-as-string) did not.
    #[error("expected an integer for `{key}`")]
    ExpectedInteger { key: String },
}

/// One step of a response path.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Descend into the value under a fixed object key.
    Key(&'static str),
    /// Descend into the value of the object's only entry; fails unless the
    /// object holds exactly one entry.
    Singleton,
}

/// Evaluate `path` against `value`, step by step.
///
/// # Errors
/// Returns a [`ShapeError`] naming the first step that did not match the
/// response.
pub fn walk<'a>(value: &'a Value, path: &[Step]) -> Result<&'a Value, ShapeError> {
    let mut node = value;
    for step in path {
        node = match step {
            Step::Key(key) => node
                .as_object()
                .ok_or(ShapeError::ExpectedObject)?
                .get(*key)
                .ok_or_else(|| ShapeError::MissingKey {
                    key: (*key).to_string(),
                })?,
            Step::Singleton => single_entry(node)?.1,
        };
    }
    Ok(node)
}

/// Expect `value` to be an object with exactly one entry and return it.
///
/// # Errors
/// Returns [`ShapeError::ExpectedObject`] for non-objects and
/// [`ShapeError::ExpectedSingleton`] for any other entry count.
pub fn single_entry(value: &Value) -> Result<(&String, &Value), ShapeError> {
    let object = value.as_object().ok_or(ShapeError::ExpectedObject)?;
    if object.len() != 1 {
        return Err(ShapeError::ExpectedSingleton {
            found: object.len(),
        });
    }
    object
        .iter()
        .next()
        .ok_or(ShapeError::ExpectedSingleton { found: 0 })
}

/// Expect `value` to be a JSON array.
///
/// # Errors
/// Returns [`ShapeError::ExpectedArray`] otherwise.
pub fn expect_array(value: &Value) -> Result<&Vec<Value>, ShapeError> {
    value.as_array().ok_or(ShapeError::ExpectedArray)
}

/// Read the `views` field of a page-view item.
///
/// The Wikimedia endpoint has historically served the count both as a JSON
/// integer and as an integer-valued string; both are accepted.
///
/// # Errors
/// Returns a [`ShapeError`] when the field is absent or not an integer.
pub fn views_count(item: &Value) -> Result<u64, ShapeError> {
    match item.get("views") {
        Some(Value::Number(number)) => number.as_u64().ok_or(ShapeError::ExpectedInteger {
            key: "views".to_string(),
        }),
        Some(Value::String(text)) => text.parse().map_err(|_| ShapeError::ExpectedInteger {
            key: "views".to_string(),
        }),
        Some(_) | None => Err(ShapeError::MissingKey {
            key: "views".to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walk_follows_keys() {
        let value = json!({"query": {"pages": {"42": {"title": "Foo"}}}});
        let found = walk(
            &value,
            &[Step::Key("query"), Step::Key("pages"), Step::Singleton],
        )
        .unwrap();
        assert_eq!(found, &json!({"title": "Foo"}));
    }

    #[test]
    fn walk_reports_missing_key() {
        let value = json!({"query": {}});
        let err = walk(&value, &[Step::Key("query"), Step::Key("pages")]).unwrap_err();
        assert!(matches!(err, ShapeError::MissingKey { key } if key == "pages"));
    }

    #[test]
    fn walk_rejects_key_step_on_non_object() {
        let value = json!({"query": []});
        let err = walk(&value, &[Step::Key("query"), Step::Key("pages")]).unwrap_err();
        assert!(matches!(err, ShapeError::ExpectedObject));
    }

    #[test]
    fn singleton_boundaries() {
        let cases = [
            (json!({}), Some(0), "empty object"),
            (json!({"a": 1}), None, "one entry"),
            (json!({"a": 1, "b": 2}), Some(2), "two entries"),
        ];

        for (value, expected_found, desc) in cases {
            let result = walk(&value, &[Step::Singleton]);
            match expected_found {
                None => assert!(result.is_ok(), "case '{desc}': {result:?}"),
                Some(found) => assert!(
                    matches!(result, Err(ShapeError::ExpectedSingleton { found: f }) if f == found),
                    "case '{desc}': {result:?}"
                ),
            }
        }
    }

    #[test]
    fn singleton_rejects_non_object() {
        let err = walk(&json!(["a"]), &[Step::Singleton]).unwrap_err();
        assert!(matches!(err, ShapeError::ExpectedObject));
    }

    #[test]
    fn single_entry_returns_key_and_value() {
        let value = json!({"revisions": {"rvcontinue": "tok"}});
        let (key, inner) = single_entry(&value).unwrap();
        assert_eq!(key, "revisions");
        assert_eq!(inner, &json!({"rvcontinue": "tok"}));
    }

    #[test]
    fn views_accepts_number_and_string() {
        assert_eq!(views_count(&json!({"views": 12})).unwrap(), 12);
        assert_eq!(views_count(&json!({"views": "12"})).unwrap(), 12);
    }

    #[test]
    fn views_rejects_garbage() {
        assert!(views_count(&json!({"views": "soon"})).is_err());
        assert!(views_count(&json!({"views": -3})).is_err());
        assert!(views_count(&json!({"hits": 12})).is_err());
        assert!(views_count(&json!({"views": null})).is_err());
    }
}
