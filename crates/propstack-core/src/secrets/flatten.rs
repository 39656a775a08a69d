//! Secret payload flattening
//!
//! A secret payload is JSON. A scalar payload becomes a single property named
//! after the secret's base key; a flat object becomes one `base.member`
//! property per member. Anything deeper is rejected.

use serde_json::Value;
use thiserror::Error;

/// A secret payload that cannot be turned into flat properties
#[derive(Error, Debug)]
pub enum SecretShapeError {
    #[error("Secret for '{base_key}' is not valid JSON: {source}")]
    InvalidJson {
        base_key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Secret for '{base_key}' must be a JSON scalar or a flat object, found {found}")]
    UnsupportedShape { base_key: String, found: &'static str },

    #[error("Secret for '{base_key}' has member '{member}' that is not a JSON scalar, found {found}")]
    NonScalarMember {
        base_key: String,
        member: String,
        found: &'static str,
    },
}

impl SecretShapeError {
    /// Base key of the secret reference whose payload was rejected
    pub fn base_key(&self) -> &str {
        match self {
            Self::InvalidJson { base_key, .. }
            | Self::UnsupportedShape { base_key, .. }
            | Self::NonScalarMember { base_key, .. } => base_key,
        }
    }
}

/// Flatten a raw secret payload into `(key, value)` pairs rooted at `base_key`
///
/// Object members are emitted in the order they appear in the payload.
///
/// # Example
///
/// ```
/// use propstack_core::secrets::flatten;
///
/// let pairs = flatten(r#"{"password":"eeShee0haiv9"}"#, "app.db").unwrap();
/// assert_eq!(pairs, vec![("app.db.password".to_string(), "eeShee0haiv9".to_string())]);
/// ```
pub fn flatten(payload: &str, base_key: &str) -> Result<Vec<(String, String)>, SecretShapeError> {
    let value: Value = serde_json::from_str(payload).map_err(|source| SecretShapeError::InvalidJson {
        base_key: base_key.to_string(),
        source,
    })?;

    match value {
        Value::Object(members) => members
            .into_iter()
            .map(|(member, value)| match scalar_text(&value) {
                Some(text) => Ok((format!("{}.{}", base_key, member), text)),
                None => Err(SecretShapeError::NonScalarMember {
                    base_key: base_key.to_string(),
                    found: kind_of(&value),
                    member,
                }),
            })
            .collect(),
        other => match scalar_text(&other) {
            Some(text) => Ok(vec![(base_key.to_string(), text)]),
            None => Err(SecretShapeError::UnsupportedShape {
                base_key: base_key.to_string(),
                found: kind_of(&other),
            }),
        },
    }
}

/// Property text of a JSON scalar; `None` for null, arrays and objects
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_flatten_object_member() {
        let result = flatten(r#"{"password": "eeShee0haiv9"}"#, "app.db").unwrap();
        assert_eq!(result, pairs(&[("app.db.password", "eeShee0haiv9")]));
    }

    #[test]
    fn test_flatten_scalar_string() {
        assert_eq!(flatten(r#""x""#, "k").unwrap(), pairs(&[("k", "x")]));
    }

    #[test]
    fn test_flatten_scalar_number_and_bool() {
        assert_eq!(flatten("42", "k").unwrap(), pairs(&[("k", "42")]));
        assert_eq!(flatten("-1.5", "k").unwrap(), pairs(&[("k", "-1.5")]));
        assert_eq!(flatten("true", "k").unwrap(), pairs(&[("k", "true")]));
    }

    #[test]
    fn test_flatten_keeps_number_literals_verbatim() {
        let result = flatten(r#"{"account": 123456789012345678901234567890, "ratio": 1e3, "rate": 0.10}"#, "bank").unwrap();
        assert_eq!(
            result,
            pairs(&[
                ("bank.account", "123456789012345678901234567890"),
                ("bank.ratio", "1e3"),
                ("bank.rate", "0.10"),
            ])
        );
        assert_eq!(flatten("18446744073709551616", "k").unwrap(), pairs(&[("k", "18446744073709551616")]));
    }

    #[test]
    fn test_flatten_preserves_member_order() {
        let result = flatten(r#"{"user": "app", "port": 5432, "ssl": false, "host": "db"}"#, "db").unwrap();
        assert_eq!(
            result,
            pairs(&[("db.user", "app"), ("db.port", "5432"), ("db.ssl", "false"), ("db.host", "db")])
        );
    }

    #[test]
    fn test_flatten_empty_object_yields_nothing() {
        assert!(flatten("{}", "db").unwrap().is_empty());
    }

    #[test]
    fn test_flatten_rejects_array_member() {
        let err = flatten(r#"{"password":[1,2]}"#, "app.db").unwrap_err();
        match err {
            SecretShapeError::NonScalarMember { base_key, member, found } => {
                assert_eq!(base_key, "app.db");
                assert_eq!(member, "password");
                assert_eq!(found, "array");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_flatten_rejects_nested_object_and_null_member() {
        assert!(matches!(
            flatten(r#"{"db":{"password":"x"}}"#, "app").unwrap_err(),
            SecretShapeError::NonScalarMember { found: "object", .. }
        ));
        assert!(matches!(
            flatten(r#"{"password":null}"#, "app").unwrap_err(),
            SecretShapeError::NonScalarMember { found: "null", .. }
        ));
    }

    #[test]
    fn test_flatten_rejects_top_level_array_and_null() {
        let err = flatten("[1,2]", "app.db").unwrap_err();
        assert!(matches!(err, SecretShapeError::UnsupportedShape { found: "array", .. }));
        assert_eq!(err.base_key(), "app.db");

        assert!(matches!(
            flatten("null", "app.db").unwrap_err(),
            SecretShapeError::UnsupportedShape { found: "null", .. }
        ));
    }

    #[test]
    fn test_flatten_invalid_json_carries_base_key() {
        let err = flatten("{not json", "app.db").unwrap_err();
        assert!(matches!(err, SecretShapeError::InvalidJson { .. }));
        assert_eq!(err.base_key(), "app.db");
        assert!(err.to_string().starts_with("Secret for 'app.db' is not valid JSON"));
    }
}
