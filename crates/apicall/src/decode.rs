//! Generic JSON decoding with configurable key translation

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Key-translation strategy applied to wire field names before structural
/// decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyDecoding {
    /// Match wire keys verbatim
    Exact,
    /// Fold wire keys to snake_case so camelCase payloads land on
    /// snake_case fields; keys already in snake_case pass through
    #[default]
    SnakeCase,
}

/// Decode `body` into `T` under the given key strategy.
pub(crate) fn decode_json<T: DeserializeOwned>(
    body: &[u8],
    key_decoding: KeyDecoding,
) -> Result<T, serde_json::Error> {
    match key_decoding {
        KeyDecoding::Exact => serde_json::from_slice(body),
        KeyDecoding::SnakeCase => {
            let value: Value = serde_json::from_slice(body)?;
            serde_json::from_value(fold_keys(value))
        }
    }
}

/// Rewrite every object key in `value` to snake_case, recursively.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_snake_case(&key), fold_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    let mut prev_lower_or_digit = false;
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            prev_lower_or_digit = ch.is_ascii_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        user_name: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Profile {
        display_name: String,
        account: Account,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Account {
        account_id: i64,
    }

    #[test]
    fn test_snake_case_body_decodes_with_snake_case_mode() {
        let user: User =
            decode_json(br#"{"user_name":"ann"}"#, KeyDecoding::SnakeCase).expect("should decode");
        assert_eq!(user.user_name, "ann");
    }

    #[test]
    fn test_camel_case_body_decodes_with_snake_case_mode() {
        let user: User =
            decode_json(br#"{"userName":"ann"}"#, KeyDecoding::SnakeCase).expect("should decode");
        assert_eq!(user.user_name, "ann");
    }

    #[test]
    fn test_camel_case_body_fails_with_exact_mode() {
        let result: Result<User, _> = decode_json(br#"{"userName":"ann"}"#, KeyDecoding::Exact);
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_objects_are_folded() {
        let body = br#"{"displayName":"Ann","account":{"accountId":7}}"#;
        let profile: Profile = decode_json(body, KeyDecoding::SnakeCase).expect("should decode");
        assert_eq!(profile.display_name, "Ann");
        assert_eq!(profile.account.account_id, 7);
    }

    #[test]
    fn test_objects_inside_arrays_are_folded() {
        let body = br#"[{"userName":"ann"},{"user_name":"bob"}]"#;
        let users: Vec<User> = decode_json(body, KeyDecoding::SnakeCase).expect("should decode");
        assert_eq!(users[0].user_name, "ann");
        assert_eq!(users[1].user_name, "bob");
    }

    #[test]
    fn test_key_folding() {
        assert_eq!(to_snake_case("userName"), "user_name");
        assert_eq!(to_snake_case("user_name"), "user_name");
        assert_eq!(to_snake_case("id2Value"), "id2_value");
        assert_eq!(to_snake_case("plain"), "plain");
    }

    #[test]
    fn test_decode_error_mentions_missing_field() {
        let result: Result<User, _> = decode_json(br#"{"other":1}"#, KeyDecoding::SnakeCase);
        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("user_name"));
    }
}
