//! Booleans carried as the integers `1` (true) and `0` (false).
//!
//! Anything whose text is not exactly `"1"` decodes to `false`, including a
//! missing field and JSON `null`.

use super::scalar_text;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub fn decode(value: &Value) -> bool {
    scalar_text(value).is_some_and(|text| text == "1")
}

pub fn encode(value: bool) -> Value {
    Value::from(u8::from(value))
}

pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().is_some_and(decode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Flagged {
        #[serde(default, with = "crate::wire::bool_int")]
        flag: bool,
    }

    #[test]
    fn test_decode_one_is_true() {
        assert!(decode(&json!(1)));
        assert!(decode(&json!("1")));
        assert!(decode(&json!(1.0)));
    }

    #[test]
    fn test_decode_everything_else_is_false() {
        assert!(!decode(&Value::Null));
        assert!(!decode(&json!(0)));
        assert!(!decode(&json!(2)));
        assert!(!decode(&json!("true")));
        assert!(!decode(&json!(true)));
        assert!(!decode(&json!(" 1")));
        assert!(!decode(&json!([1])));
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(true), json!(1));
        assert_eq!(encode(false), json!(0));
    }

    #[test]
    fn test_field_missing_or_null_is_false() {
        let missing: Flagged = serde_json::from_str("{}").unwrap();
        assert!(!missing.flag);
        let null: Flagged = serde_json::from_str(r#"{"flag": null}"#).unwrap();
        assert!(!null.flag);
    }

    #[test]
    fn test_field_round_trip() {
        let parsed: Flagged = serde_json::from_str(r#"{"flag": 1}"#).unwrap();
        assert!(parsed.flag);
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!({"flag": 1}));
    }

    proptest! {
        #[test]
        fn prop_decode_true_iff_text_is_one(s in ".{0,8}") {
            prop_assert_eq!(decode(&json!(s.clone())), s == "1");
        }

        #[test]
        fn prop_integers_true_only_for_one(n in any::<i64>()) {
            prop_assert_eq!(decode(&json!(n)), n == 1);
        }
    }
}
