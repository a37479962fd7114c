//! Canonical hashing for plans.
//!
//! Plans are hashed as `hex(BLAKE3(JCS(plan_json)))`, where JCS is the JSON
//! Canonicalization Scheme (RFC 8785): sorted object keys, no whitespace,
//! deterministic number formatting. Two plans that differ only in field
//! order or formatting hash the same.

use crate::error::PlanError;
use crate::plan::PackPlan;

/// Computes the canonical BLAKE3 hash of a plan.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use matpack_spec::plan::{PackPlan, PlanKind};
/// use matpack_spec::hash::canonical_plan_hash;
///
/// let plan = PackPlan::builder("crate", PlanKind::PackFilesV1)
///     .input("albedo.png")
///     .build();
///
/// let hash = canonical_plan_hash(&plan).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_plan_hash(plan: &PackPlan) -> Result<String, PlanError> {
    let value = plan.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut sorted_keys: Vec<&String> = obj.keys().collect();
            sorted_keys.sort();

            let pairs: Vec<String> = sorted_keys
                .iter()
                .map(|k| {
                    let v = obj.get(*k).unwrap();
                    format!("{}:{}", format_jcs_string(k), canonicalize_json(v))
                })
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

/// Formats a number according to JCS rules.
fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    if let Some(f) = n.as_f64() {
        if f.is_nan() || f.is_infinite() {
            return "null".to_string(); // JCS treats these as null
        }
        if f == 0.0 {
            return "0".to_string();
        }
        if f.fract() == 0.0 && f.abs() < 1e15 {
            return format!("{}", f as i64);
        }
        let s = format!("{}", f);
        if s.contains('.') && !s.contains('e') && !s.contains('E') {
            let trimmed = s.trim_end_matches('0').trim_end_matches('.');
            return trimmed.to_string();
        }
        s
    } else {
        "null".to_string()
    }
}

/// Formats a string according to JCS rules.
fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanKind;

    #[test]
    fn hash_is_stable_across_calls() {
        let plan = PackPlan::builder("crate", PlanKind::PackFilesV1)
            .input("albedo.png")
            .build();

        let hash1 = canonical_plan_hash(&plan).unwrap();
        let hash2 = canonical_plan_hash(&plan).unwrap();
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_ignores_key_order_and_whitespace() {
        let a: serde_json::Value =
            serde_json::from_str(r#"{"b": 1, "a": [1, 2]}"#).unwrap();
        let b: serde_json::Value =
            serde_json::from_str("{\"a\":[1,2],\n  \"b\":1}").unwrap();
        assert_eq!(canonical_value_hash(&a), canonical_value_hash(&b));
    }

    #[test]
    fn hash_distinguishes_different_plans() {
        let a = PackPlan::builder("crate", PlanKind::PackFilesV1)
            .input("albedo.png")
            .build();
        let mut b = a.clone();
        b.inputs[0] = "mask.png".into();

        assert_ne!(
            canonical_plan_hash(&a).unwrap(),
            canonical_plan_hash(&b).unwrap()
        );
    }

    #[test]
    fn canonicalize_sorts_keys_and_strips_whitespace() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"z": true, "a": "x", "m": null}"#).unwrap();
        assert_eq!(canonicalize_json(&value), r#"{"a":"x","m":null,"z":true}"#);
    }

    #[test]
    fn canonicalize_number_formats() {
        let value: serde_json::Value = serde_json::from_str("[1, 1.5, 2.0, 0.25]").unwrap();
        assert_eq!(canonicalize_json(&value), "[1,1.5,2,0.25]");
    }

    #[test]
    fn canonicalize_escapes_strings() {
        let value = serde_json::Value::String("a\"b\\c\nd".to_string());
        assert_eq!(canonicalize_json(&value), r#""a\"b\\c\nd""#);
    }
}
