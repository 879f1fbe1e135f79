//! Canonical parameter encoding
//!
//! 요청 파라미터를 서명용 `key=value&key=value` 문자열로 변환합니다.
//!
//! 인코딩은 구조적일 뿐 URL 이스케이프를 하지 않습니다. 모든 중첩 단계에서 키는
//! UTF-16 코드 유닛 순서로 정렬됩니다 (JavaScript `Array.prototype.sort`와 동일).
//! 정렬하지 않으면 JSON 입력의 삽입 순서를 유지합니다.

use serde_json::{Map, Value};
use std::cmp::Ordering;

/// 값을 정규 문자열로 인코딩
///
/// - `null` → 빈 문자열
/// - 스칼라 → 문자열 표현
/// - 배열 → 각 원소를 인코딩하여 `&`로 연결
/// - 객체 → `key=` + 재귀 인코딩 값, `&`로 연결
///
/// # Example
///
/// ```rust
/// use edgex_signer::utils::encode_signable;
/// use serde_json::json;
///
/// assert_eq!(encode_signable(&json!({"b": 1, "a": 2}), true), "a=2&b=1");
/// ```
pub fn encode_signable(value: &Value, sort_keys: bool) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| encode_signable(item, sort_keys))
            .collect::<Vec<_>>()
            .join("&"),
        Value::Object(map) => encode_map(map, sort_keys),
    }
}

/// 요청 바디를 서명용 문자열로 변환
///
/// 바디가 없거나 비어 있으면 빈 문자열 (`"{}"`가 아님)
pub fn convert_request_body_to_string(body: Option<&Value>) -> String {
    body.map(|b| encode_signable(b, true)).unwrap_or_default()
}

fn encode_map(map: &Map<String, Value>, sort_keys: bool) -> String {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    if sort_keys {
        entries.sort_by(|a, b| cmp_utf16(a.0, b.0));
    }

    entries
        .iter()
        .map(|(k, v)| format!("{k}={}", encode_signable(v, sort_keys)))
        .collect::<Vec<_>>()
        .join("&")
}

/// UTF-16 코드 유닛 순서 비교
fn cmp_utf16(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// 숫자를 JavaScript `String(number)`와 같은 형식으로 변환
fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_u64() || n.is_i64() {
        return n.to_string();
    }

    let f = match n.as_f64() {
        Some(f) => f,
        None => return n.to_string(),
    };

    if f == 0.0 {
        return "0".to_string();
    }

    // f64 Display는 최단 왕복 자릿수를 지수 없이 0으로 채움 (JS와 동일)
    if (1e-6..1e21).contains(&f.abs()) {
        f.to_string()
    } else {
        // 1e21 → "1e+21", 1e-7 → "1e-7"
        let formatted = format!("{f:e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    }
}
