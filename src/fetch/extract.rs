// src/fetch/extract.rs
//! JSON-pointer helpers shared by catalog extractors. Every helper turns a
//! missing or mistyped field into a [`ShapeError`] instead of panicking.

use serde_json::Value;

use crate::fetch::error::ShapeError;
use crate::fetch::types::Fact;
use crate::text::clean_text;

fn label(ptr: &str) -> &str {
    if ptr.is_empty() {
        "<root>"
    } else {
        ptr
    }
}

/// Value at `ptr` (RFC 6901 pointer, `""` is the root). `null` counts as missing.
pub fn field<'a>(v: &'a Value, ptr: &str) -> Result<&'a Value, ShapeError> {
    match v.pointer(ptr) {
        Some(Value::Null) | None => Err(ShapeError::new(format!(
            "missing field `{}`",
            label(ptr)
        ))),
        Some(x) => Ok(x),
    }
}

/// Non-empty string at `ptr`, cleaned with [`clean_text`].
pub fn text(v: &Value, ptr: &str) -> Result<String, ShapeError> {
    let raw = field(v, ptr)?
        .as_str()
        .ok_or_else(|| ShapeError::new(format!("field `{}` is not a string", label(ptr))))?;
    let s = clean_text(raw);
    if s.is_empty() {
        return Err(ShapeError::new(format!("field `{}` is empty", label(ptr))));
    }
    Ok(s)
}

/// Like [`text`] but falls back when the field is absent, null or blank.
pub fn text_or(v: &Value, ptr: &str, fallback: &str) -> String {
    text(v, ptr).unwrap_or_else(|_| fallback.to_string())
}

pub fn number(v: &Value, ptr: &str) -> Result<f64, ShapeError> {
    field(v, ptr)?
        .as_f64()
        .ok_or_else(|| ShapeError::new(format!("field `{}` is not a number", label(ptr))))
}

/// First element of the array at `ptr`; an empty array is a shape error.
pub fn first<'a>(v: &'a Value, ptr: &str) -> Result<&'a Value, ShapeError> {
    let arr = field(v, ptr)?
        .as_array()
        .ok_or_else(|| ShapeError::new(format!("field `{}` is not an array", label(ptr))))?;
    arr.first()
        .ok_or_else(|| ShapeError::new(format!("array `{}` was empty", label(ptr))))
}

/// The single `(key, value)` of the object at `ptr`.
/// Used for bodies keyed by the requested symbol, e.g. `{"bitcoin":{"usd":1}}`.
pub fn only_entry<'a>(v: &'a Value, ptr: &str) -> Result<(&'a str, &'a Value), ShapeError> {
    let obj = field(v, ptr)?
        .as_object()
        .ok_or_else(|| ShapeError::new(format!("field `{}` is not an object", label(ptr))))?;
    let mut it = obj.iter();
    match (it.next(), it.next()) {
        (Some((k, x)), None) => Ok((k.as_str(), x)),
        (None, _) => Err(ShapeError::new(format!("object `{}` was empty", label(ptr)))),
        _ => Err(ShapeError::new(format!(
            "object `{}` has {} entries, expected one",
            label(ptr),
            obj.len()
        ))),
    }
}

/// Status-flag check, e.g. `"status": "success"`.
pub fn expect_eq(v: &Value, ptr: &str, want: &Value) -> Result<(), ShapeError> {
    let got = field(v, ptr)?;
    if got == want {
        Ok(())
    } else {
        Err(ShapeError::new(format!(
            "field `{}` is {got}, expected {want}",
            label(ptr)
        )))
    }
}

/// Non-empty string at `ptr`, returned verbatim apart from surrounding
/// whitespace. For links, where entity decoding or truncation would corrupt the value.
pub fn url(v: &Value, ptr: &str) -> Result<String, ShapeError> {
    let raw = field(v, ptr)?
        .as_str()
        .ok_or_else(|| ShapeError::new(format!("field `{}` is not a string", label(ptr))))?
        .trim();
    if raw.is_empty() {
        return Err(ShapeError::new(format!("field `{}` is empty", label(ptr))));
    }
    Ok(raw.to_string())
}

pub fn url_fact(v: &Value, ptr: &str) -> Result<Fact, ShapeError> {
    url(v, ptr).map(Fact::Text)
}

pub fn text_fact(v: &Value, ptr: &str) -> Result<Fact, ShapeError> {
    text(v, ptr).map(Fact::Text)
}
