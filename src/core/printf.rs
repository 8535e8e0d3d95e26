//! printf-style message formatting
//!
//! When the first argument is text it is a template: `%s %d %i %f %j %o %O %c`
//! consume arguments positionally and `%%` is a literal percent sign.
//! Placeholders without a matching argument are left as written, and leftover
//! arguments are appended space-separated. When the first argument is not
//! text, every argument is stringified and joined with spaces.
//!
//! Non-text values render in a compact single-line inspection form:
//! `{ four: 5, six: [ 7, '8' ] }`.

use super::log_arg::LogArg;
use serde_json::{Number, Value};

/// Format call arguments into one message string.
pub fn format_args(args: &[LogArg]) -> String {
    let (template, rest) = match args.split_first() {
        Some((LogArg::Message(template), rest)) => (template, rest),
        Some(_) => return join_plain(args),
        None => return String::new(),
    };

    if rest.is_empty() {
        return template.clone();
    }

    let mut out = String::with_capacity(template.len() + rest.len() * 8);
    let mut remaining = rest.iter();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let Some(&spec) = chars.peek() else {
            out.push('%');
            break;
        };

        match spec {
            '%' => {
                chars.next();
                out.push('%');
            }
            's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O' | 'c' => {
                chars.next();
                match remaining.next() {
                    Some(arg) => out.push_str(&substitute(spec, arg)),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&stringify(arg));
    }

    out
}

fn join_plain(args: &[LogArg]) -> String {
    args.iter().map(stringify).collect::<Vec<_>>().join(" ")
}

fn substitute(spec: char, arg: &LogArg) -> String {
    match spec {
        's' => stringify(arg),
        'd' => exact_integer(arg).unwrap_or_else(|| format_number(to_number(arg))),
        'i' => exact_integer(arg).unwrap_or_else(|| format_number(parse_int(arg))),
        'f' => format_number(parse_float(arg)),
        'j' => serde_json::to_string(&arg.to_json_value())
            .unwrap_or_else(|_| "undefined".to_string()),
        'o' | 'O' => inspect(&arg.to_json_value()),
        // %c takes an argument and renders nothing
        _ => String::new(),
    }
}

/// Text renders raw; everything else is inspected.
fn stringify(arg: &LogArg) -> String {
    match arg {
        LogArg::Message(s) => s.clone(),
        LogArg::Value(Value::String(s)) => s.clone(),
        other => inspect(&other.to_json_value()),
    }
}

/// Compact single-line rendering of a value.
pub fn inspect(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(inspect).collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", inspect_key(k), inspect(v)))
                .collect();
            format!("{{ {} }}", inner.join(", "))
        }
    }
}

fn inspect_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Integers print exactly; only real floats go through `f64`.
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        n.to_string()
    } else {
        format_number(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn exact_integer(arg: &LogArg) -> Option<String> {
    match arg {
        LogArg::Value(Value::Number(n)) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == n.trunc() && n.abs() < 1e21 {
        // Integral values print without a fractional part; -0 prints as 0
        format!("{:.0}", n + 0.0)
    } else {
        n.to_string()
    }
}

fn to_number(arg: &LogArg) -> f64 {
    match arg {
        LogArg::Message(s) => str_to_number(s),
        LogArg::Value(Value::String(s)) => str_to_number(s),
        LogArg::Value(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        LogArg::Value(Value::Bool(b)) => f64::from(u8::from(*b)),
        LogArg::Value(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

fn str_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse().unwrap_or(f64::NAN)
    }
}

fn parse_int(arg: &LogArg) -> f64 {
    match arg {
        LogArg::Value(Value::Number(n)) => n.as_f64().map(f64::trunc).unwrap_or(f64::NAN),
        _ => leading_number(&text_of(arg), false).map(f64::trunc).unwrap_or(f64::NAN),
    }
}

fn parse_float(arg: &LogArg) -> f64 {
    match arg {
        LogArg::Value(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        _ => leading_number(&text_of(arg), true).unwrap_or(f64::NAN),
    }
}

fn text_of(arg: &LogArg) -> String {
    match arg {
        LogArg::Message(s) | LogArg::Value(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Parse the longest numeric prefix, skipping leading whitespace.
fn leading_number(s: &str, allow_fraction: bool) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    if allow_fraction && s[digits_start..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if allow_fraction && end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || &s[digits_start..end] == "." {
        return None;
    }

    s[..end].parse().ok()
}
