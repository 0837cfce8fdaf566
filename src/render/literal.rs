use crate::params::Param;
use crate::types::RowValues;

/// Literal SQL text for one parameter, as it would appear in a rendered "demo" query.
///
/// Integers render bare; everything else is single-quoted with embedded `'` backslash-escaped.
/// Typed wrappers render their inner value and ignore the storage kind.
#[must_use]
pub fn resolve_literal(param: &Param) -> String {
    match param {
        Param::Value(value) => value_literal(value),
        Param::Typed(typed) => value_literal(typed.value()),
        Param::Stringable(text) => quote_text(&text()),
    }
}

fn value_literal(value: &RowValues) -> String {
    match value {
        RowValues::Int(value) => value.to_string(),
        other => quote_text(&other.cast_text()),
    }
}

fn quote_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
