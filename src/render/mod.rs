use std::borrow::Cow;

mod literal;
mod scanner;

pub use literal::resolve_literal;

use crate::params::{BoundParams, ParamKey};
use scanner::{scan_positional, substitute_in_order};

/// Reconstruct the literal SQL a driver would see after binding `params` into `template`.
///
/// The output is meant for logs and debug listeners only. It is never executed.
///
/// Named collections replace every `:name` occurrence. Positional collections replace `?`
/// placeholders left to right; when the raw `?` count does not match the parameter count
/// the template is scanned with quote tracking so that `?` inside `'...'` or `"..."` is
/// kept as-is.
///
/// # Examples
/// ```rust
/// use sql_powered::prelude::*;
///
/// let params = BoundParams::positional([Param::from(1), Param::from("2")]);
/// assert_eq!(
///     render_demo_query(r#"QUERY STRING "?" ? ?"#, &params),
///     r#"QUERY STRING "?" 1 '2'"#
/// );
///
/// let params = BoundParams::named([("var", "myString")]);
/// assert_eq!(
///     render_demo_query("SELECT :var as col", &params),
///     "SELECT 'myString' as col"
/// );
/// ```
///
/// Returns a borrowed `Cow` when there is nothing to bind.
#[must_use]
pub fn render_demo_query<'a>(template: &'a str, params: &BoundParams) -> Cow<'a, str> {
    if params.is_empty() {
        return Cow::Borrowed(template);
    }

    if params.is_positional() {
        Cow::Owned(render_positional(template, params))
    } else {
        Cow::Owned(render_named(template, params))
    }
}

/// Names are replaced in collection order with no boundary check, so `:id` also matches the
/// head of `:id2`.
fn render_named(template: &str, params: &BoundParams) -> String {
    let mut out = template.to_string();
    for (key, param) in params.iter() {
        let needle = match key {
            ParamKey::Name(name) => format!(":{name}"),
            ParamKey::Index(idx) => format!(":{idx}"),
        };
        out = out.replace(&needle, &resolve_literal(param));
    }
    out
}

fn render_positional(template: &str, params: &BoundParams) -> String {
    let placeholders = template.matches('?').count();
    let literals = params.values().map(resolve_literal);

    if placeholders == params.len() {
        substitute_in_order(template, literals)
    } else {
        let mut literals = literals;
        scan_positional(template, || literals.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Param, TypedParam};

    fn positional<const N: usize>(params: [Param; N]) -> BoundParams {
        BoundParams::positional(params)
    }

    #[test]
    fn substitutes_single_positional() {
        let params = positional([Param::from(1)]);
        assert_eq!(render_demo_query("SELECT ? as col", &params), "SELECT 1 as col");
    }

    #[test]
    fn substitutes_named() {
        let params = BoundParams::named([("var", "myString")]);
        assert_eq!(
            render_demo_query("SELECT :var as col", &params),
            "SELECT 'myString' as col"
        );

        let params = BoundParams::named([("var1", Param::from(1)), ("var2", Param::from("2"))]);
        assert_eq!(
            render_demo_query("QUERY STRING :var1 :var2", &params),
            "QUERY STRING 1 '2'"
        );
    }

    #[test]
    fn named_replaces_every_occurrence() {
        let params = BoundParams::named([("id", 3)]);
        assert_eq!(
            render_demo_query("SELECT * FROM t WHERE a = :id OR b = :id", &params),
            "SELECT * FROM t WHERE a = 3 OR b = 3"
        );
    }

    #[test]
    fn named_prefix_collision_is_not_guarded() {
        let params = BoundParams::named([("id", 1)]);
        assert_eq!(render_demo_query("a = :id2", &params), "a = 12");
    }

    #[test]
    fn simple_positional_path() {
        let params = positional([Param::from(1), Param::from("2")]);
        assert_eq!(
            render_demo_query("QUERY STRING ? ?", &params),
            "QUERY STRING 1 '2'"
        );
    }

    #[test]
    fn skips_placeholder_in_double_quotes() {
        let params = positional([Param::from(1), Param::from("2")]);
        assert_eq!(
            render_demo_query(r#"QUERY STRING "?" ? ?"#, &params),
            r#"QUERY STRING "?" 1 '2'"#
        );
    }

    #[test]
    fn handles_escaped_quote_inside_literal() {
        let params = positional([Param::from(1), Param::from("2")]);
        assert_eq!(
            render_demo_query(r#"QUERY '?' AND "?\"" ? ?"#, &params),
            r#"QUERY '?' AND "?\"" 1 '2'"#
        );
        assert_eq!(
            render_demo_query(r#"QUERY "?" AND "?\"" ? ?"#, &params),
            r#"QUERY "?" AND "?\"" 1 '2'"#
        );
    }

    #[test]
    fn renders_wrappers_and_stringables() {
        let params = positional([TypedParam::int(1).into(), TypedParam::string(2).into()]);
        assert_eq!(
            render_demo_query("QUERY STRING ? ?", &params),
            "QUERY STRING 1 '2'"
        );

        let params = positional([Param::from(1), Param::stringable(|| "Hello".to_string())]);
        assert_eq!(
            render_demo_query("QUERY STRING ? ?", &params),
            "QUERY STRING 1 'Hello'"
        );
    }

    #[test]
    fn empty_params_borrow_template() {
        let template = "SELECT '?', :name FROM t WHERE a = ?";
        let res = render_demo_query(template, &BoundParams::new());
        assert!(matches!(res, Cow::Borrowed(_)));
        assert_eq!(res, template);
    }

    #[test]
    fn exhausted_params_leave_placeholder() {
        let params = positional([Param::from(1), Param::from(2)]);
        assert_eq!(
            render_demo_query("SELECT '?', ?, ?, ?", &params),
            "SELECT '?', 1, 2, ?"
        );
    }

    #[test]
    fn surplus_params_are_ignored() {
        let params = positional([Param::from(1), Param::from(2), Param::from(3)]);
        assert_eq!(render_demo_query("SELECT '?', ?", &params), "SELECT '?', 1");
    }

    #[test]
    fn unbalanced_quote_swallows_rest() {
        let params = positional([Param::from(1)]);
        assert_eq!(render_demo_query("SELECT ? 'oops ?", &params), "SELECT 1 'oops ?");
    }

    #[test]
    fn quote_flags_toggle_independently() {
        // The `"` inside the single-quoted run still flips the double flag, so the
        // closing `'` leaves the double flag set and the next `?` is skipped.
        let params = positional([Param::from(1)]);
        assert_eq!(
            render_demo_query(r#"SELECT 'a"b' ?, ?"#, &params),
            r#"SELECT 'a"b' ?, ?"#
        );
    }

    #[test]
    fn trailing_backslash_is_copied() {
        let params = positional([Param::from(1)]);
        assert_eq!(render_demo_query("SELECT '?', ? \\", &params), "SELECT '?', 1 \\");
    }

    #[test]
    fn multibyte_text_survives_scan() {
        let params = positional([Param::from("é")]);
        assert_eq!(
            render_demo_query("SELECT 'ü?', ? -- ß", &params),
            "SELECT 'ü?', 'é' -- ß"
        );
    }

    #[test]
    fn scan_and_simple_path_converge() {
        let cases: [(&str, usize); 4] = [
            ("SELECT ? as col", 1),
            ("QUERY STRING ? ?", 2),
            ("INSERT INTO t (a, b, c) VALUES (?, ?, ?)", 3),
            ("?", 1),
        ];
        for (template, count) in cases {
            let params = BoundParams::positional((0..count).map(|i| Param::from(i as i64)));
            let literals: Vec<String> = params.values().map(resolve_literal).collect();
            let simple = substitute_in_order(template, literals.clone());
            let mut iter = literals.into_iter();
            let scanned = scan_positional(template, || iter.next());
            assert_eq!(simple, scanned, "paths diverged for {template}");
        }
    }

    #[test]
    fn literal_question_mark_in_value_is_not_rescanned() {
        let params = positional([Param::from("a?"), Param::from(1)]);
        assert_eq!(render_demo_query("? ?", &params), "'a?' 1");
    }
}
