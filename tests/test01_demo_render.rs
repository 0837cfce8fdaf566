use std::borrow::Cow;

use sql_powered::prelude::*;

fn positional(params: Vec<Param>) -> BoundParams {
    BoundParams::positional(params)
}

#[test]
fn renders_documented_cases() {
    let cases: Vec<(&str, BoundParams, &str)> = vec![
        ("SELECT ? as col", positional(vec![1.into()]), "SELECT 1 as col"),
        (
            "SELECT :var as col",
            BoundParams::named([("var", "myString")]),
            "SELECT 'myString' as col",
        ),
        (
            "QUERY STRING ? ?",
            positional(vec![1.into(), "2".into()]),
            "QUERY STRING 1 '2'",
        ),
        (
            "QUERY STRING \"?\" ? ?",
            positional(vec![1.into(), "2".into()]),
            "QUERY STRING \"?\" 1 '2'",
        ),
        (
            "QUERY '?' AND \"?\\\"\" ? ?",
            positional(vec![1.into(), "2".into()]),
            "QUERY '?' AND \"?\\\"\" 1 '2'",
        ),
    ];

    for (template, params, expected) in cases {
        assert_eq!(render_demo_query(template, &params), expected, "template: {template}");
    }
}

#[test]
fn resolver_handles_wrappers_and_custom_text() {
    assert_eq!(resolve_literal(&TypedParam::int(1).into()), "1");
    assert_eq!(resolve_literal(&TypedParam::string("2").into()), "'2'");
    assert_eq!(
        resolve_literal(&Param::stringable(|| "Hello".to_string())),
        "'Hello'"
    );
}

#[test]
fn zero_params_is_identity() {
    for template in ["", "SELECT 1", "SELECT ? FROM t", "UPDATE t SET a = :a", "'?' \"?\""] {
        let rendered = render_demo_query(template, &BoundParams::new());
        assert!(matches!(rendered, Cow::Borrowed(_)));
        assert_eq!(rendered, template);
    }
}

#[test]
fn insert_built_from_named_fields() {
    let params = BoundParams::named([
        ("name", Param::from("O'Brien")),
        ("age", Param::from(41)),
        ("tags", TypedParam::json(&["a", "b"]).expect("encodable").into()),
    ]);
    assert_eq!(
        render_demo_query("INSERT INTO people (name,age,tags) VALUES(:name,:age,:tags)", &params),
        r#"INSERT INTO people (name,age,tags) VALUES('O\'Brien',41,'["a","b"]')"#
    );
}

#[test]
fn update_with_prefixed_names() {
    let params = BoundParams::named([
        ("PDOPOW_UP_status", Param::from("done")),
        ("PDOPOW_WH_id", Param::from(12)),
    ]);
    assert_eq!(
        render_demo_query(
            "UPDATE jobs SET status = :PDOPOW_UP_status WHERE id = :PDOPOW_WH_id",
            &params
        ),
        "UPDATE jobs SET status = 'done' WHERE id = 12"
    );
}

#[test]
fn concurrent_rendering_is_independent() {
    let handles: Vec<_> = (0..8_i64)
        .map(|i| {
            std::thread::spawn(move || {
                let params = BoundParams::positional([Param::from(i), Param::from("x")]);
                render_demo_query("SELECT '?', ?, ?", &params).into_owned()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let rendered = handle.join().expect("render thread");
        assert_eq!(rendered, format!("SELECT '?', {i}, 'x'"));
    }
}
