//! Tests for request validation and command construction.

use loggrep::search::{CommandSpec, SearchParams, SearchTool, FILTER_PIPELINE};

fn whitelist() -> Vec<String> {
    ["app.log", "app.log.gz", "app.log.bz2"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn tool_depends_only_on_suffix() {
    let queries = ["error", "a.b", "$(rm -rf /)", "\"quoted\"", "ünïcode"];
    let expected = [
        ("app.log.gz", SearchTool::Zgrep),
        ("app.log.bz2", SearchTool::Bzgrep),
        ("app.log", SearchTool::Grep),
    ];

    for q in queries {
        for (file, tool) in expected {
            let spec = CommandSpec::validate(&SearchParams::new(file, q), &whitelist()).unwrap();
            assert_eq!(spec.tool(), tool, "{file} with {q:?}");
            assert_eq!(spec.argv()[0], tool.program());
        }
    }
}

#[test]
fn filtered_search_runs_tool_through_constant_script() {
    let params = SearchParams::new("app.log.bz2", "Processing").with_filter("acme.myshopify.com");
    let spec = CommandSpec::validate(&params, &whitelist()).unwrap();
    let argv = spec.argv();

    assert_eq!(&argv[..4], ["sh", "-c", FILTER_PIPELINE, "bzgrep"]);
    assert!(!argv[2].contains("Processing"));
    assert!(!argv[2].contains("acme"));
}

#[test]
fn query_quotes_are_stripped_before_spawning() {
    let spec = CommandSpec::validate(
        &SearchParams::new("app.log", r#"say "hi" it's"#),
        &whitelist(),
    )
    .unwrap();
    assert_eq!(spec.primary(), "say hi its");
}

#[test]
fn whitelist_match_is_exact() {
    let list = whitelist();
    for file in ["app", "./app.log", "app.log ", "APP.LOG", "../app.log"] {
        let err = CommandSpec::validate(&SearchParams::new(file, "x"), &list).unwrap_err();
        assert!(err.is_invalid_parameter(), "{file:?} should be rejected");
    }
}
