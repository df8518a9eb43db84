//! Behavioral tests for the standard line parser chain.

use loggrep::parser::{LineParser, ParseContext, ParseStep, ParserChain, TenantParser};

const TENANTS: &[&str] = &[
    "acme.myshopify.com",
    "wadedemt.myshopify.com",
    "a.b",
    "shop-1.example.co.uk",
    "123.456",
];

const NOT_TENANTS: &[&str] = &["GET", "POST", "12345", "app3", "no-dots-here"];

#[test]
fn dotted_tokens_are_extracted() {
    let chain = ParserChain::standard(true);
    for id in TENANTS {
        let line = format!("[{id}] Processing ShopController#products [GET]");
        let ctx = chain.parse(&line);
        assert_eq!(ctx.shop.as_deref(), Some(*id), "{line}");
        assert_eq!(ctx.line, "Processing ShopController#products [GET]");
    }
}

#[test]
fn undotted_tokens_leave_line_unchanged() {
    let chain = ParserChain::standard(true);
    for token in NOT_TENANTS {
        let line = format!("[{token}] something happened");
        let ctx = chain.parse(&line);
        assert!(ctx.shop.is_none(), "{line}");
        assert_eq!(ctx.line, line);
    }
}

#[test]
fn reduced_remainder_is_stable_under_reparse() {
    let parser = TenantParser::new();
    for id in TENANTS {
        let line = format!("[{id}] [{id}] nested");
        let mut ctx = ParseContext::new(&line);

        let ParseStep::Continue(first) = parser.parse(&line, &mut ctx) else {
            panic!("tenant stage always continues");
        };
        let ParseStep::Continue(second) = parser.parse(&first, &mut ctx) else {
            panic!("tenant stage always continues");
        };

        assert_eq!(first, second);
        assert_eq!(ctx.line, format!("[{id}] nested"));
        assert_eq!(ctx.shop.as_deref(), Some(*id));
    }
}

#[test]
fn malformed_input_never_panics_or_drops() {
    let chain = ParserChain::standard(true);
    let inputs = [
        "",
        "[",
        "]",
        "[]",
        "[.]",
        "[a.b]",
        ":12:00:00",
        "file:99:99:99 x",
        "\u{0}\u{1}binary",
        "[acme.myshopify.com]",
    ];
    for input in inputs {
        let ctx = chain.parse(input);
        assert!(
            !ctx.line.is_empty() || input.is_empty() || ctx.shop.is_some(),
            "{input:?} lost its content"
        );
    }
}

#[test]
fn tenant_then_timestamp_compose() {
    let ctx = ParserChain::standard(true).parse("[acme.myshopify.com] log/production.log:09:05:00 GET /");
    assert_eq!(ctx.shop.as_deref(), Some("acme.myshopify.com"));
    assert_eq!(ctx.source.as_deref(), Some("production.log"));
    assert_eq!(ctx.line, "production.log 09:05:00 GET /");
}

#[test]
fn timestamps_can_be_disabled() {
    let ctx = ParserChain::standard(false).parse("log/production.log:09:05:00 GET /");
    assert_eq!(ctx.line, "log/production.log:09:05:00 GET /");
    assert!(ctx.time.is_none());
}
