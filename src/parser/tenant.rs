//! Tenant (shop) extraction stage.

use std::sync::LazyLock;

use regex::Regex;

use super::{LineParser, ParseContext, ParseStep};

/// Leading `[token] rest` where the token is alphanumerics, hyphen and dot.
static TENANT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[([a-zA-Z0-9.\-]+)\]\s*(.*)$").expect("tenant pattern is valid")
});

/// Extracts a domain-like tenant identifier from the front of a line.
///
/// Given
///
/// ```text
/// [wadedemt.myshopify.com]   Processing ShopController#products [GET]
/// ```
///
/// records `wadedemt.myshopify.com` as the shop and continues with
/// `Processing ShopController#products [GET]`. Bracketed tokens without a dot
/// (`[GET]`, `[12345]`) are not tenants and leave the line untouched. Only the
/// first bracketed group is considered, and a context that already carries a
/// shop is never extracted into twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantParser;

impl TenantParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Split a line into `(shop, rest)` if it starts with a tenant marker.
    #[must_use]
    pub fn split(line: &str) -> Option<(&str, &str)> {
        let caps = TENANT_LINE.captures(line)?;
        let token = caps.get(1)?.as_str();
        if !token.contains('.') {
            return None;
        }
        let rest = caps.get(2).map_or("", |m| m.as_str());
        Some((token, rest))
    }
}

impl LineParser for TenantParser {
    fn name(&self) -> &'static str {
        "tenant"
    }

    fn parse(&self, line: &str, context: &mut ParseContext) -> ParseStep {
        if !context.has_shop() {
            if let Some((shop, rest)) = Self::split(line) {
                context.shop = Some(shop.to_string());
                context.line = rest.to_string();
                return ParseStep::Continue(context.line.clone());
            }
        }

        context.line = line.to_string();
        ParseStep::Continue(line.to_string())
    }
}
