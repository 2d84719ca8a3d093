use crate::config::Variant;
use crate::summary::Coverage;

const SHIELDS_BASE: &str = "https://img.shields.io/badge/Coverage";

/// Render the badge markup line for `coverage`.
///
/// The literal `25` after the percentage is the URL-encoded `%` sign.
pub fn render_badge(variant: Variant, coverage: &Coverage, link: &str) -> String {
    let image = format!(
        "![Static Badge]({SHIELDS_BASE}-{}25-green)",
        coverage.comma_text()
    );
    match variant {
        Variant::Gated => format!("[{image}]({link})"),
        Variant::Plain => image,
    }
}
