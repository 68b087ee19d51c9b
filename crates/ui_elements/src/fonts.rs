//! Web font configuration and the one-time head link bootstrap.

use std::sync::OnceLock;

use crate::document::{Document, HeadLink};
use crate::manifest::{theme_config, FontConfig, ThemeConfig};

/// Theme configuration, decoded once per process.
pub fn theme() -> &'static ThemeConfig {
    static THEME: OnceLock<ThemeConfig> = OnceLock::new();
    THEME.get_or_init(|| {
        theme_config().unwrap_or_else(|err| {
            leptos::logging::warn!("theme config decode failed: {err}");
            ThemeConfig::default()
        })
    })
}

/// Font settings from the theme.
pub fn font() -> &'static FontConfig {
    &theme().font
}

/// Primary font stack used by element style sheets.
pub fn primary_font_family() -> &'static str {
    &font().primary
}

fn url_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

/// Whether `href` points at the configured web font stylesheet.
pub fn is_font_stylesheet(href: &str) -> bool {
    links_font(font(), href)
}

/// An unconfigured font matches nothing.
fn links_font(font: &FontConfig, href: &str) -> bool {
    let host = url_host(&font.stylesheet_url);
    if host.is_empty() || font.family_marker.is_empty() {
        return false;
    }
    href.contains(host) && href.contains(&font.family_marker)
}

/// Head links for the web font: one preconnect per configured origin, then the stylesheet.
pub fn font_links() -> Vec<HeadLink> {
    let font = font();
    font.preconnect
        .iter()
        .map(|origin| HeadLink {
            rel: "preconnect".to_string(),
            href: origin.href.clone(),
            cross_origin: origin.cross_origin.clone(),
        })
        .chain(std::iter::once(HeadLink::new(
            "stylesheet",
            font.stylesheet_url.clone(),
        )))
        .collect()
}

/// Returns `true` when the head already links the configured web font stylesheet.
pub fn fonts_linked(document: &Document) -> bool {
    document
        .head_links()
        .iter()
        .any(|link| is_font_stylesheet(&link.href))
}

/// Injects preconnect and stylesheet links for the web font unless they are already present.
///
/// Returns whether links were injected.
pub fn load_fonts(document: &Document) -> bool {
    if fonts_linked(document) {
        return false;
    }
    for link in font_links() {
        document.append_head_link(link);
    }
    leptos::logging::log!("web font links injected for {}", font().family_marker);
    true
}
