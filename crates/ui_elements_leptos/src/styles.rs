//! Element style sheets scoped to their host wrappers.
//!
//! Each component renders inside a wrapper carrying `data-ui-kind`; the element sheets are
//! rewritten so their selectors only match beneath that wrapper, which keeps `.primary` on a badge
//! from leaking into a button.

use leptos::*;
use ui_elements::components::{badge, button, card, modal};

/// Wrapper `data-ui-kind` values, one per element.
pub const HOST_KINDS: [&str; 4] = ["badge", "button", "card", "modal"];

/// Attribute selector matching the wrapper of `kind`.
pub fn host_scope(kind: &str) -> String {
    format!("[data-ui-kind=\"{kind}\"]")
}

/// Prefixes every selector of a one-rule-per-line style sheet with `scope`.
pub fn scope_stylesheet(scope: &str, css: &str) -> String {
    let mut scoped = String::with_capacity(css.len() * 2);
    for line in css.lines() {
        let Some((selectors, body)) = line.split_once('{') else {
            scoped.push_str(line);
            scoped.push('\n');
            continue;
        };
        let selectors = selectors
            .split(',')
            .map(|selector| format!("{scope} {}", selector.trim()))
            .collect::<Vec<_>>()
            .join(", ");
        scoped.push_str(&format!("{selectors} {{{body}\n"));
    }
    scoped
}

/// Every element style sheet, scoped. Card shadow and border are applied inline per instance.
pub fn element_styles() -> String {
    let sheets = [
        badge::stylesheet().to_string(),
        button::stylesheet(),
        card::stylesheet(
            card::box_shadow(card::DEFAULT_ELEVATION),
            card::border_style(false),
        ),
        modal::STYLESHEET.to_string(),
    ];
    HOST_KINDS
        .iter()
        .zip(sheets.iter())
        .map(|(kind, sheet)| scope_stylesheet(&host_scope(kind), sheet))
        .collect()
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[component]
/// Injects the scoped element style sheets and links the web font. Render once near the app root.
pub fn ElementStyles() -> impl IntoView {
    crate::inject_web_fonts();
    view! { <style data-ui-kind="element-styles">{element_styles()}</style> }
}
