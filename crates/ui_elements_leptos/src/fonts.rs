//! Web font bootstrap against the live document head.

use ui_elements::fonts::{font_links, is_font_stylesheet};
use ui_elements::HeadLink;
use wasm_bindgen::JsValue;
use web_sys::Document;

/// Links the configured web font into the page head unless a matching stylesheet is already
/// linked. Returns whether links were injected.
///
/// [`crate::ElementStyles`] calls this on mount.
pub fn inject_web_fonts() -> bool {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    match inject_into(&document) {
        Ok(injected) => injected,
        Err(err) => {
            leptos::logging::warn!("web font injection failed: {err:?}");
            false
        }
    }
}

/// Links still missing from a head whose `<link>` hrefs are `existing`.
fn missing_font_links<I>(existing: I) -> Vec<HeadLink>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if existing
        .into_iter()
        .any(|href| is_font_stylesheet(href.as_ref()))
    {
        return Vec::new();
    }
    font_links()
}

fn inject_into(document: &Document) -> Result<bool, JsValue> {
    let Some(head) = document.head() else {
        return Ok(false);
    };
    let existing = head.get_elements_by_tag_name("link");
    let hrefs = (0..existing.length())
        .filter_map(|index| existing.item(index))
        .filter_map(|link| link.get_attribute("href"));
    let missing = missing_font_links(hrefs);
    if missing.is_empty() {
        return Ok(false);
    }

    for link in missing {
        let element = document.create_element("link")?;
        element.set_attribute("rel", &link.rel)?;
        element.set_attribute("href", &link.href)?;
        if let Some(cross_origin) = link.cross_origin.as_deref() {
            element.set_attribute("crossorigin", cross_origin)?;
        }
        head.append_child(&element)?;
    }
    leptos::logging::log!("web font links injected");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_head_gets_preconnects_then_stylesheet() {
        let rels: Vec<String> = missing_font_links(Vec::<String>::new())
            .into_iter()
            .map(|link| link.rel)
            .collect();
        assert_eq!(rels, vec!["preconnect", "preconnect", "stylesheet"]);
    }

    #[test]
    fn linked_font_stylesheet_skips_injection() {
        let hrefs = [
            "/assets/app.css",
            "https://fonts.googleapis.com/css2?family=Rubik:wght@400",
        ];
        assert!(missing_font_links(hrefs).is_empty());
    }

    #[test]
    fn unrelated_links_do_not_count() {
        let hrefs = ["/assets/app.css", "https://fonts.googleapis.com/css2?family=Inter"];
        assert_eq!(missing_font_links(hrefs).len(), 3);
    }
}
