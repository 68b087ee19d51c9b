//! Build-time element manifests and theme configuration.
//!
//! `build.rs` validates `elements/*.element.toml` and `theme.toml`, then bakes them into the crate
//! as JSON. These accessors decode that JSON into typed records.

use serde::{Deserialize, Serialize};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/element_catalog_generated.rs"));
}

pub use generated::{ELEMENT_MANIFEST_CATALOG_JSON, THEME_CONFIG_JSON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Built-in element kinds with a behavior implementation in this crate.
pub enum ElementKind {
    /// Status badge.
    Badge,
    /// Action button.
    Button,
    /// Elevated content card.
    Card,
    /// Dialog overlay.
    Modal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Declarative description of one built-in element.
pub struct ElementManifest {
    /// Manifest schema version.
    pub schema_version: u32,
    /// Behavior implementation backing the tag.
    pub kind: ElementKind,
    /// Registered tag name.
    pub tag: String,
    /// Attributes whose mutation notifies the behavior.
    pub observed_attributes: Vec<String>,
    /// Content projection regions; the empty string names the default slot.
    pub slots: Vec<String>,
    /// Outbound notification event types.
    pub emits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Origin the font bootstrap preconnects to.
pub struct Preconnect {
    /// Origin URL.
    pub href: String,
    /// Optional `crossorigin` attribute value.
    #[serde(default)]
    pub cross_origin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Typography configuration shared by the element style sheets.
pub struct FontConfig {
    /// Primary font stack.
    pub primary: String,
    /// Font stack used before the web font loads.
    pub fallback: String,
    /// Stylesheet URL for the web font.
    pub stylesheet_url: String,
    /// Family name that marks an existing font link as ours.
    pub family_marker: String,
    /// Origins to preconnect to before fetching the stylesheet.
    pub preconnect: Vec<Preconnect>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Theme configuration baked from `theme.toml`.
pub struct ThemeConfig {
    /// Theme schema version.
    pub schema_version: u32,
    /// Font settings.
    pub font: FontConfig,
}

/// Decodes the element manifest catalog, sorted by kind.
///
/// The catalog was validated by the build script, so a decode failure is logged and yields an
/// empty catalog.
pub fn element_manifests() -> Vec<ElementManifest> {
    match serde_json::from_str(ELEMENT_MANIFEST_CATALOG_JSON) {
        Ok(manifests) => manifests,
        Err(err) => {
            leptos::logging::warn!("element manifest catalog decode failed: {err}");
            Vec::new()
        }
    }
}

/// Looks up the manifest for one built-in element kind.
pub fn manifest_for(kind: ElementKind) -> Option<ElementManifest> {
    element_manifests()
        .into_iter()
        .find(|manifest| manifest.kind == kind)
}

/// Decodes the theme configuration.
///
/// # Errors
///
/// Returns the decode error when the generated JSON does not match [`ThemeConfig`].
pub fn theme_config() -> Result<ThemeConfig, serde_json::Error> {
    serde_json::from_str(THEME_CONFIG_JSON)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_lists_all_four_elements_in_kind_order() {
        let kinds: Vec<_> = element_manifests().iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Badge,
                ElementKind::Button,
                ElementKind::Card,
                ElementKind::Modal
            ]
        );
    }

    #[test]
    fn modal_manifest_declares_named_regions_and_state_event() {
        let modal = manifest_for(ElementKind::Modal).expect("modal manifest");
        assert_eq!(modal.tag, "my-modal");
        assert_eq!(modal.observed_attributes, vec!["open".to_string()]);
        assert_eq!(
            modal.slots,
            vec!["header".to_string(), String::new(), "footer".to_string()]
        );
        assert_eq!(modal.emits, vec!["modal-state-change".to_string()]);
    }

    #[test]
    fn theme_config_carries_rubik_stylesheet_and_preconnects() {
        let theme = theme_config().expect("theme config");
        assert!(theme.font.primary.starts_with("'Rubik'"));
        assert!(theme.font.stylesheet_url.contains("fonts.googleapis.com"));
        assert!(theme.font.stylesheet_url.contains(&theme.font.family_marker));
        assert_eq!(theme.font.preconnect.len(), 2);
        assert_eq!(
            theme.font.preconnect[1].cross_origin.as_deref(),
            Some("anonymous")
        );
    }
}
