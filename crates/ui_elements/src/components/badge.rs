//! Status badge: variant × color × size class selection over a fixed style sheet.

use std::sync::OnceLock;

use crate::attributes::AttributeMap;
use crate::document::Document;
use crate::element::{Element, ElementBehavior};
use crate::manifest::ElementKind;
use crate::shadow::{Node, ShadowTree};

use super::Size;

/// Tag used when no manifest renames the badge.
pub const DEFAULT_TAG: &str = "my-badge";
/// Attributes that trigger a re-render.
pub const OBSERVED_ATTRIBUTES: &[&str] = &["variant", "color", "size"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Badge fill treatments.
pub enum BadgeVariant {
    /// Solid background.
    Filled,
    /// Transparent background with a colored border.
    Outlined,
    /// Tinted background.
    Soft,
}

impl Default for BadgeVariant {
    fn default() -> Self {
        Self::Filled
    }
}

impl BadgeVariant {
    /// Every variant.
    pub const ALL: [Self; 3] = [Self::Filled, Self::Outlined, Self::Soft];

    /// Class token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::Outlined => "outlined",
            Self::Soft => "soft",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Badge color roles.
pub enum BadgeColor {
    /// Brand color.
    Primary,
    /// Muted gray.
    Secondary,
    /// Positive status.
    Success,
    /// Caution status.
    Warning,
    /// Destructive status.
    Danger,
    /// Informational status.
    Info,
    /// Dark neutral.
    Neutral,
}

impl Default for BadgeColor {
    fn default() -> Self {
        Self::Primary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Colors one role resolves to across the variants.
pub struct Swatch {
    /// Filled background and outlined foreground/border.
    pub solid: &'static str,
    /// Soft background.
    pub soft_background: &'static str,
    /// Soft foreground.
    pub soft_foreground: &'static str,
}

impl BadgeColor {
    /// Every color role.
    pub const ALL: [Self; 7] = [
        Self::Primary,
        Self::Secondary,
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Info,
        Self::Neutral,
    ];

    /// Class token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Neutral => "neutral",
        }
    }

    /// Color lookup table.
    pub fn swatch(self) -> Swatch {
        let (solid, soft_background, soft_foreground) = match self {
            Self::Primary => ("#0066cc", "#dbeafe", "#1d4ed8"),
            Self::Secondary => ("#6b7280", "#f3f4f6", "#374151"),
            Self::Success => ("#10b981", "#d1fae5", "#065f46"),
            Self::Warning => ("#f59e0b", "#fef3c7", "#92400e"),
            Self::Danger => ("#ef4444", "#fee2e2", "#991b1b"),
            Self::Info => ("#3b82f6", "#dbeafe", "#1e40af"),
            Self::Neutral => ("#374151", "#f3f4f6", "#374151"),
        };
        Swatch {
            solid,
            soft_background,
            soft_foreground,
        }
    }
}

fn size_metrics(size: Size) -> (&'static str, &'static str, &'static str) {
    match size {
        Size::Small => ("0.75rem", "0.25rem 0.5rem", "1.25rem"),
        Size::Medium => ("0.875rem", "0.375rem 0.75rem", "1.5rem"),
        Size::Large => ("1rem", "0.5rem 1rem", "2rem"),
    }
}

/// Badge style sheet, built once from the size and color tables.
pub fn stylesheet() -> &'static str {
    static SHEET: OnceLock<String> = OnceLock::new();
    SHEET.get_or_init(build_stylesheet)
}

fn build_stylesheet() -> String {
    let mut css = String::from(
        ".badge { display: inline-flex; align-items: center; justify-content: center; \
         font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; font-weight: 500; \
         line-height: 1; border-radius: 9999px; white-space: nowrap; \
         transition: all 0.2s ease; border: 1px solid transparent; }\n",
    );
    for size in Size::ALL {
        let (font_size, padding, min_height) = size_metrics(size);
        css.push_str(&format!(
            ".{} {{ font-size: {font_size}; padding: {padding}; min-height: {min_height}; }}\n",
            size.token()
        ));
    }
    for color in BadgeColor::ALL {
        let token = color.token();
        let swatch = color.swatch();
        css.push_str(&format!(
            ".filled.{token} {{ background-color: {}; color: white; }}\n",
            swatch.solid
        ));
        css.push_str(&format!(
            ".outlined.{token} {{ background-color: transparent; color: {0}; border-color: {0}; }}\n",
            swatch.solid
        ));
        css.push_str(&format!(
            ".soft.{token} {{ background-color: {}; color: {}; }}\n",
            swatch.soft_background, swatch.soft_foreground
        ));
    }
    css.push_str(
        ".badge:hover { transform: scale(1.05); }\n\
         .filled:hover { opacity: 0.9; }\n\
         .outlined:hover { background-color: rgba(0, 0, 0, 0.05); }\n\
         .soft:hover { opacity: 0.8; }\n",
    );
    css
}

/// Class list of the badge span. Values are not validated.
pub fn class_list(variant: &str, color: &str, size: &str) -> String {
    format!("badge {variant} {color} {size}")
}

/// Badge render behavior.
pub struct BadgeBehavior;

impl ElementBehavior for BadgeBehavior {
    fn render(&self, attributes: &AttributeMap) -> ShadowTree {
        let class = class_list(
            attributes.get_or("variant", BadgeVariant::default().token()),
            attributes.get_or("color", BadgeColor::default().token()),
            attributes.get_or("size", Size::default().token()),
        );
        ShadowTree::new(
            stylesheet(),
            Node::new("span").class(class).child(Node::slot(None)),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Typed property view over a badge element.
pub struct Badge {
    element: Element,
}

impl Badge {
    /// Creates a badge owned by `document`.
    pub fn create(document: &Document) -> Self {
        Self {
            element: document.create_builtin(ElementKind::Badge),
        }
    }

    /// Wraps an existing element when it is a badge.
    pub fn from_element(element: Element) -> Option<Self> {
        (element.kind() == Some(ElementKind::Badge)).then_some(Self { element })
    }

    /// Underlying element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Current variant, `filled` when unset.
    pub fn variant(&self) -> String {
        self.element
            .attribute_or("variant", BadgeVariant::default().token())
    }

    /// Sets the variant attribute.
    pub fn set_variant(&self, value: &str) {
        self.element.set_attribute("variant", value);
    }

    /// Current color, `primary` when unset.
    pub fn color(&self) -> String {
        self.element
            .attribute_or("color", BadgeColor::default().token())
    }

    /// Sets the color attribute.
    pub fn set_color(&self, value: &str) {
        self.element.set_attribute("color", value);
    }

    /// Current size, `medium` when unset.
    pub fn size(&self) -> String {
        self.element.attribute_or("size", Size::default().token())
    }

    /// Sets the size attribute.
    pub fn set_size(&self, value: &str) {
        self.element.set_attribute("size", value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mounted_badge() -> (Document, Badge) {
        let document = Document::new();
        let badge = Badge::create(&document);
        badge.element().append_text("Badge Text");
        document.append_to_body(badge.element());
        (document, badge)
    }

    fn span_classes(badge: &Badge) -> Vec<String> {
        badge
            .element()
            .shadow_root()
            .and_then(|tree| tree.select(".badge").map(|node| node.classes().to_vec()))
            .unwrap_or_default()
    }

    #[test]
    fn renders_default_classes_and_keeps_light_content() {
        let (_document, badge) = mounted_badge();
        assert_eq!(span_classes(&badge), vec!["badge", "filled", "primary", "medium"]);
        assert_eq!(badge.element().text_content(), "Badge Text");
    }

    #[test]
    fn every_valid_triple_sets_exactly_one_class_per_axis() {
        let (_document, badge) = mounted_badge();
        for variant in BadgeVariant::ALL {
            for color in BadgeColor::ALL {
                for size in Size::ALL {
                    badge.set_variant(variant.token());
                    badge.set_color(color.token());
                    badge.set_size(size.token());
                    let classes = span_classes(&badge);

                    let hits = |axis: &[&str]| {
                        axis.iter()
                            .filter(|token| classes.iter().any(|class| class == *token))
                            .count()
                    };
                    let variants: Vec<_> = BadgeVariant::ALL.iter().map(|v| v.token()).collect();
                    let colors: Vec<_> = BadgeColor::ALL.iter().map(|c| c.token()).collect();
                    let sizes: Vec<_> = Size::ALL.iter().map(|s| s.token()).collect();

                    assert_eq!(hits(variants.as_slice()), 1, "{classes:?}");
                    assert_eq!(hits(colors.as_slice()), 1, "{classes:?}");
                    assert_eq!(hits(sizes.as_slice()), 1, "{classes:?}");
                    assert!(classes.contains(&variant.token().to_string()));
                    assert!(classes.contains(&color.token().to_string()));
                    assert!(classes.contains(&size.token().to_string()));
                }
            }
        }
    }

    #[test]
    fn unrecognized_values_render_verbatim() {
        let (_document, badge) = mounted_badge();
        badge.element().set_attribute("variant", "invalid-variant");
        badge.element().set_attribute("color", "invalid-color");
        badge.element().set_attribute("size", "invalid-size");
        assert_eq!(
            span_classes(&badge),
            vec!["badge", "invalid-variant", "invalid-color", "invalid-size"]
        );
    }

    #[test]
    fn properties_and_attributes_round_trip() {
        let (_document, badge) = mounted_badge();
        badge.set_variant("soft");
        badge.set_color("info");
        badge.set_size("small");
        assert_eq!(badge.element().get_attribute("variant").as_deref(), Some("soft"));
        assert_eq!(badge.element().get_attribute("color").as_deref(), Some("info"));
        assert_eq!(badge.element().get_attribute("size").as_deref(), Some("small"));

        badge.element().set_attribute("variant", "outlined");
        badge.element().set_attribute("color", "danger");
        badge.element().set_attribute("size", "large");
        assert_eq!(badge.variant(), "outlined");
        assert_eq!(badge.color(), "danger");
        assert_eq!(badge.size(), "large");
    }

    #[test]
    fn getters_fall_back_to_defaults_when_unset() {
        let (_document, badge) = mounted_badge();
        assert_eq!(badge.variant(), "filled");
        assert_eq!(badge.color(), "primary");
        assert_eq!(badge.size(), "medium");
    }

    #[test]
    fn each_attribute_change_rerenders_and_content_survives() {
        let (_document, badge) = mounted_badge();
        let before = badge.element().render_count();
        badge.set_color("warning");
        badge.set_size("large");
        assert_eq!(badge.element().render_count(), before + 2);
        assert_eq!(badge.element().text_content(), "Badge Text");
        assert_eq!(
            span_classes(&badge),
            vec!["badge", "filled", "warning", "large"]
        );
    }

    #[test]
    fn render_tree_is_a_span_with_one_default_slot() {
        let (_document, badge) = mounted_badge();
        let tree = badge.element().shadow_root().expect("shadow root");
        assert_eq!(tree.root().tag(), "span");
        assert_eq!(tree.slot_names(), vec![None]);
        assert_eq!(
            tree.to_html().split("</style>").nth(1),
            Some("<span class=\"badge filled primary medium\"><slot></slot></span>")
        );
    }

    #[test]
    fn stylesheet_covers_every_variant_color_pair() {
        let css = stylesheet();
        for variant in BadgeVariant::ALL {
            for color in BadgeColor::ALL {
                assert!(css.contains(&format!(".{}.{} {{", variant.token(), color.token())));
            }
        }
        assert!(css.contains(".filled.primary { background-color: #0066cc; color: white; }"));
        assert!(css.contains(".soft.danger { background-color: #fee2e2; color: #991b1b; }"));
    }

    #[test]
    fn from_element_rejects_other_kinds() {
        let document = Document::new();
        let card = document.create_element("my-card");
        assert!(Badge::from_element(card).is_none());
        let badge = document.create_element("my-badge");
        assert!(Badge::from_element(badge).is_some());
    }
}
