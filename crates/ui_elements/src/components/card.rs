//! Content card with an elevation → shadow lookup and an optional border.

use crate::attributes::AttributeMap;
use crate::document::Document;
use crate::element::{Element, ElementBehavior};
use crate::fonts::primary_font_family;
use crate::manifest::ElementKind;
use crate::shadow::{Node, ShadowTree};

/// Tag used when no manifest renames the card.
pub const DEFAULT_TAG: &str = "my-card";
/// Attributes that trigger a re-render.
pub const OBSERVED_ATTRIBUTES: &[&str] = &["elevation", "border"];
/// Elevation used when the attribute is absent.
pub const DEFAULT_ELEVATION: &str = "1";
/// Border applied when the `border` attribute is present.
pub const BORDER_STYLE: &str = "1px solid #e0e0e0";

const ELEVATION_SHADOWS: [(&str, &str); 6] = [
    ("0", "none"),
    ("1", "0 2px 4px rgba(0,0,0,0.1)"),
    ("2", "0 4px 8px rgba(0,0,0,0.1)"),
    ("3", "0 8px 16px rgba(0,0,0,0.1)"),
    ("4", "0 16px 24px rgba(0,0,0,0.1)"),
    ("5", "0 24px 32px rgba(0,0,0,0.1)"),
];

/// Shadow for an elevation level; anything outside `"0"`..=`"5"` resolves like `"1"`.
pub fn box_shadow(elevation: &str) -> &'static str {
    let lookup = |level: &str| {
        ELEVATION_SHADOWS
            .iter()
            .find(|(candidate, _)| *candidate == level)
            .map(|(_, shadow)| *shadow)
    };
    lookup(elevation)
        .or_else(|| lookup(DEFAULT_ELEVATION))
        .unwrap_or("none")
}

/// Border declaration for the border flag.
pub fn border_style(border: bool) -> &'static str {
    if border {
        BORDER_STYLE
    } else {
        "none"
    }
}

/// Card style sheet for a resolved shadow and border.
pub fn stylesheet(shadow: &str, border: &str) -> String {
    format!(
        ".card {{ background: white; border-radius: 8px; padding: 16px; box-sizing: border-box; \
         box-shadow: {shadow}; border: {border}; display: block; font-family: {font}; }}\n\
         .card-content {{ display: block; }}\n",
        font = primary_font_family()
    )
}

/// Card render behavior.
pub struct CardBehavior;

impl ElementBehavior for CardBehavior {
    fn render(&self, attributes: &AttributeMap) -> ShadowTree {
        let shadow = box_shadow(attributes.get_or("elevation", DEFAULT_ELEVATION));
        let border = border_style(attributes.has("border"));
        ShadowTree::new(
            stylesheet(shadow, border),
            Node::new("div")
                .class("card")
                .child(Node::new("div").class("card-content").child(Node::slot(None))),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Typed property view over a card element.
pub struct Card {
    element: Element,
}

impl Card {
    /// Creates a card owned by `document`.
    pub fn create(document: &Document) -> Self {
        Self {
            element: document.create_builtin(ElementKind::Card),
        }
    }

    /// Wraps an existing element when it is a card.
    pub fn from_element(element: Element) -> Option<Self> {
        (element.kind() == Some(ElementKind::Card)).then_some(Self { element })
    }

    /// Underlying element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Current elevation, `"1"` when unset.
    pub fn elevation(&self) -> String {
        self.element.attribute_or("elevation", DEFAULT_ELEVATION)
    }

    /// Sets the elevation attribute.
    pub fn set_elevation(&self, value: &str) {
        self.element.set_attribute("elevation", value);
    }

    /// Whether the `border` attribute is present.
    pub fn border(&self) -> bool {
        self.element.has_attribute("border")
    }

    /// Adds or removes the `border` attribute.
    pub fn set_border(&self, border: bool) {
        self.element.toggle_attribute("border", border);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mounted_card() -> (Document, Card) {
        let document = Document::new();
        let card = Card::create(&document);
        card.element().append_text("Card Content");
        document.append_to_body(card.element());
        (document, card)
    }

    fn style(card: &Card) -> String {
        card.element()
            .shadow_root()
            .map(|tree| tree.style().to_string())
            .unwrap_or_default()
    }

    fn shadow_px(shadow: &str) -> u32 {
        shadow
            .split_whitespace()
            .nth(2)
            .and_then(|blur| blur.trim_end_matches("px").parse().ok())
            .unwrap_or(0)
    }

    #[test]
    fn renders_card_wrapper_with_default_shadow_and_no_border() {
        let (_document, card) = mounted_card();
        let tree = card.element().shadow_root().expect("shadow root");
        assert!(tree.select(".card").is_some());
        assert_eq!(tree.query("div.card-content"), tree.query(".card-content"));
        assert_eq!(tree.slot_names(), vec![None]);
        assert!(style(&card).contains("box-shadow: 0 2px 4px rgba(0,0,0,0.1)"));
        assert!(style(&card).contains("border: none"));
        assert_eq!(card.element().text_content(), "Card Content");
    }

    #[test]
    fn level_zero_has_no_shadow_and_levels_strictly_increase() {
        assert_eq!(box_shadow("0"), "none");
        let magnitudes: Vec<u32> = ["1", "2", "3", "4", "5"]
            .iter()
            .map(|level| shadow_px(box_shadow(level)))
            .collect();
        assert!(magnitudes.windows(2).all(|pair| pair[0] < pair[1]), "{magnitudes:?}");
    }

    #[test]
    fn unknown_elevations_resolve_like_level_one() {
        for level in ["6", "-1", "abc", "1.5", " 2"] {
            assert_eq!(box_shadow(level), box_shadow("1"), "{level}");
        }
    }

    #[test]
    fn elevation_attribute_rewrites_style_text() {
        let (_document, card) = mounted_card();
        card.element().set_attribute("elevation", "3");
        assert!(style(&card).contains("box-shadow: 0 8px 16px rgba(0,0,0,0.1)"));
        card.element().set_attribute("elevation", "5");
        assert!(style(&card).contains("box-shadow: 0 24px 32px rgba(0,0,0,0.1)"));
        card.element().set_attribute("elevation", "0");
        assert!(style(&card).contains("box-shadow: none"));
        card.element().set_attribute("elevation", "invalid");
        assert!(style(&card).contains("box-shadow: 0 2px 4px rgba(0,0,0,0.1)"));
    }

    #[test]
    fn border_presence_toggles_border_style() {
        let (_document, card) = mounted_card();
        card.element().set_attribute("border", "");
        assert!(style(&card).contains("border: 1px solid #e0e0e0"));
        card.element().remove_attribute("border");
        assert!(style(&card).contains("border: none"));
        assert!(!style(&card).contains("#e0e0e0"));
    }

    #[test]
    fn properties_and_attributes_round_trip() {
        let (_document, card) = mounted_card();
        assert_eq!(card.elevation(), "1");
        assert!(!card.border());

        card.set_elevation("4");
        card.set_border(true);
        assert_eq!(card.element().get_attribute("elevation").as_deref(), Some("4"));
        assert!(card.element().has_attribute("border"));

        card.element().set_attribute("elevation", "2");
        card.element().remove_attribute("border");
        assert_eq!(card.elevation(), "2");
        assert!(!card.border());
    }
}
