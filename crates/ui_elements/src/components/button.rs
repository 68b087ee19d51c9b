//! Action button with variant/size classes and a disabled-aware click notification.

use crate::attributes::AttributeMap;
use crate::document::Document;
use crate::element::{Element, ElementBehavior};
use crate::events::{CustomEvent, ListenerId, ShadowClick};
use crate::fonts::primary_font_family;
use crate::manifest::ElementKind;
use crate::shadow::{Node, ShadowTree};

use super::Size;

/// Tag used when no manifest renames the button.
pub const DEFAULT_TAG: &str = "my-button";
/// Attributes that trigger a re-render.
pub const OBSERVED_ATTRIBUTES: &[&str] = &["variant", "size", "disabled"];
/// Notification dispatched when an enabled button is activated.
pub const CLICK_EVENT: &str = "click";

const ACTIVATE: &str = "activate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Button emphasis variants.
pub enum ButtonVariant {
    /// Brand action.
    Primary,
    /// Low-emphasis action.
    Secondary,
    /// Destructive action.
    Danger,
    /// Confirming action.
    Success,
}

impl Default for ButtonVariant {
    fn default() -> Self {
        Self::Primary
    }
}

impl ButtonVariant {
    /// Every variant.
    pub const ALL: [Self; 4] = [Self::Primary, Self::Secondary, Self::Danger, Self::Success];

    /// Class token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Danger => "danger",
            Self::Success => "success",
        }
    }
}

/// Button style sheet using the configured primary font stack.
pub fn stylesheet() -> String {
    format!(
        "button {{ font-family: {font}; padding: 0.5em 1em; border: none; border-radius: 4px; \
         cursor: pointer; transition: all 0.2s ease; }}\n\
         button:hover:not([disabled]) {{ opacity: 0.9; transform: translateY(-1px); }}\n\
         button:active:not([disabled]) {{ transform: translateY(1px); }}\n\
         button[disabled] {{ opacity: 0.5; cursor: not-allowed; }}\n\
         .primary {{ background: #0066cc; color: white; }}\n\
         .secondary {{ background: #e6e6e6; color: #333; }}\n\
         .danger {{ background: #dc3545; color: white; }}\n\
         .success {{ background: #28a745; color: white; }}\n\
         .small {{ font-size: 0.8rem; padding: 0.3em 0.8em; }}\n\
         .medium {{ font-size: 1rem; }}\n\
         .large {{ font-size: 1.2rem; padding: 0.7em 1.2em; }}\n",
        font = primary_font_family()
    )
}

/// Class list of the inner button. Values are not validated.
pub fn class_list(variant: &str, size: &str) -> String {
    format!("{variant} {size}")
}

/// Button render and activation behavior.
pub struct ButtonBehavior;

impl ElementBehavior for ButtonBehavior {
    fn render(&self, attributes: &AttributeMap) -> ShadowTree {
        let class = class_list(
            attributes.get_or("variant", ButtonVariant::default().token()),
            attributes.get_or("size", Size::default().token()),
        );
        ShadowTree::new(
            stylesheet(),
            Node::new("button")
                .class(class)
                .flag("disabled", attributes.has("disabled"))
                .on_click(ACTIVATE)
                .child(Node::slot(None)),
        )
    }

    fn handle_click(&self, element: &Element, handler: &str, _click: &ShadowClick) {
        if handler != ACTIVATE {
            leptos::logging::warn!("<{}> has no click handler `{handler}`", element.tag());
            return;
        }
        if element.has_attribute("disabled") {
            return;
        }
        element.dispatch_event(&CustomEvent::new(CLICK_EVENT).bubbles(true).composed(true));
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Typed property view over a button element.
pub struct Button {
    element: Element,
}

impl Button {
    /// Creates a button owned by `document`.
    pub fn create(document: &Document) -> Self {
        Self {
            element: document.create_builtin(ElementKind::Button),
        }
    }

    /// Wraps an existing element when it is a button.
    pub fn from_element(element: Element) -> Option<Self> {
        (element.kind() == Some(ElementKind::Button)).then_some(Self { element })
    }

    /// Underlying element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Current variant, `primary` when unset.
    pub fn variant(&self) -> String {
        self.element
            .attribute_or("variant", ButtonVariant::default().token())
    }

    /// Sets the variant attribute.
    pub fn set_variant(&self, value: &str) {
        self.element.set_attribute("variant", value);
    }

    /// Current size, `medium` when unset.
    pub fn size(&self) -> String {
        self.element.attribute_or("size", Size::default().token())
    }

    /// Sets the size attribute.
    pub fn set_size(&self, value: &str) {
        self.element.set_attribute("size", value);
    }

    /// Whether the `disabled` attribute is present.
    pub fn disabled(&self) -> bool {
        self.element.has_attribute("disabled")
    }

    /// Adds or removes the `disabled` attribute.
    pub fn set_disabled(&self, disabled: bool) {
        self.element.toggle_attribute("disabled", disabled);
    }

    /// Activates the inner button as a user click would.
    pub fn click(&self) {
        self.element.click_in_shadow("button");
    }

    /// Subscribes to click notifications.
    pub fn on_click(&self, callback: impl Fn(&CustomEvent) + 'static) -> ListenerId {
        self.element.add_event_listener(CLICK_EVENT, callback)
    }
}
