//! Attribute-driven custom elements with encapsulated rendering.
//!
//! The crate models a small custom-element host: a [`Document`] owns a body, a head, a keyboard
//! channel, and an [`ElementRegistry`]. Elements created from a registered tag carry an
//! [`ElementBehavior`] that re-renders a [`ShadowTree`] from attributes on every observed mutation.
//!
//! Four built-in elements ship in [`components`]: a badge, a button with a disabled-aware click
//! notification, a card with elevation shadows, and a modal whose `open` attribute is driven by a
//! close control, backdrop clicks, and Escape on the document keyboard channel.
//!
//! Tags and observed attributes come from `elements/*.element.toml`; the font stack comes from
//! `theme.toml`. Both are validated by the build script.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod attributes;
pub mod components;
mod document;
mod element;
mod events;
pub mod fonts;
mod manifest;
mod registry;
mod shadow;

pub use attributes::{AttributeChange, AttributeMap};
pub use components::{
    Badge, BadgeColor, BadgeVariant, Button, ButtonVariant, Card, Modal, ModalStateChange, Size,
};
pub use document::{Document, HeadLink, WeakDocument, KEYDOWN};
pub use element::{Element, ElementBehavior, LightNode, WeakElement};
pub use events::{
    CustomEvent, EventDetailError, KeyboardEvent, ListenerHandle, ListenerId, ShadowClick,
};
pub use manifest::{
    element_manifests, manifest_for, theme_config, ElementKind, ElementManifest, FontConfig,
    Preconnect, ThemeConfig, ELEMENT_MANIFEST_CATALOG_JSON, THEME_CONFIG_JSON,
};
pub use registry::{
    is_valid_custom_element_name, BehaviorFactory, DefineError, ElementDefinition,
    ElementRegistry,
};
pub use shadow::{Node, NodePath, ShadowTree};

/// Convenience imports for hosts embedding the built-in elements.
pub mod prelude {
    pub use crate::{
        Badge, Button, Card, CustomEvent, Document, Element, ElementKind, KeyboardEvent, Modal,
        ModalStateChange, KEYDOWN,
    };
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::prelude::*;
    use super::{components, fonts};

    #[test]
    fn showcase_page_wires_every_element() {
        let document = Document::new();
        document.bootstrap();

        let badge = document.create_element("my-badge");
        badge.set_attribute("color", "success");
        badge.append_text("New");

        let open_button = Button::create(&document);
        open_button.element().append_text("Open Modal");

        let card = Card::create(&document);
        card.set_elevation("3");
        card.element().append_element(&badge);
        card.element().append_element(open_button.element());

        let modal = Modal::create(&document);
        let body = document.create_element("p");
        body.append_text("Modal content goes here");
        modal.element().append_element(&body);

        document.append_to_body(card.element());
        document.append_to_body(modal.element());

        let opener = modal.clone();
        open_button.on_click(move |_| opener.show());

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        document.add_event_listener(components::modal::STATE_CHANGE_EVENT, move |event| {
            if let Ok(change) = ModalStateChange::from_event(event) {
                sink.borrow_mut().push(change.open);
            }
        });

        open_button.click();
        assert!(modal.open());
        document.dispatch_keydown(&KeyboardEvent::new("Escape"));
        assert!(!modal.open());

        assert_eq!(*log.borrow(), vec![true, false]);
        assert_eq!(Badge::from_element(badge).map(|b| b.color()), Some("success".to_string()));
        assert_eq!(document.keyboard_listener_count(), 1);
        assert!(fonts::fonts_linked(&document));
    }

    #[test]
    fn created_elements_report_their_kind() {
        let document = Document::new();
        let kinds: Vec<Option<ElementKind>> = ["my-badge", "my-button", "my-card", "my-modal", "div"]
            .iter()
            .map(|tag| document.create_element(tag).kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(ElementKind::Badge),
                Some(ElementKind::Button),
                Some(ElementKind::Card),
                Some(ElementKind::Modal),
                None,
            ]
        );
    }
}
