//! Dialog overlay driven by the `open` presence attribute.
//!
//! `open` is the only state. External attribute writes, the close control, a click landing on the
//! backdrop itself, and Escape on the document keyboard channel are the transitions; every
//! mutation of `open` re-renders and emits [`STATE_CHANGE_EVENT`]. The keyboard subscription is
//! held only while the element is connected.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::attributes::{AttributeChange, AttributeMap};
use crate::document::Document;
use crate::element::{Element, ElementBehavior};
use crate::events::{CustomEvent, EventDetailError, ListenerHandle, ListenerId, ShadowClick};
use crate::manifest::ElementKind;
use crate::shadow::{Node, ShadowTree};

/// Tag used when no manifest renames the modal.
pub const DEFAULT_TAG: &str = "my-modal";
/// Attributes that trigger a re-render.
pub const OBSERVED_ATTRIBUTES: &[&str] = &["open"];
/// Notification dispatched on every mutation of `open`.
pub const STATE_CHANGE_EVENT: &str = "modal-state-change";
/// Key that dismisses an open modal.
pub const ESCAPE_KEY: &str = "Escape";

const CLOSE: &str = "close";
const BACKDROP: &str = "backdrop";

/// Modal style sheet.
pub const STYLESHEET: &str = "\
.modal-backdrop { position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
background-color: rgba(0, 0, 0, 0.5); display: flex; align-items: center; \
justify-content: center; visibility: hidden; opacity: 0; \
transition: visibility 0s linear 0.25s, opacity 0.25s; z-index: 1000; }
.modal-backdrop.open { visibility: visible; opacity: 1; transition-delay: 0s; }
.modal-container { background: white; border-radius: 8px; padding: 24px; width: auto; \
max-width: 500px; max-height: 80vh; overflow-y: auto; box-shadow: 0 5px 15px rgba(0,0,0,0.5); \
position: relative; transform: scale(0.8); transition: transform 0.25s; }
.modal-backdrop.open .modal-container { transform: scale(1); }
.close-button { position: absolute; top: 10px; right: 10px; background: none; border: none; \
font-size: 24px; cursor: pointer; color: #999; }
.close-button:hover { color: #333; }
.modal-header { margin-bottom: 16px; }
.modal-body { margin-bottom: 24px; }
.modal-footer { display: flex; justify-content: flex-end; }
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Detail payload of [`STATE_CHANGE_EVENT`].
pub struct ModalStateChange {
    /// Open state after the mutation.
    pub open: bool,
}

impl ModalStateChange {
    /// Decodes the payload from a state-change notification.
    ///
    /// # Errors
    ///
    /// Returns [`EventDetailError`] when the detail is not `{ "open": bool }`.
    pub fn from_event(event: &CustomEvent) -> Result<Self, EventDetailError> {
        event.detail_as()
    }
}

/// Builds the modal render tree for an open state.
pub fn render_tree(open: bool) -> ShadowTree {
    let backdrop_class = if open { "modal-backdrop open" } else { "modal-backdrop" };
    ShadowTree::new(
        STYLESHEET,
        Node::new("div")
            .class(backdrop_class)
            .on_click(BACKDROP)
            .child(
                Node::new("div")
                    .class("modal-container")
                    .child(
                        Node::new("button")
                            .class("close-button")
                            .attr("aria-label", "Close")
                            .text("\u{00d7}")
                            .on_click(CLOSE),
                    )
                    .child(
                        Node::new("div")
                            .class("modal-header")
                            .child(Node::slot(Some("header"))),
                    )
                    .child(Node::new("div").class("modal-body").child(Node::slot(None)))
                    .child(
                        Node::new("div")
                            .class("modal-footer")
                            .child(Node::slot(Some("footer"))),
                    ),
            ),
    )
}

#[derive(Default)]
/// Modal behavior; owns the Escape subscription while connected.
pub struct ModalBehavior {
    escape_listener: RefCell<Option<ListenerHandle>>,
}

impl ModalBehavior {
    /// Whether the Escape subscription is currently held.
    pub fn is_listening(&self) -> bool {
        self.escape_listener.borrow().is_some()
    }
}

impl ElementBehavior for ModalBehavior {
    fn render(&self, attributes: &AttributeMap) -> ShadowTree {
        render_tree(attributes.has("open"))
    }

    fn attribute_changed(&self, element: &Element, change: &AttributeChange) {
        if change.name != "open" {
            return;
        }
        element.render();
        let state = ModalStateChange {
            open: element.has_attribute("open"),
        };
        element.dispatch_event(
            &CustomEvent::new(STATE_CHANGE_EVENT)
                .with_detail(json!({ "open": state.open }))
                .bubbles(true)
                .composed(true),
        );
    }

    fn connected(&self, element: &Element) {
        if self.is_listening() {
            leptos::logging::debug_warn!("<{}> already holds its Escape listener", element.tag());
            return;
        }
        let Some(document) = element.owner_document() else {
            return;
        };
        let target = element.downgrade();
        let handle = document.add_keydown_listener(move |event| {
            if event.key() != ESCAPE_KEY {
                return;
            }
            if let Some(modal) = target.upgrade() {
                if modal.has_attribute("open") {
                    modal.remove_attribute("open");
                }
            }
        });
        *self.escape_listener.borrow_mut() = Some(handle);
    }

    fn disconnected(&self, _element: &Element) {
        let handle = self.escape_listener.borrow_mut().take();
        if let Some(handle) = handle {
            handle.remove();
        }
    }

    fn handle_click(&self, element: &Element, handler: &str, click: &ShadowClick) {
        match handler {
            CLOSE => element.remove_attribute("open"),
            BACKDROP if click.is_self_targeted() => element.remove_attribute("open"),
            BACKDROP => {}
            other => {
                leptos::logging::warn!("<{}> has no click handler `{other}`", element.tag());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Typed property view over a modal element.
pub struct Modal {
    element: Element,
}

impl Modal {
    /// Creates a closed modal owned by `document`.
    pub fn create(document: &Document) -> Self {
        Self {
            element: document.create_builtin(ElementKind::Modal),
        }
    }

    /// Wraps an existing element when it is a modal.
    pub fn from_element(element: Element) -> Option<Self> {
        (element.kind() == Some(ElementKind::Modal)).then_some(Self { element })
    }

    /// Underlying element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Whether the `open` attribute is present.
    pub fn open(&self) -> bool {
        self.element.has_attribute("open")
    }

    /// Adds or removes the `open` attribute.
    pub fn set_open(&self, open: bool) {
        self.element.toggle_attribute("open", open);
    }

    /// Opens the modal.
    pub fn show(&self) {
        self.set_open(true);
    }

    /// Closes the modal.
    pub fn close(&self) {
        self.set_open(false);
    }

    /// Subscribes to state-change notifications with a typed payload.
    ///
    /// Notifications whose detail does not decode are logged and skipped.
    pub fn on_state_change(&self, callback: impl Fn(ModalStateChange) + 'static) -> ListenerId {
        self.element
            .add_event_listener(STATE_CHANGE_EVENT, move |event| {
                match ModalStateChange::from_event(event) {
                    Ok(change) => callback(change),
                    Err(err) => leptos::logging::warn!("{err}"),
                }
            })
    }
}
