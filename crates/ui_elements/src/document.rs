//! Document root: body tree, head links, the process-wide keyboard channel, and element creation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::element::Element;
use crate::events::{CustomEvent, KeyboardEvent, ListenerHandle, ListenerId, ListenerSet};
use crate::fonts;
use crate::manifest::ElementKind;
use crate::registry::{ElementDefinition, ElementRegistry};

/// Event type of the keyboard channel.
pub const KEYDOWN: &str = "keydown";

#[derive(Debug, Clone, PartialEq, Eq)]
/// `<link>` entry in the document head.
pub struct HeadLink {
    /// Link relation (`preconnect`, `stylesheet`, ...).
    pub rel: String,
    /// Target URL.
    pub href: String,
    /// Optional `crossorigin` value.
    pub cross_origin: Option<String>,
}

impl HeadLink {
    /// Creates a link without a `crossorigin` value.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            cross_origin: None,
        }
    }
}

struct DocumentInner {
    registry: ElementRegistry,
    body: Element,
    head: RefCell<Vec<HeadLink>>,
    keyboard: Rc<RefCell<ListenerSet<KeyboardEvent>>>,
    listeners: RefCell<ListenerSet<CustomEvent>>,
    bootstrapped: Cell<bool>,
}

#[derive(Clone)]
/// Shared handle to a document. Clones refer to the same document.
pub struct Document {
    inner: Rc<DocumentInner>,
}

#[derive(Clone)]
/// Non-owning document handle held by elements.
pub struct WeakDocument {
    inner: Weak<DocumentInner>,
}

impl WeakDocument {
    /// Returns the document if it is still alive.
    pub fn upgrade(&self) -> Option<Document> {
        self.inner.upgrade().map(|inner| Document { inner })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with the built-in elements registered.
    pub fn new() -> Self {
        Self::with_registry(ElementRegistry::with_builtin())
    }

    /// Creates a document that constructs elements from `registry`.
    pub fn with_registry(registry: ElementRegistry) -> Self {
        let inner = Rc::new_cyclic(|weak| DocumentInner {
            registry,
            body: Element::document_body(WeakDocument {
                inner: weak.clone(),
            }),
            head: RefCell::new(Vec::new()),
            keyboard: Rc::new(RefCell::new(ListenerSet::default())),
            listeners: RefCell::new(ListenerSet::default()),
            bootstrapped: Cell::new(false),
        });
        Self { inner }
    }

    fn downgrade(&self) -> WeakDocument {
        WeakDocument {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Registry used by [`Document::create_element`].
    pub fn registry(&self) -> &ElementRegistry {
        &self.inner.registry
    }

    /// Creates an element owned by this document.
    ///
    /// Registered tags get their behavior, render scope, and initial render; other tags become
    /// plain elements.
    pub fn create_element(&self, tag: &str) -> Element {
        match self.inner.registry.get(tag) {
            Some(definition) => Element::from_definition_in(definition, self.downgrade()),
            None => {
                if tag.contains('-') {
                    leptos::logging::debug_warn!("<{tag}> is not a registered element");
                }
                Element::plain_in(tag, self.downgrade())
            }
        }
    }

    /// Creates a built-in element under whatever tag the registry assigns its kind.
    pub fn create_builtin(&self, kind: ElementKind) -> Element {
        match self.inner.registry.definition_for_kind(kind) {
            Some(definition) => Element::from_definition_in(definition, self.downgrade()),
            None => Element::from_definition_in(&ElementDefinition::builtin(kind), self.downgrade()),
        }
    }

    /// Body element; always connected.
    pub fn body(&self) -> Element {
        self.inner.body.clone()
    }

    /// Appends an element to the body, connecting its subtree.
    pub fn append_to_body(&self, element: &Element) {
        self.inner.body.append_element(element);
    }

    /// Removes a direct body child, disconnecting its subtree.
    pub fn remove_from_body(&self, element: &Element) -> bool {
        self.inner.body.remove_child(element)
    }

    /// Subscribes to the keyboard channel for as long as the returned handle lives.
    pub fn add_keydown_listener(
        &self,
        callback: impl Fn(&KeyboardEvent) + 'static,
    ) -> ListenerHandle {
        let id = self
            .inner
            .keyboard
            .borrow_mut()
            .add(KEYDOWN, Rc::new(callback));
        let keyboard = Rc::downgrade(&self.inner.keyboard);
        ListenerHandle::new(id, move |id| {
            if let Some(keyboard) = keyboard.upgrade() {
                keyboard.borrow_mut().remove(id);
            }
        })
    }

    /// Delivers a key press to every keyboard listener registered at dispatch time.
    pub fn dispatch_keydown(&self, event: &KeyboardEvent) {
        let callbacks = self.inner.keyboard.borrow().snapshot(KEYDOWN);
        for callback in callbacks {
            callback(event);
        }
    }

    /// Registers a document-level listener for bubbling element events.
    pub fn add_event_listener(
        &self,
        event_type: &str,
        callback: impl Fn(&CustomEvent) + 'static,
    ) -> ListenerId {
        self.inner
            .listeners
            .borrow_mut()
            .add(event_type, Rc::new(callback))
    }

    /// Unregisters a document-level listener.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(id)
    }

    pub(crate) fn dispatch_event(&self, event: &CustomEvent) {
        let callbacks = self.inner.listeners.borrow().snapshot(event.event_type());
        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of document-level listeners registered with [`Document::add_event_listener`].
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.inner.listeners.borrow().count(event_type)
    }

    /// Number of live keyboard channel subscriptions.
    pub fn keyboard_listener_count(&self) -> usize {
        self.inner.keyboard.borrow().count(KEYDOWN)
    }

    /// Snapshot of the head links.
    pub fn head_links(&self) -> Vec<HeadLink> {
        self.inner.head.borrow().clone()
    }

    /// Appends a head link.
    pub fn append_head_link(&self, link: HeadLink) {
        self.inner.head.borrow_mut().push(link);
    }

    /// Runs one-time document setup (web font links). Later calls do nothing.
    pub fn bootstrap(&self) {
        if self.inner.bootstrapped.replace(true) {
            return;
        }
        fonts::load_fonts(self);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("body", &self.inner.body)
            .field("head", &*self.inner.head.borrow())
            .finish()
    }
}
