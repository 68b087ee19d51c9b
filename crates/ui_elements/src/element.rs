//! Element hosts: attribute reflection, render scheduling, light-tree content, and event routing.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::attributes::{AttributeChange, AttributeMap};
use crate::document::{Document, WeakDocument};
use crate::events::{CustomEvent, ListenerId, ListenerSet, ShadowClick};
use crate::manifest::ElementKind;
use crate::registry::ElementDefinition;
use crate::shadow::{NodePath, ShadowTree};

/// Per-instance behavior of a custom element.
///
/// Hosts call these hooks synchronously and never hold an internal borrow while doing so, so a
/// behavior may freely read and mutate the element it is handed.
pub trait ElementBehavior {
    /// Pure render of the encapsulated tree from the current attributes.
    fn render(&self, attributes: &AttributeMap) -> ShadowTree;

    /// Called for every mutation of an observed attribute. Re-renders by default.
    fn attribute_changed(&self, element: &Element, _change: &AttributeChange) {
        element.render();
    }

    /// Called when the element becomes connected to its document.
    fn connected(&self, _element: &Element) {}

    /// Called when the element is disconnected from its document.
    fn disconnected(&self, _element: &Element) {}

    /// Called for each node carrying a click handler on the bubbling path of a shadow click.
    fn handle_click(&self, element: &Element, handler: &str, _click: &ShadowClick) {
        leptos::logging::warn!("<{}> has no click handler `{handler}`", element.tag());
    }
}

#[derive(Clone)]
/// Projected light-tree content of a host element.
pub enum LightNode {
    /// Text content, always assigned to the default region.
    Text(String),
    /// Nested element, assigned to the region named by its `slot` attribute.
    Element(Element),
}

impl LightNode {
    /// Text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element(element) => element.text_content(),
        }
    }

    fn slot_name(&self) -> Option<String> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => element
                .get_attribute("slot")
                .filter(|name| !name.is_empty()),
        }
    }
}

impl fmt::Debug for LightNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Element(element) => f.debug_tuple("Element").field(element).finish(),
        }
    }
}

struct ElementInner {
    tag: String,
    kind: Option<ElementKind>,
    observed: Vec<String>,
    behavior: Option<Box<dyn ElementBehavior>>,
    attributes: RefCell<AttributeMap>,
    shadow_root: RefCell<Option<ShadowTree>>,
    render_count: Cell<u64>,
    children: RefCell<Vec<LightNode>>,
    parent: RefCell<Option<Weak<ElementInner>>>,
    owner: RefCell<Option<WeakDocument>>,
    connected: Cell<bool>,
    listeners: RefCell<ListenerSet<CustomEvent>>,
}

#[derive(Clone)]
/// Shared handle to one element host. Clones refer to the same element.
pub struct Element {
    inner: Rc<ElementInner>,
}

#[derive(Clone)]
/// Non-owning element handle used by long-lived callbacks.
pub struct WeakElement {
    inner: Weak<ElementInner>,
}

impl WeakElement {
    /// Returns the element if it is still alive.
    pub fn upgrade(&self) -> Option<Element> {
        self.inner.upgrade().map(|inner| Element { inner })
    }
}

impl Element {
    fn build(
        tag: &str,
        kind: Option<ElementKind>,
        observed: Vec<String>,
        behavior: Option<Box<dyn ElementBehavior>>,
        owner: Option<WeakDocument>,
    ) -> Self {
        let element = Self {
            inner: Rc::new(ElementInner {
                tag: tag.to_string(),
                kind,
                observed,
                behavior,
                attributes: RefCell::new(AttributeMap::new()),
                shadow_root: RefCell::new(None),
                render_count: Cell::new(0),
                children: RefCell::new(Vec::new()),
                parent: RefCell::new(None),
                owner: RefCell::new(owner),
                connected: Cell::new(false),
                listeners: RefCell::new(ListenerSet::default()),
            }),
        };
        element.attach_shadow();
        element
    }

    /// Constructs an element from a registered definition: attaches its render scope and renders
    /// once.
    pub fn from_definition(definition: &ElementDefinition) -> Self {
        Self::build(
            definition.tag(),
            definition.kind(),
            definition.observed_attributes().to_vec(),
            Some(definition.construct()),
            None,
        )
    }

    pub(crate) fn from_definition_in(definition: &ElementDefinition, owner: WeakDocument) -> Self {
        let element = Self::from_definition(definition);
        *element.inner.owner.borrow_mut() = Some(owner);
        element
    }

    /// Constructs a plain element with no behavior and no render scope.
    pub fn plain(tag: &str) -> Self {
        Self::build(tag, None, Vec::new(), None, None)
    }

    pub(crate) fn plain_in(tag: &str, owner: WeakDocument) -> Self {
        Self::build(tag, None, Vec::new(), None, Some(owner))
    }

    pub(crate) fn document_body(owner: WeakDocument) -> Self {
        let body = Self::plain_in("body", owner);
        body.inner.connected.set(true);
        body
    }

    fn attach_shadow(&self) {
        let Some(behavior) = self.inner.behavior.as_deref() else {
            return;
        };
        let tree = behavior.render(&self.inner.attributes.borrow());
        *self.inner.shadow_root.borrow_mut() = Some(tree);
        self.inner.render_count.set(1);
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Built-in kind backing this element, if any.
    pub fn kind(&self) -> Option<ElementKind> {
        self.inner.kind
    }

    /// Attributes whose mutation notifies the behavior.
    pub fn observed_attributes(&self) -> &[String] {
        &self.inner.observed
    }

    /// Returns a non-owning handle.
    pub fn downgrade(&self) -> WeakElement {
        WeakElement {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns an attribute value.
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.borrow().get(name).map(str::to_string)
    }

    /// Returns an attribute value, falling back to `default` when absent or empty.
    pub fn attribute_or(&self, name: &str, default: &str) -> String {
        self.inner
            .attributes
            .borrow()
            .get_or(name, default)
            .to_string()
    }

    /// Presence check.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.attributes.borrow().has(name)
    }

    /// Snapshot of every attribute.
    pub fn attributes(&self) -> AttributeMap {
        self.inner.attributes.borrow().clone()
    }

    /// Sets an attribute. Observed attributes notify the behavior even when the value is unchanged.
    pub fn set_attribute(&self, name: &str, value: &str) {
        let old_value = self.inner.attributes.borrow_mut().set(name, value);
        self.attribute_changed(AttributeChange {
            name: name.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });
    }

    /// Removes an attribute. Removing an absent attribute is a no-op.
    pub fn remove_attribute(&self, name: &str) {
        let removed = self.inner.attributes.borrow_mut().remove(name);
        if let Some(old_value) = removed {
            self.attribute_changed(AttributeChange {
                name: name.to_string(),
                old_value: Some(old_value),
                new_value: None,
            });
        }
    }

    /// Sets or removes a presence attribute.
    pub fn toggle_attribute(&self, name: &str, present: bool) {
        if present {
            self.set_attribute(name, "");
        } else {
            self.remove_attribute(name);
        }
    }

    fn attribute_changed(&self, change: AttributeChange) {
        if !self.inner.observed.iter().any(|name| *name == change.name) {
            return;
        }
        if let Some(behavior) = self.inner.behavior.as_deref() {
            behavior.attribute_changed(self, &change);
        }
    }

    /// Replaces the render tree with a fresh render. No-op without a render scope.
    pub fn render(&self) {
        let Some(behavior) = self.inner.behavior.as_deref() else {
            return;
        };
        if self.inner.shadow_root.borrow().is_none() {
            return;
        }
        let tree = behavior.render(&self.inner.attributes.borrow());
        *self.inner.shadow_root.borrow_mut() = Some(tree);
        self.inner
            .render_count
            .set(self.inner.render_count.get() + 1);
    }

    /// Current render tree, if the element has a render scope.
    pub fn shadow_root(&self) -> Option<ShadowTree> {
        self.inner.shadow_root.borrow().clone()
    }

    /// Number of completed renders, including the construction render.
    pub fn render_count(&self) -> u64 {
        self.inner.render_count.get()
    }

    /// Appends projected content. Elements move from their previous parent.
    ///
    /// Appending an element into its own subtree is refused and logged.
    pub fn append_child(&self, child: LightNode) {
        if let LightNode::Element(element) = &child {
            if self.is_inclusive_descendant_of(element) {
                leptos::logging::warn!(
                    "refusing to append <{}> into its own subtree under <{}>",
                    element.tag(),
                    self.tag()
                );
                return;
            }
            if let Some(previous) = element.parent() {
                previous.remove_child(element);
            }
            *element.inner.parent.borrow_mut() = Some(Rc::downgrade(&self.inner));
            let owner = self.inner.owner.borrow().clone();
            if let Some(owner) = owner {
                element.adopt_subtree(&owner);
            }
        }
        self.inner.children.borrow_mut().push(child.clone());
        if let LightNode::Element(element) = child {
            if self.is_connected() {
                element.connect_subtree();
            }
        }
    }

    fn is_inclusive_descendant_of(&self, candidate: &Element) -> bool {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.ptr_eq(candidate) {
                return true;
            }
            current = element.parent();
        }
        false
    }

    /// Gives every unowned element of this subtree an owning document.
    fn adopt_subtree(&self, owner: &WeakDocument) {
        if self.inner.owner.borrow().is_none() {
            *self.inner.owner.borrow_mut() = Some(owner.clone());
        }
        for node in self.child_nodes() {
            if let LightNode::Element(child) = node {
                child.adopt_subtree(owner);
            }
        }
    }

    /// Appends a text node.
    pub fn append_text(&self, text: impl Into<String>) {
        self.append_child(LightNode::Text(text.into()));
    }

    /// Appends a nested element.
    pub fn append_element(&self, element: &Element) {
        self.append_child(LightNode::Element(element.clone()));
    }

    /// Removes a nested element, disconnecting it if this element is connected.
    pub fn remove_child(&self, child: &Element) -> bool {
        let removed = {
            let mut children = self.inner.children.borrow_mut();
            let before = children.len();
            children.retain(|node| !matches!(node, LightNode::Element(el) if el.ptr_eq(child)));
            children.len() != before
        };
        if !removed {
            return false;
        }
        *child.inner.parent.borrow_mut() = None;
        if child.is_connected() {
            child.disconnect_subtree();
        }
        true
    }

    /// Detaches this element from its parent.
    pub fn remove(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.remove_child(self),
            None => false,
        }
    }

    /// Replaces all projected content with a single text node.
    pub fn set_text_content(&self, text: impl Into<String>) {
        let previous: Vec<Element> = self
            .child_nodes()
            .into_iter()
            .filter_map(|node| match node {
                LightNode::Element(element) => Some(element),
                LightNode::Text(_) => None,
            })
            .collect();
        for element in &previous {
            self.remove_child(element);
        }
        self.inner.children.borrow_mut().clear();
        self.append_text(text);
    }

    /// Snapshot of projected content.
    pub fn child_nodes(&self) -> Vec<LightNode> {
        self.inner.children.borrow().clone()
    }

    /// Concatenated text of the projected content.
    pub fn text_content(&self) -> String {
        self.child_nodes()
            .iter()
            .map(LightNode::text_content)
            .collect()
    }

    /// Projected nodes assigned to a region; `None` is the default region.
    ///
    /// Returns nothing for regions the render tree does not declare.
    pub fn assigned_nodes(&self, slot: Option<&str>) -> Vec<LightNode> {
        let declared = self
            .shadow_root()
            .map(|tree| {
                tree.slot_names()
                    .iter()
                    .any(|name| name.as_deref() == slot)
            })
            .unwrap_or(false);
        if !declared {
            return Vec::new();
        }
        self.child_nodes()
            .into_iter()
            .filter(|node| node.slot_name().as_deref() == slot)
            .collect()
    }

    /// Parent element, if any.
    pub fn parent(&self) -> Option<Element> {
        self.inner
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Element { inner })
    }

    /// Document that created this element, if it is still alive.
    pub fn owner_document(&self) -> Option<Document> {
        self.inner
            .owner
            .borrow()
            .as_ref()
            .and_then(WeakDocument::upgrade)
    }

    /// Whether the element is attached to its document's body.
    pub fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    pub(crate) fn connect_subtree(&self) {
        if self.is_connected() {
            return;
        }
        self.inner.connected.set(true);
        if let Some(behavior) = self.inner.behavior.as_deref() {
            behavior.connected(self);
        }
        for node in self.child_nodes() {
            if let LightNode::Element(child) = node {
                child.connect_subtree();
            }
        }
    }

    pub(crate) fn disconnect_subtree(&self) {
        if !self.is_connected() {
            return;
        }
        self.inner.connected.set(false);
        if let Some(behavior) = self.inner.behavior.as_deref() {
            behavior.disconnected(self);
        }
        for node in self.child_nodes() {
            if let LightNode::Element(child) = node {
                child.disconnect_subtree();
            }
        }
    }

    /// Registers a listener for events of `event_type` dispatched on or bubbling through this
    /// element.
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

    /// Unregisters a listener. Returns `false` when it was not registered.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(id)
    }

    /// Number of listeners registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.inner.listeners.borrow().count(event_type)
    }

    /// Dispatches an event from this host.
    ///
    /// Listeners on this element run first; bubbling events continue through each ancestor and,
    /// when the element is connected, reach the document.
    pub fn dispatch_event(&self, event: &CustomEvent) {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            let callbacks = element
                .inner
                .listeners
                .borrow()
                .snapshot(event.event_type());
            for callback in callbacks {
                callback(event);
            }
            if !event.is_bubbling() {
                return;
            }
            current = element.parent();
        }
        if self.is_connected() {
            if let Some(document) = self.owner_document() {
                document.dispatch_event(event);
            }
        }
    }

    /// Simulates a user click on a node of the render tree.
    ///
    /// The click bubbles from `target` to the root; every node with a click handler is offered the
    /// click. Returns `false` when there is no render tree or the target does not exist.
    pub fn dispatch_shadow_click(&self, target: &NodePath) -> bool {
        let Some(behavior) = self.inner.behavior.as_deref() else {
            return false;
        };
        let handlers: Vec<(NodePath, &'static str)> = {
            let shadow = self.inner.shadow_root.borrow();
            let Some(tree) = shadow.as_ref() else {
                return false;
            };
            if tree.node(target).is_none() {
                return false;
            }
            target
                .ancestors_inclusive()
                .into_iter()
                .filter_map(|path| {
                    let handler = tree.node(&path)?.click_handler()?;
                    Some((path, handler))
                })
                .collect()
        };
        for (current_target, handler) in handlers {
            behavior.handle_click(
                self,
                handler,
                &ShadowClick {
                    target: target.clone(),
                    current_target,
                },
            );
        }
        true
    }

    /// Clicks the first render-tree node matching `selector`.
    pub fn click_in_shadow(&self, selector: &str) -> bool {
        let target = self
            .inner
            .shadow_root
            .borrow()
            .as_ref()
            .and_then(|tree| tree.query(selector));
        match target {
            Some(path) => self.dispatch_shadow_click(&path),
            None => false,
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.inner.tag)
            .field("attributes", &*self.inner.attributes.borrow())
            .field("connected", &self.inner.connected.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::shadow::Node;

    #[derive(Default)]
    struct Probe {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ElementBehavior for Probe {
        fn render(&self, attributes: &AttributeMap) -> ShadowTree {
            ShadowTree::new(
                "",
                Node::new("div")
                    .class(attributes.get_or("tone", "plain"))
                    .on_click("outer")
                    .child(Node::new("span").class("inner").on_click("inner"))
                    .child(Node::slot(None))
                    .child(Node::slot(Some("aside"))),
            )
        }

        fn attribute_changed(&self, element: &Element, change: &AttributeChange) {
            self.log.borrow_mut().push(format!(
                "{}:{:?}->{:?}",
                change.name, change.old_value, change.new_value
            ));
            element.render();
        }

        fn connected(&self, _element: &Element) {
            self.log.borrow_mut().push("connected".to_string());
        }

        fn disconnected(&self, _element: &Element) {
            self.log.borrow_mut().push("disconnected".to_string());
        }

        fn handle_click(&self, _element: &Element, handler: &str, click: &ShadowClick) {
            self.log
                .borrow_mut()
                .push(format!("{handler}:{}", click.is_self_targeted()));
        }
    }

    fn probe_element(log: &Rc<RefCell<Vec<String>>>) -> Element {
        Element::build(
            "x-probe",
            None,
            vec!["tone".to_string()],
            Some(Box::new(Probe {
                log: Rc::clone(log),
            })),
            None,
        )
    }

    #[test]
    fn construction_renders_once_and_observed_mutations_rerender() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let element = probe_element(&log);
        assert_eq!(element.render_count(), 1);

        element.set_attribute("tone", "loud");
        element.set_attribute("tone", "loud");
        element.set_attribute("unobserved", "x");
        element.remove_attribute("missing");

        assert_eq!(element.render_count(), 3);
        assert_eq!(
            *log.borrow(),
            vec![
                "tone:None->Some(\"loud\")".to_string(),
                "tone:Some(\"loud\")->Some(\"loud\")".to_string(),
            ]
        );
        assert!(element
            .shadow_root()
            .expect("shadow")
            .root()
            .has_class("loud"));
    }

    #[test]
    fn plain_elements_have_no_render_scope_and_render_is_a_no_op() {
        let element = Element::plain("div");
        element.render();
        assert!(element.shadow_root().is_none());
        assert_eq!(element.render_count(), 0);
        assert!(!element.click_in_shadow("div"));
    }

    #[test]
    fn shadow_clicks_bubble_with_target_and_current_target() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let element = probe_element(&log);

        assert!(element.click_in_shadow(".inner"));
        assert!(element.dispatch_shadow_click(&NodePath::root()));
        assert!(!element.dispatch_shadow_click(&NodePath::root().child(9)));

        assert_eq!(
            *log.borrow(),
            vec![
                "inner:true".to_string(),
                "outer:false".to_string(),
                "outer:true".to_string(),
            ]
        );
    }

    #[test]
    fn bubbling_events_reach_ancestors_and_non_bubbling_stop_at_target() {
        let container = Element::plain("div");
        let child = Element::plain("span");
        container.append_element(&child);

        let seen = Rc::new(RefCell::new(Vec::new()));
        for (element, label) in [(&container, "container"), (&child, "child")] {
            let seen = Rc::clone(&seen);
            element.add_event_listener("ping", move |_| seen.borrow_mut().push(label));
        }

        child.dispatch_event(&CustomEvent::new("ping").bubbles(true));
        child.dispatch_event(&CustomEvent::new("ping"));

        assert_eq!(*seen.borrow(), vec!["child", "container", "child"]);
    }

    #[test]
    fn assigned_nodes_follow_slot_attribute_and_declared_regions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let host = probe_element(&log);
        let aside = Element::plain("div");
        aside.set_attribute("slot", "aside");
        aside.append_text("side");
        let stray = Element::plain("div");
        stray.set_attribute("slot", "nowhere");

        host.append_text("main");
        host.append_element(&aside);
        host.append_element(&stray);

        let default: Vec<_> = host
            .assigned_nodes(None)
            .iter()
            .map(LightNode::text_content)
            .collect();
        assert_eq!(default, vec!["main".to_string()]);
        assert_eq!(host.assigned_nodes(Some("aside")).len(), 1);
        assert!(host.assigned_nodes(Some("nowhere")).is_empty());
        assert_eq!(host.text_content(), "mainside");
    }

    #[test]
    fn append_moves_element_between_parents() {
        let first = Element::plain("div");
        let second = Element::plain("div");
        let child = Element::plain("span");

        first.append_element(&child);
        second.append_element(&child);

        assert!(first.child_nodes().is_empty());
        assert_eq!(second.child_nodes().len(), 1);
        assert_eq!(child.parent(), Some(second));
    }

    #[test]
    fn appending_an_ancestor_or_itself_is_refused() {
        let outer = Element::plain("div");
        let inner = Element::plain("section");
        outer.append_element(&inner);
        inner.append_text("leaf");

        inner.append_element(&outer);
        outer.append_element(&outer);

        assert!(outer.parent().is_none());
        assert_eq!(inner.parent(), Some(outer.clone()));
        assert_eq!(outer.child_nodes().len(), 1);
        assert_eq!(outer.text_content(), "leaf");
    }

    #[test]
    fn set_text_content_replaces_projected_content() {
        let host = Element::plain("div");
        let child = Element::plain("span");
        host.append_element(&child);
        host.set_text_content("Badge Text");

        assert_eq!(host.text_content(), "Badge Text");
        assert!(child.parent().is_none());
    }
}
