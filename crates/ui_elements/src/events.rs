//! Event payloads, listener bookkeeping, and scoped listener handles.

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::shadow::NodePath;

#[derive(Debug, Clone, PartialEq)]
/// Outbound notification dispatched from an element host.
pub struct CustomEvent {
    event_type: String,
    detail: Value,
    bubbles: bool,
    composed: bool,
}

impl CustomEvent {
    /// Creates a non-bubbling event with a `null` detail.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            detail: Value::Null,
            bubbles: false,
            composed: false,
        }
    }

    /// Attaches a JSON detail payload.
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }

    /// Sets whether the event propagates to ancestor elements and the document.
    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Sets whether the event crosses the encapsulation boundary of its host.
    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }

    /// Event type name.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Raw JSON detail.
    pub fn detail(&self) -> &Value {
        &self.detail
    }

    /// Whether the event bubbles.
    pub fn is_bubbling(&self) -> bool {
        self.bubbles
    }

    /// Whether the event is composed.
    pub fn is_composed(&self) -> bool {
        self.composed
    }

    /// Decodes the detail payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`EventDetailError::Decode`] when the detail does not match `T`.
    pub fn detail_as<T: DeserializeOwned>(&self) -> Result<T, EventDetailError> {
        serde_json::from_value(self.detail.clone()).map_err(|source| EventDetailError::Decode {
            event_type: self.event_type.clone(),
            source,
        })
    }
}

#[derive(Debug, Error)]
/// Failures decoding a notification payload.
pub enum EventDetailError {
    /// The detail JSON does not match the requested type.
    #[error("`{event_type}` detail decode failed: {source}")]
    Decode {
        /// Event whose detail failed to decode.
        event_type: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Document-level key press.
pub struct KeyboardEvent {
    key: String,
}

impl KeyboardEvent {
    /// Creates a key press for the named key (`"Escape"`, `"Enter"`, ...).
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Key name.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A click travelling through an element's render tree.
pub struct ShadowClick {
    /// Node the user clicked.
    pub target: NodePath,
    /// Node whose handler is currently running.
    pub current_target: NodePath,
}

impl ShadowClick {
    /// Returns `true` when the handler node is the node that was clicked.
    pub fn is_self_targeted(&self) -> bool {
        self.target == self.current_target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identifier of a registered listener.
pub struct ListenerId(u64);

pub(crate) type Callback<E> = Rc<dyn Fn(&E)>;

struct ListenerEntry<E> {
    id: ListenerId,
    event_type: String,
    callback: Callback<E>,
}

/// Listener table shared by element hosts and the document.
pub(crate) struct ListenerSet<E> {
    next_id: u64,
    entries: Vec<ListenerEntry<E>>,
}

impl<E> Default for ListenerSet<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<E> ListenerSet<E> {
    pub(crate) fn add(&mut self, event_type: &str, callback: Callback<E>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(ListenerEntry {
            id,
            event_type: event_type.to_string(),
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Clones the callbacks for `event_type` so dispatch can run without holding a borrow.
    pub(crate) fn snapshot(&self, event_type: &str) -> Vec<Callback<E>> {
        self.entries
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .map(|entry| Rc::clone(&entry.callback))
            .collect()
    }

    pub(crate) fn count(&self, event_type: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .count()
    }
}

#[must_use = "dropping a ListenerHandle removes its listener"]
/// Scoped registration of a document listener.
///
/// [`ListenerHandle::remove`] unregisters explicitly; dropping the handle unregisters as well, so
/// a listener never outlives the scope that owns its handle.
pub struct ListenerHandle {
    id: ListenerId,
    release: Option<Box<dyn FnOnce(ListenerId)>>,
}

impl ListenerHandle {
    pub(crate) fn new(id: ListenerId, release: impl FnOnce(ListenerId) + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// Identifier of the registered listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Unregisters the listener now.
    pub fn remove(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("id", &self.id)
            .field("live", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct OpenDetail {
        open: bool,
    }

    #[test]
    fn detail_decodes_into_typed_payload() {
        let event = CustomEvent::new("modal-state-change").with_detail(json!({ "open": true }));
        assert_eq!(
            event.detail_as::<OpenDetail>().expect("decode"),
            OpenDetail { open: true }
        );
    }

    #[test]
    fn detail_mismatch_reports_event_type() {
        let event = CustomEvent::new("modal-state-change").with_detail(json!({ "open": "yes" }));
        let err = event.detail_as::<OpenDetail>().expect_err("mismatch");
        assert!(err.to_string().starts_with("`modal-state-change` detail decode failed"));
    }

    #[test]
    fn listener_set_counts_and_removes_by_type() {
        let mut set = ListenerSet::<KeyboardEvent>::default();
        let first = set.add("keydown", Rc::new(|_| {}));
        set.add("keyup", Rc::new(|_| {}));
        assert_eq!(set.count("keydown"), 1);
        assert!(set.remove(first));
        assert!(!set.remove(first));
        assert_eq!(set.count("keydown"), 0);
        assert_eq!(set.count("keyup"), 1);
    }

    #[test]
    fn handle_releases_once_on_explicit_remove_or_drop() {
        let released = Rc::new(Cell::new(0));

        let counter = Rc::clone(&released);
        let handle = ListenerHandle::new(ListenerId(7), move |_| counter.set(counter.get() + 1));
        handle.remove();
        assert_eq!(released.get(), 1);

        let counter = Rc::clone(&released);
        {
            let _handle =
                ListenerHandle::new(ListenerId(8), move |_| counter.set(counter.get() + 1));
        }
        assert_eq!(released.get(), 2);
    }
}
