//! Tag registry mapping custom element names to behaviors.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::components::{badge, button, card, modal};
use crate::element::ElementBehavior;
use crate::manifest::{element_manifests, ElementKind, ElementManifest};

/// Constructor for a fresh per-instance behavior.
pub type BehaviorFactory = fn() -> Box<dyn ElementBehavior>;

#[derive(Debug, Clone)]
/// Registered element: tag, observed attributes, and behavior constructor.
pub struct ElementDefinition {
    tag: String,
    kind: Option<ElementKind>,
    observed_attributes: Vec<String>,
    factory: BehaviorFactory,
}

impl ElementDefinition {
    /// Defines a custom element outside the built-in set.
    pub fn new(
        tag: impl Into<String>,
        observed_attributes: impl IntoIterator<Item = impl Into<String>>,
        factory: BehaviorFactory,
    ) -> Self {
        Self {
            tag: tag.into(),
            kind: None,
            observed_attributes: observed_attributes.into_iter().map(Into::into).collect(),
            factory,
        }
    }

    /// Built-in definition under its default tag.
    pub fn builtin(kind: ElementKind) -> Self {
        let (tag, observed) = match kind {
            ElementKind::Badge => (badge::DEFAULT_TAG, badge::OBSERVED_ATTRIBUTES),
            ElementKind::Button => (button::DEFAULT_TAG, button::OBSERVED_ATTRIBUTES),
            ElementKind::Card => (card::DEFAULT_TAG, card::OBSERVED_ATTRIBUTES),
            ElementKind::Modal => (modal::DEFAULT_TAG, modal::OBSERVED_ATTRIBUTES),
        };
        Self {
            kind: Some(kind),
            ..Self::new(tag, observed.iter().copied(), factory_for(kind))
        }
    }

    /// Built-in definition configured by a manifest.
    pub fn from_manifest(manifest: &ElementManifest) -> Self {
        Self {
            kind: Some(manifest.kind),
            ..Self::new(
                manifest.tag.as_str(),
                manifest.observed_attributes.iter().map(String::as_str),
                factory_for(manifest.kind),
            )
        }
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Built-in kind, if this is a built-in element.
    pub fn kind(&self) -> Option<ElementKind> {
        self.kind
    }

    /// Attributes whose mutation notifies the behavior.
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed_attributes
    }

    /// Constructs a fresh behavior instance.
    pub fn construct(&self) -> Box<dyn ElementBehavior> {
        (self.factory)()
    }
}

fn factory_for(kind: ElementKind) -> BehaviorFactory {
    match kind {
        ElementKind::Badge => || -> Box<dyn ElementBehavior> { Box::new(badge::BadgeBehavior) },
        ElementKind::Button => || -> Box<dyn ElementBehavior> { Box::new(button::ButtonBehavior) },
        ElementKind::Card => || -> Box<dyn ElementBehavior> { Box::new(card::CardBehavior) },
        ElementKind::Modal => || -> Box<dyn ElementBehavior> {
            Box::new(modal::ModalBehavior::default())
        },
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Registration failures.
pub enum DefineError {
    /// The tag is not a valid custom element name.
    #[error("`{0}` is not a valid custom element name")]
    InvalidName(String),
    /// The tag is already registered.
    #[error("`{0}` has already been defined")]
    AlreadyDefined(String),
}

/// Returns `true` for lowercase ASCII names that start with a letter and contain a hyphen.
pub fn is_valid_custom_element_name(tag: &str) -> bool {
    tag.starts_with(|ch: char| ch.is_ascii_lowercase())
        && tag.contains('-')
        && tag.chars().all(|ch| {
            ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '-' | '.' | '_')
        })
}

#[derive(Debug, Clone, Default)]
/// Custom element registry consulted by [`crate::Document::create_element`].
pub struct ElementRegistry {
    definitions: BTreeMap<String, ElementDefinition>,
}

impl ElementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every element from the manifest catalog.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for manifest in element_manifests() {
            if let Err(err) = registry.define(ElementDefinition::from_manifest(&manifest)) {
                leptos::logging::warn!("built-in element registration failed: {err}");
            }
        }
        registry
    }

    /// Registers a definition.
    ///
    /// # Errors
    ///
    /// Returns [`DefineError::InvalidName`] for names that are not valid custom element names and
    /// [`DefineError::AlreadyDefined`] when the tag is taken.
    pub fn define(&mut self, definition: ElementDefinition) -> Result<(), DefineError> {
        let tag = definition.tag().to_string();
        if !is_valid_custom_element_name(&tag) {
            return Err(DefineError::InvalidName(tag));
        }
        if self.definitions.contains_key(&tag) {
            return Err(DefineError::AlreadyDefined(tag));
        }
        self.definitions.insert(tag, definition);
        Ok(())
    }

    /// Looks up a definition by tag.
    pub fn get(&self, tag: &str) -> Option<&ElementDefinition> {
        self.definitions.get(tag)
    }

    /// Looks up the definition registered for a built-in kind.
    pub fn definition_for_kind(&self, kind: ElementKind) -> Option<&ElementDefinition> {
        self.definitions
            .values()
            .find(|definition| definition.kind() == Some(kind))
    }

    /// Whether a tag is registered.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    /// Registered tags in name order.
    pub fn tags(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::attributes::AttributeMap;
    use crate::shadow::{Node, ShadowTree};

    struct Blank;

    impl ElementBehavior for Blank {
        fn render(&self, _attributes: &AttributeMap) -> ShadowTree {
            ShadowTree::new("", Node::new("div"))
        }
    }

    fn blank() -> Box<dyn ElementBehavior> {
        Box::new(Blank)
    }

    #[test]
    fn builtin_registry_defines_the_four_manifest_tags() {
        let registry = ElementRegistry::with_builtin();
        assert_eq!(
            registry.tags(),
            vec!["my-badge", "my-button", "my-card", "my-modal"]
        );
        assert_eq!(
            registry
                .definition_for_kind(ElementKind::Card)
                .map(ElementDefinition::tag),
            Some("my-card")
        );
    }

    #[test]
    fn manifests_agree_with_builtin_definitions() {
        for manifest in element_manifests() {
            let builtin = ElementDefinition::builtin(manifest.kind);
            assert_eq!(builtin.tag(), manifest.tag);
            assert_eq!(builtin.observed_attributes(), manifest.observed_attributes.as_slice());
        }
    }

    #[test]
    fn define_rejects_invalid_and_duplicate_names() {
        let mut registry = ElementRegistry::new();
        assert_eq!(
            registry.define(ElementDefinition::new("Badge", ["x"], blank)),
            Err(DefineError::InvalidName("Badge".to_string()))
        );
        assert_eq!(
            registry.define(ElementDefinition::new("nohyphen", Vec::<String>::new(), blank)),
            Err(DefineError::InvalidName("nohyphen".to_string()))
        );
        assert_eq!(
            registry.define(ElementDefinition::new("x-blank", ["a"], blank)),
            Ok(())
        );
        assert_eq!(
            registry.define(ElementDefinition::new("x-blank", ["b"], blank)),
            Err(DefineError::AlreadyDefined("x-blank".to_string()))
        );
        assert!(registry.is_defined("x-blank"));
        assert_eq!(registry.get("x-blank").map(|d| d.kind()), Some(None));
    }
}
