//! Leptos rendition of the badge, button, card, and modal elements.
//!
//! Components reuse the class lists, style tables, and modal constants from [`ui_elements`] and
//! expose the same `data-ui-*` wrapper contract as the rest of the shell primitives. Mount
//! [`ElementStyles`] once near the app root; it links the web font through [`inject_web_fonts`],
//! which is a no-op when the font stylesheet is already linked.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod fonts;
mod primitives;
mod styles;

pub use fonts::inject_web_fonts;
pub use primitives::{Badge, Button, Card, Modal};
pub use styles::{element_styles, host_scope, scope_stylesheet, ElementStyles, HOST_KINDS};
pub use ui_elements::{BadgeColor, BadgeVariant, ButtonVariant, ModalStateChange, Size};

/// Convenience imports for application crates.
pub mod prelude {
    pub use crate::{
        inject_web_fonts, Badge, BadgeColor, BadgeVariant, Button, ButtonVariant, Card,
        ElementStyles, Modal, ModalStateChange, Size,
    };
}
