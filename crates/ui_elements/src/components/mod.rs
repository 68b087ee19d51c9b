//! Built-in badge, button, card, and modal elements.
//!
//! Each module pairs a stateless [`crate::ElementBehavior`] (pure render from attributes) with a
//! typed property view that reads and writes through the host's attributes.

pub mod badge;
pub mod button;
pub mod card;
pub mod modal;

pub use badge::{Badge, BadgeColor, BadgeVariant};
pub use button::{Button, ButtonVariant};
pub use card::Card;
pub use modal::{Modal, ModalStateChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Size tokens shared by badges and buttons.
pub enum Size {
    /// Dense control.
    Small,
    /// Default control.
    Medium,
    /// Large control.
    Large,
}

impl Default for Size {
    fn default() -> Self {
        Self::Medium
    }
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Class token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}
