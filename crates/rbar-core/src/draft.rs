//! The in-progress order.

use rbar_schemas::Drink;

use crate::logo::{LogoFile, LogoSource};
use crate::presentation;

/// Drink, logo and text as the user has composed them so far.
///
/// Display scale and the long-text warning are derived from `text` on every
/// read and have no storage of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    drink: Option<Drink>,
    logo: LogoSource,
    text: String,
}

/// Immutable copy of a submittable draft, handed to the submit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSnapshot {
    pub drink: Option<Drink>,
    pub logo: LogoFile,
    pub text: String,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drink(&self) -> Option<Drink> {
        self.drink
    }

    pub fn logo(&self) -> &LogoSource {
        &self.logo
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces any previous selection.
    pub fn select_drink(&mut self, drink: Drink) {
        self.drink = Some(drink);
    }

    /// Replaces whichever logo origin was active.
    pub fn set_logo(&mut self, logo: LogoSource) {
        self.logo = logo;
    }

    pub fn clear_logo(&mut self) {
        self.logo = LogoSource::None;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text_len(&self) -> usize {
        presentation::text_len(&self.text)
    }

    pub fn scale(&self) -> u8 {
        presentation::scale(self.text_len())
    }

    pub fn is_text_too_long(&self) -> bool {
        presentation::is_too_long(self.text_len())
    }

    /// A logo is present and the text is non-empty. The drink is optional.
    pub fn is_submittable(&self) -> bool {
        !self.logo.is_none() && !self.text.is_empty()
    }

    pub fn snapshot(&self) -> Option<DraftSnapshot> {
        if !self.is_submittable() {
            return None;
        }
        let logo = self.logo.active_file()?.clone();
        Some(DraftSnapshot {
            drink: self.drink,
            logo,
            text: self.text.clone(),
        })
    }

    /// Back to the session-start state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::CatalogRef;

    fn svg() -> LogoFile {
        LogoFile::svg("owl.svg", "<svg/>")
    }

    #[test]
    fn new_draft_is_empty_and_not_submittable() {
        let d = OrderDraft::new();
        assert!(d.is_empty());
        assert!(!d.is_submittable());
        assert_eq!(d.snapshot(), None);
        assert_eq!(d.scale(), 16);
    }

    #[test]
    fn submittable_needs_logo_and_text_but_not_drink() {
        let mut d = OrderDraft::new();
        d.set_text("Ada");
        assert!(!d.is_submittable());

        d.set_logo(LogoSource::Upload(svg()));
        assert!(d.is_submittable());

        let snap = d.snapshot().unwrap();
        assert_eq!(snap.drink, None);
        assert_eq!(snap.text, "Ada");
        assert_eq!(snap.logo, svg());

        d.set_text("");
        assert!(!d.is_submittable());
    }

    #[test]
    fn selecting_a_drink_replaces_the_previous_one() {
        let mut d = OrderDraft::new();
        d.select_drink(Drink::Two);
        d.select_drink(Drink::Four);
        assert_eq!(d.drink(), Some(Drink::Four));
    }

    #[test]
    fn derived_state_follows_every_text_change() {
        let mut d = OrderDraft::new();
        d.set_text("abcdefghijk");
        assert_eq!(d.scale(), 8);
        assert!(d.is_text_too_long());

        d.set_text("abcdef");
        assert_eq!(d.scale(), 12);
        assert!(!d.is_text_too_long());
    }

    #[test]
    fn reset_clears_every_field() {
        let mut d = OrderDraft::new();
        d.select_drink(Drink::One);
        d.set_text("Grace");
        d.set_logo(LogoSource::Catalog {
            reference: CatalogRef::new("/gallery/owl.svg"),
            file: svg(),
        });

        d.reset();
        assert!(d.is_empty());
        assert_eq!(d.drink(), None);
        assert!(d.logo().is_none());
        assert_eq!(d.text(), "");
    }
}
