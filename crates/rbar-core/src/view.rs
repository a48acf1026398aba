//! Read-only projection of the kiosk for a front end to render.

use rbar_schemas::Drink;

use crate::feedback::Feedback;
use crate::logo::CatalogRef;
use crate::presentation;
use crate::workflow::{Kiosk, Phase};

/// Drop-zone caption when no file is active.
pub const DROP_ZONE_PLACEHOLDER: &str = "Drop your SVG here";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkTile {
    pub drink: Drink,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryTile {
    pub reference: CatalogRef,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskView {
    pub phase: Phase,
    pub drinks: Vec<DrinkTile>,
    pub gallery: Vec<GalleryTile>,
    pub drop_zone_label: String,
    pub text: String,
    pub scale: u8,
    pub font_px: u16,
    /// Persistent, recomputed from `text`; independent of `feedback`.
    pub text_too_long: bool,
    pub feedback: Feedback,
    /// Dim the page while feedback is up.
    pub overlay: bool,
    pub submittable: bool,
}

impl KioskView {
    pub fn project(kiosk: &Kiosk) -> Self {
        let draft = kiosk.draft();
        let selected_ref = draft.logo().catalog_selection();
        let len = draft.text_len();
        let feedback = kiosk.feedback().clone();

        Self {
            phase: kiosk.phase(),
            drinks: Drink::ALL
                .iter()
                .map(|d| DrinkTile {
                    drink: *d,
                    selected: draft.drink() == Some(*d),
                })
                .collect(),
            gallery: kiosk
                .gallery()
                .iter()
                .map(|r| GalleryTile {
                    reference: r.clone(),
                    highlighted: selected_ref == Some(r),
                })
                .collect(),
            drop_zone_label: draft
                .logo()
                .active_file()
                .map(|f| f.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DROP_ZONE_PLACEHOLDER.to_string()),
            text: draft.text().to_string(),
            scale: presentation::scale(len),
            font_px: presentation::font_px(len),
            text_too_long: presentation::is_too_long(len),
            overlay: feedback.visible,
            feedback,
            submittable: draft.is_submittable(),
        }
    }

    /// Plain-text rendering for terminal front ends.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let drinks: Vec<String> = self
            .drinks
            .iter()
            .map(|t| {
                if t.selected {
                    format!("[*{}]", t.drink)
                } else {
                    format!("[ {}]", t.drink)
                }
            })
            .collect();
        out.push_str(&format!("drinks : {}\n", drinks.join(" ")));

        if self.gallery.is_empty() {
            out.push_str("gallery: (empty)\n");
        } else {
            for (i, g) in self.gallery.iter().enumerate() {
                let mark = if g.highlighted { '*' } else { ' ' };
                out.push_str(&format!("gallery: {mark}{:>2} {}\n", i + 1, g.reference));
            }
        }

        out.push_str(&format!("logo   : {}\n", self.drop_zone_label));
        out.push_str(&format!("text   : \"{}\" ({}px)\n", self.text, self.font_px));
        if self.text_too_long {
            out.push_str("         Warning: Text is too long!\n");
        }
        if self.feedback.visible {
            let tag = match self.feedback.severity {
                crate::feedback::Severity::Success => "ok",
                crate::feedback::Severity::Error => "error",
            };
            out.push_str(&format!(">> [{tag}] {}\n", self.feedback.message));
        }
        out.push_str(&format!("phase  : {}\n", self.phase.as_str()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EmptyCatalog;
    use crate::error::SubmitError;
    use crate::logo::{DropEvent, LogoFile};
    use crate::provider::{OrderEndpoint, Utf8LogoReader};
    use crate::workflow::{Action, KioskDeps, KioskOptions};
    use async_trait::async_trait;
    use rbar_schemas::{OrderPayload, OrderReceipt};
    use std::sync::Arc;

    struct Never;

    #[async_trait]
    impl OrderEndpoint for Never {
        fn name(&self) -> &'static str {
            "never"
        }

        async fn submit_order(&self, _payload: &OrderPayload) -> Result<OrderReceipt, SubmitError> {
            Err(SubmitError::Transport("unused".into()))
        }
    }

    fn kiosk() -> Kiosk {
        let (k, _rx) = Kiosk::new(
            KioskDeps {
                endpoint: Arc::new(Never),
                catalog: Arc::new(EmptyCatalog),
                reader: Arc::new(Utf8LogoReader),
            },
            KioskOptions::default(),
        );
        k
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_view_shows_placeholder_and_no_selection() {
        let v = kiosk().view();
        assert_eq!(v.drop_zone_label, DROP_ZONE_PLACEHOLDER);
        assert!(v.drinks.iter().all(|t| !t.selected));
        assert_eq!(v.font_px, 32);
        assert!(!v.overlay);
        assert!(!v.submittable);
    }

    #[tokio::test(start_paused = true)]
    async fn view_tracks_text_drink_and_file() {
        let mut k = kiosk();
        k.handle(Action::SelectDrink(Drink::Three)).await.unwrap();
        k.handle(Action::ChangeText("Bartholomew".into())).await.unwrap();
        k.handle(Action::DropLogo(DropEvent::single(LogoFile::svg("crest.svg", "<svg/>"))))
            .await
            .unwrap();

        let v = k.view();
        assert!(v.drinks[2].selected);
        assert_eq!(v.drinks.iter().filter(|t| t.selected).count(), 1);
        assert_eq!(v.drop_zone_label, "crest.svg");
        assert_eq!(v.scale, 8);
        assert!(v.text_too_long);
        assert!(v.overlay);
        assert!(v.submittable);

        let rendered = v.render_text();
        assert!(rendered.contains("[*Drink 3]"));
        assert!(rendered.contains("Warning: Text is too long!"));
        assert!(rendered.contains("SVG file selected"));
    }
}
