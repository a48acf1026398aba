//! Scale and the long-text warning follow every text change, with no stale
//! state between changes.

use rbar_core::presentation::{is_too_long, scale};
use rbar_core::Action;
use rbar_testkit::{KioskHarness, MemoryCatalog};

#[tokio::test(start_paused = true)]
async fn every_change_recomputes_scale_and_warning() {
    let mut h = KioskHarness::new(MemoryCatalog::new());

    // Grow to 14 characters, then shrink back to empty.
    let word = "Maximilianusxy";
    let lengths: Vec<usize> = (0..=word.len()).chain((0..word.len()).rev()).collect();

    for len in lengths {
        h.act(Action::ChangeText(word[..len].to_string())).await.unwrap();
        let v = h.kiosk.view();
        assert_eq!(v.scale, scale(len), "len={len}");
        assert_eq!(v.text_too_long, is_too_long(len), "len={len}");
        assert_eq!(v.text_too_long, len > 10, "len={len}");
        assert!(!v.feedback.visible, "warning is not a feedback message");
    }
}

#[tokio::test(start_paused = true)]
async fn boundary_values_through_the_view() {
    let mut h = KioskHarness::new(MemoryCatalog::new());
    let expected = [(5, 16u8), (6, 12), (7, 11), (8, 10), (9, 8)];

    for (len, want) in expected {
        h.act(Action::ChangeText("x".repeat(len))).await.unwrap();
        assert_eq!(h.kiosk.view().scale, want, "len={len}");
        assert_eq!(h.kiosk.view().font_px, u16::from(want) * 2);
    }
}
