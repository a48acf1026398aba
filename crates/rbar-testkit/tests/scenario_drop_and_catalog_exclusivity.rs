//! Drop-zone acceptance rules and mutual exclusivity of logo origins.

use rbar_core::workflow::{MSG_DROP_ACCEPTED, MSG_DROP_REJECTED};
use rbar_core::{Action, CatalogRef, Drink, DropEvent, LogoFile, LogoSource, Phase, Severity};
use rbar_testkit::{KioskHarness, MemoryCatalog};

const OWL: &str = "<svg id=\"owl\"/>";

fn gallery() -> MemoryCatalog {
    MemoryCatalog::new()
        .with_entry("/gallery/owl.svg", OWL)
        .with_entry("/gallery/bear.svg", "<svg id=\"bear\"/>")
}

#[tokio::test(start_paused = true)]
async fn dropping_svg_sets_it_active_and_clears_catalog_selection() {
    let mut h = KioskHarness::new(gallery());
    h.act(Action::SelectLogoCatalog(CatalogRef::new("/gallery/owl.svg")))
        .await
        .unwrap();
    assert!(h.kiosk.draft().logo().catalog_selection().is_some());

    let dropped = LogoFile::svg("crest.svg", "<svg id=\"crest\"/>");
    h.act(Action::DropLogo(DropEvent::single(dropped.clone())))
        .await
        .unwrap();

    assert_eq!(h.kiosk.draft().logo(), &LogoSource::Upload(dropped));
    assert!(h.kiosk.draft().logo().catalog_selection().is_none());
    assert!(h.kiosk.view().gallery.iter().all(|g| !g.highlighted));

    let fb = h.kiosk.feedback();
    assert_eq!(fb.message, MSG_DROP_ACCEPTED);
    assert_eq!(fb.severity, Severity::Success);
    assert_eq!(h.kiosk.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn dropping_other_type_clears_active_file_and_errors() {
    let mut h = KioskHarness::new(gallery());
    h.act(Action::DropLogo(DropEvent::single(LogoFile::svg("crest.svg", "<svg/>"))))
        .await
        .unwrap();
    assert!(!h.kiosk.draft().logo().is_none());

    h.act(Action::DropLogo(DropEvent::single(LogoFile::new(
        "photo.png",
        "image/png",
        vec![0x89u8, b'P', b'N', b'G'],
    ))))
    .await
    .unwrap();

    assert!(h.kiosk.draft().logo().is_none());
    let fb = h.kiosk.feedback();
    assert_eq!(fb.message, MSG_DROP_REJECTED);
    assert_eq!(fb.severity, Severity::Error);
}

#[tokio::test(start_paused = true)]
async fn drop_without_file_is_rejected_without_panicking() {
    let mut h = KioskHarness::new(gallery());
    h.act(Action::SelectLogoCatalog(CatalogRef::new("/gallery/bear.svg")))
        .await
        .unwrap();

    h.act(Action::DropLogo(DropEvent::empty())).await.unwrap();

    assert!(h.kiosk.draft().logo().is_none());
    assert_eq!(h.kiosk.feedback().message, MSG_DROP_REJECTED);
}

#[tokio::test(start_paused = true)]
async fn any_sequence_of_selections_leaves_one_origin() {
    let mut h = KioskHarness::new(gallery());
    let picked = LogoFile::new("any.bin", "application/octet-stream", vec![1u8, 2, 3]);

    h.act(Action::SelectLogoFile(picked.clone())).await.unwrap();
    h.act(Action::SelectLogoCatalog(CatalogRef::new("/gallery/owl.svg")))
        .await
        .unwrap();
    match h.kiosk.draft().logo() {
        LogoSource::Catalog { reference, file } => {
            assert_eq!(reference.as_str(), "/gallery/owl.svg");
            assert_eq!(&file.bytes[..], OWL.as_bytes());
        }
        other => panic!("expected catalog logo, got {other:?}"),
    }

    // Picker skips the type check by default.
    h.act(Action::SelectLogoFile(picked.clone())).await.unwrap();
    assert_eq!(h.kiosk.draft().logo(), &LogoSource::Upload(picked));
    assert!(h.kiosk.view().gallery.iter().all(|g| !g.highlighted));
}

#[tokio::test(start_paused = true)]
async fn failed_catalog_fetch_leaves_logo_unchanged_and_silent() {
    let catalog = gallery().with_failing("/gallery/broken.svg");
    let mut h = KioskHarness::new(catalog);

    // Picked, not dropped: no notice on screen, so nothing else can reset.
    let picked = LogoFile::svg("crest.svg", "<svg/>");
    h.act(Action::SelectLogoFile(picked.clone())).await.unwrap();
    assert!(!h.kiosk.feedback().visible);

    h.act(Action::SelectLogoCatalog(CatalogRef::new("/gallery/broken.svg")))
        .await
        .unwrap();

    assert_eq!(h.kiosk.draft().logo(), &LogoSource::Upload(picked));
    assert!(!h.kiosk.feedback().visible, "catalog failures are log-only by default");
    h.assert_no_queued_timer();
}

#[tokio::test(start_paused = true)]
async fn drop_notice_expiry_clears_the_whole_draft() {
    let mut h = KioskHarness::new(gallery());
    h.act(Action::SelectDrink(Drink::Two)).await.unwrap();
    h.act(Action::ChangeText("Ada".into())).await.unwrap();
    h.act(Action::DropLogo(DropEvent::single(LogoFile::svg("crest.svg", "<svg/>"))))
        .await
        .unwrap();
    assert_eq!(h.kiosk.feedback().message, MSG_DROP_ACCEPTED);

    h.run_next_timer().await;

    let d = h.kiosk.draft();
    assert_eq!(d.drink(), None);
    assert_eq!(d.text(), "");
    assert!(d.logo().is_none());
    assert!(!h.kiosk.feedback().visible);
    assert_eq!(h.kiosk.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn rejected_drop_expiry_clears_the_whole_draft() {
    let mut h = KioskHarness::new(gallery());
    h.act(Action::SelectDrink(Drink::Five)).await.unwrap();
    h.act(Action::ChangeText("Grace".into())).await.unwrap();
    h.act(Action::DropLogo(DropEvent::empty())).await.unwrap();
    assert_eq!(h.kiosk.feedback().message, MSG_DROP_REJECTED);

    h.run_next_timer().await;
    assert!(h.kiosk.draft().is_empty());
}
