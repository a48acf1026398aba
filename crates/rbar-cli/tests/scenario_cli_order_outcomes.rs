//! `rbar order` and `rbar catalog list` end to end. The order service is a
//! local mock or a closed port; nothing leaves the machine.

use assert_cmd::prelude::*;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use std::process::Command;

const OWL: &str = "<svg id=\"owl\"/>";

fn config(dir: &Path, base_url: &str, gallery: Option<&Path>) -> String {
    let mut yaml = format!(
        "endpoint:\n  base_url: {base_url}\n  timeout_ms: 2000\nfeedback:\n  ack_window_ms: 20\n"
    );
    if let Some(g) = gallery {
        yaml.push_str(&format!("catalog:\n  dir: {}\n", g.display()));
    }
    let p = dir.join("kiosk.yaml");
    std::fs::write(&p, yaml).unwrap();
    p.to_string_lossy().to_string()
}

fn gallery(dir: &Path) -> std::path::PathBuf {
    let g = dir.join("gallery");
    std::fs::create_dir(&g).unwrap();
    std::fs::write(g.join("owl.svg"), OWL).unwrap();
    std::fs::write(g.join("bear.svg"), "<svg id=\"bear\"/>").unwrap();
    std::fs::write(g.join("notes.txt"), "not a logo").unwrap();
    g
}

#[test]
fn order_without_logo_fails_before_any_request() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path("/createOrder");
        then.status(200);
    });
    let cfg = config(dir.path(), &server.base_url(), None);

    Command::cargo_bin("rbar")?
        .current_dir(dir.path())
        .args(["order", "--config", &cfg, "--drink", "2", "--text", "Ada"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please upload an SVG file and enter text to place the order.",
        ));

    m.assert_hits(0);
    Ok(())
}

#[test]
fn dropped_non_svg_is_not_used() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let png = dir.path().join("photo.png");
    std::fs::write(&png, [0x89u8, b'P', b'N', b'G'])?;
    let cfg = config(dir.path(), "http://127.0.0.1:9", None);

    Command::cargo_bin("rbar")?
        .current_dir(dir.path())
        .args([
            "order",
            "--config",
            &cfg,
            "--drop",
            &png.to_string_lossy(),
            "--text",
            "Ada",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please upload an SVG file"));
    Ok(())
}

#[test]
fn gallery_order_posts_catalog_content() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let g = gallery(dir.path());
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path("/createOrder").json_body(json!({
            "svg": OWL,
            "text": "Grace",
            "drink": "Drink 5"
        }));
        then.status(200)
            .json_body(json!({"message": "Order sent to callback successfully"}));
    });
    let cfg = config(dir.path(), &server.base_url(), Some(&g));

    Command::cargo_bin("rbar")?
        .current_dir(dir.path())
        .args([
            "order",
            "--config",
            &cfg,
            "--drink",
            "5",
            "--gallery",
            "/gallery/owl.svg",
            "--text",
            "Grace",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order placed successfully!"));

    m.assert_hits(1);
    Ok(())
}

#[test]
fn service_failure_is_reported_with_reason() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let logo = dir.path().join("crest.svg");
    std::fs::write(&logo, "<svg/>")?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/createOrder");
        then.status(500)
            .json_body(json!({"error": "Failed to retrieve callback list"}));
    });
    let cfg = config(dir.path(), &server.base_url(), None);

    Command::cargo_bin("rbar")?
        .current_dir(dir.path())
        .args([
            "order",
            "--config",
            &cfg,
            "--pick",
            &logo.to_string_lossy(),
            "--text",
            "Ada",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error placing order: status 500: Failed to retrieve callback list",
        ));
    Ok(())
}

#[test]
fn logo_options_are_mutually_exclusive() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let cfg = config(dir.path(), "http://127.0.0.1:9", None);

    Command::cargo_bin("rbar")?
        .current_dir(dir.path())
        .args([
            "order", "--config", &cfg, "--gallery", "/gallery/owl.svg", "--pick", "a.svg",
            "--text", "Ada",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}

#[test]
fn catalog_list_prints_sorted_svg_references() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let g = gallery(dir.path());
    let cfg = config(dir.path(), "http://127.0.0.1:9", Some(&g));

    Command::cargo_bin("rbar")?
        .current_dir(dir.path())
        .args(["catalog", "list", "--config", &cfg])
        .assert()
        .success()
        .stdout("/gallery/bear.svg\n/gallery/owl.svg\n");
    Ok(())
}
