//! Line-oriented kiosk session.
//!
//! One command per line on stdin. Timer expiries arrive on their own channel
//! and are applied between lines, so the view is reprinted when feedback
//! clears even if the user types nothing.

use anyhow::Result;
use rbar_config::KioskSettings;
use rbar_core::{Action, CatalogRef, Drink, DropEvent, Kiosk};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const HELP: &str = "\
commands:
  drink <n>          select drink 1-5
  gallery <n|ref>    select a gallery logo by position or reference
  pick <path>        use a local file as the logo
  drop <path>        drop a local file on the drop zone (SVG only)
  text <name...>     set the name
  submit             place the order
  show               print the current view
  quit               leave";

/// Parsed input line. File commands carry a path that still has to be read.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Act(Action),
    Pick(String),
    Drop(String),
    Gallery(String),
    Show,
    Help,
    Quit,
}

fn parse_line(raw: &str) -> Result<Option<Line>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let (cmd, rest) = match raw.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (raw, ""),
    };

    let need = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("{cmd}: missing {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let line = match cmd {
        "drink" => Line::Act(Action::SelectDrink(
            Drink::parse(rest).map_err(|e| e.to_string())?,
        )),
        "gallery" => Line::Gallery(need("reference")?),
        "pick" => Line::Pick(need("path")?),
        "drop" => Line::Drop(need("path")?),
        // Empty text is a valid edit.
        "text" => Line::Act(Action::ChangeText(rest.to_string())),
        "submit" => Line::Act(Action::Submit),
        "show" => Line::Show,
        "help" | "?" => Line::Help,
        "quit" | "exit" => Line::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(line))
}

/// Position (1-based) into the loaded gallery, or a literal reference.
fn gallery_ref(kiosk: &Kiosk, arg: &str) -> Result<CatalogRef, String> {
    match arg.parse::<usize>() {
        Ok(n) => kiosk
            .gallery()
            .get(n.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| format!("gallery: no entry {n}")),
        Err(_) => Ok(CatalogRef::new(arg)),
    }
}

async fn to_action(kiosk: &Kiosk, line: Line) -> Result<Option<Action>, String> {
    let action = match line {
        Line::Act(a) => a,
        Line::Gallery(arg) => Action::SelectLogoCatalog(gallery_ref(kiosk, &arg)?),
        Line::Pick(path) => Action::SelectLogoFile(
            super::load_local_file(&path)
                .await
                .map_err(|e| format!("{e:#}"))?,
        ),
        Line::Drop(path) => Action::DropLogo(DropEvent::single(
            super::load_local_file(&path)
                .await
                .map_err(|e| format!("{e:#}"))?,
        )),
        Line::Show | Line::Help | Line::Quit => return Ok(None),
    };
    Ok(Some(action))
}

fn print_view(kiosk: &Kiosk) {
    println!("{}", kiosk.view().render_text());
}

pub async fn run(settings: &KioskSettings) -> Result<()> {
    let (mut kiosk, mut timers) = super::build_kiosk(settings).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    print_view(&kiosk);

    loop {
        tokio::select! {
            Some(action) = timers.recv() => {
                if let Err(e) = kiosk.handle(action).await {
                    warn!(error = %e, "timer action refused");
                }
                print_view(&kiosk);
            }
            next = lines.next_line() => {
                let Some(raw) = next? else { break };
                let line = match parse_line(&raw) {
                    Ok(Some(line)) => line,
                    Ok(None) => continue,
                    Err(msg) => {
                        eprintln!("{msg}");
                        continue;
                    }
                };
                match line {
                    Line::Quit => break,
                    Line::Help => {
                        println!("{HELP}");
                        continue;
                    }
                    _ => {}
                }
                match to_action(&kiosk, line).await {
                    Ok(Some(action)) => {
                        if let Err(e) = kiosk.handle(action).await {
                            eprintln!("{e}");
                        }
                    }
                    Ok(None) => {}
                    Err(msg) => {
                        eprintln!("{msg}");
                        continue;
                    }
                }
                print_view(&kiosk);
            }
        }
    }
    Ok(())
}
