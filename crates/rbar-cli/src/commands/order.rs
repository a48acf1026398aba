//! One-shot order: compose from flags, submit, wait out the ack window.

use anyhow::{bail, Context, Result};
use rbar_config::KioskSettings;
use rbar_core::{Action, CatalogRef, Drink, DropEvent, Severity};

use crate::OrderArgs;

pub async fn run(settings: &KioskSettings, args: OrderArgs) -> Result<()> {
    let (mut kiosk, mut timers) = super::build_kiosk(settings).await?;

    let mut actions: Vec<Action> = Vec::new();
    if let Some(d) = args.drink.as_deref() {
        actions.push(Action::SelectDrink(Drink::parse(d)?));
    }
    if let Some(r) = args.gallery {
        actions.push(Action::SelectLogoCatalog(CatalogRef::new(r)));
    }
    if let Some(p) = args.pick.as_deref() {
        actions.push(Action::SelectLogoFile(super::load_local_file(p).await?));
    }
    if let Some(p) = args.drop.as_deref() {
        actions.push(Action::DropLogo(DropEvent::single(
            super::load_local_file(p).await?,
        )));
    }
    actions.push(Action::ChangeText(args.text));
    actions.push(Action::Submit);

    for action in actions {
        kiosk.handle(action).await?;
    }

    let outcome = kiosk.feedback().clone();

    // Submit always leaves feedback up; let it expire so the reset is logged.
    // A stale expiry from an earlier notice is ignored by the kiosk.
    while kiosk.feedback().visible {
        let expiry = timers
            .recv()
            .await
            .context("feedback timer channel closed")?;
        kiosk.handle(expiry).await?;
    }

    match outcome.severity {
        Severity::Success => {
            println!("{}", outcome.message);
            Ok(())
        }
        Severity::Error => bail!("{}", outcome.message),
    }
}
