//! Wire types shared between the kiosk client and the order-acceptance service.
//!
//! These shapes are the JSON contract of `POST /createOrder`. Nothing here
//! knows about drafts, feedback, or timers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared media type a logo file must carry on the drop path.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

// ---------------------------------------------------------------------------
// Drink
// ---------------------------------------------------------------------------

/// The fixed drink menu. Wire form is the display label (`"Drink 1"` ..).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drink {
    #[serde(rename = "Drink 1")]
    One,
    #[serde(rename = "Drink 2")]
    Two,
    #[serde(rename = "Drink 3")]
    Three,
    #[serde(rename = "Drink 4")]
    Four,
    #[serde(rename = "Drink 5")]
    Five,
}

impl Drink {
    /// Menu order, as shown to the user.
    pub const ALL: [Drink; 5] = [Drink::One, Drink::Two, Drink::Three, Drink::Four, Drink::Five];

    pub fn as_str(&self) -> &'static str {
        match self {
            Drink::One => "Drink 1",
            Drink::Two => "Drink 2",
            Drink::Three => "Drink 3",
            Drink::Four => "Drink 4",
            Drink::Five => "Drink 5",
        }
    }

    /// 1-based position on the menu.
    pub fn index(&self) -> usize {
        match self {
            Drink::One => 1,
            Drink::Two => 2,
            Drink::Three => 3,
            Drink::Four => 4,
            Drink::Five => 5,
        }
    }

    /// Accepts the wire label (`"Drink 3"`, case-insensitive) or the bare index (`"3"`).
    pub fn parse(s: &str) -> Result<Self, UnknownDrink> {
        let t = s.trim();
        let idx = t
            .to_ascii_lowercase()
            .strip_prefix("drink")
            .map(|rest| rest.trim().to_string())
            .unwrap_or_else(|| t.to_string());

        match idx.as_str() {
            "1" => Ok(Drink::One),
            "2" => Ok(Drink::Two),
            "3" => Ok(Drink::Three),
            "4" => Ok(Drink::Four),
            "5" => Ok(Drink::Five),
            _ => Err(UnknownDrink(t.to_string())),
        }
    }
}

impl fmt::Display for Drink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`Drink::parse`] for anything outside the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDrink(pub String);

impl fmt::Display for UnknownDrink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown drink '{}'. expected one of: 1 | 2 | 3 | 4 | 5",
            self.0
        )
    }
}

impl std::error::Error for UnknownDrink {}

// ---------------------------------------------------------------------------
// Order payload / responses
// ---------------------------------------------------------------------------

/// Body of `POST /createOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Vector markup of the logo, as text.
    pub svg: String,
    /// Name to etch/print.
    pub text: String,
    /// Serialized as `null` when no drink was chosen.
    pub drink: Option<Drink>,
}

/// Success body. The service answers with a human-readable `message`; older
/// deployments answer with an empty body, hence the `Option`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure body (`{"error": "..."}`) returned with any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejection {
    pub error: String,
}
