//! Text presentation rule: entered-text length to display scale, plus the
//! persistent long-text warning.
//!
//! Both are pure functions of the current text and are recomputed on every
//! read; nothing here is cached.

/// Text longer than this (in characters) shows the warning.
pub const LONG_TEXT_THRESHOLD: usize = 10;

/// Rendered pixels per scale unit.
pub const PX_PER_SCALE: u16 = 2;

/// Character count used by every rule in this module.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Display scale for a text of `len` characters.
///
/// | len  | scale |
/// |------|-------|
/// | 0..=5 | 16 |
/// | 6    | 12 |
/// | 7    | 11 |
/// | 8    | 10 |
/// | > 8  | 8  |
pub fn scale(len: usize) -> u8 {
    match len {
        0..=5 => 16,
        6 => 12,
        7 => 11,
        8 => 10,
        _ => 8,
    }
}

/// Font size the input renders at.
pub fn font_px(len: usize) -> u16 {
    u16::from(scale(len)) * PX_PER_SCALE
}

pub fn is_too_long(len: usize) -> bool {
    len > LONG_TEXT_THRESHOLD
}
