//! Dark-mode preference.
//!
//! An explicit choice, once made, is persisted and always wins. Until then the
//! preference follows the host: in a terminal that is the background color
//! advertised through `COLORFGBG`.

use std::env;

/// Environment variable some terminals use to advertise `fg;bg` color indices.
const COLORFGBG: &str = "COLORFGBG";

/// Resolved dark-mode state plus where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    dark: bool,
    explicit: bool,
}

impl ThemePreference {
    /// Resolves the preference from a persisted value, falling back to `system`.
    pub fn resolve(persisted: Option<bool>, system: bool) -> Self {
        match persisted {
            Some(dark) => Self {
                dark,
                explicit: true,
            },
            None => Self {
                dark: system,
                explicit: false,
            },
        }
    }

    /// Resolves the preference, probing the host environment when nothing was persisted.
    pub fn resolve_with_host(persisted: Option<bool>) -> Self {
        Self::resolve(persisted, system_prefers_dark())
    }

    /// Whether dark mode is on.
    pub fn is_dark(self) -> bool {
        self.dark
    }

    /// Whether the value came from an explicit user choice.
    pub fn is_explicit(self) -> bool {
        self.explicit
    }

    /// The value to persist, if any.
    pub fn persisted(self) -> Option<bool> {
        self.explicit.then_some(self.dark)
    }

    /// Records an explicit choice. Returns true if the dark flag changed.
    pub fn set(&mut self, dark: bool) -> bool {
        let changed = self.dark != dark;
        self.dark = dark;
        self.explicit = true;
        changed
    }

    /// Follows a host preference change unless an explicit choice exists.
    ///
    /// Returns true if the dark flag changed.
    pub fn follow_system(&mut self, dark: bool) -> bool {
        if self.explicit || self.dark == dark {
            return false;
        }
        self.dark = dark;
        true
    }
}

/// Returns true if the host advertises a dark background.
///
/// Unknown or missing information means light.
pub fn system_prefers_dark() -> bool {
    env::var(COLORFGBG)
        .ok()
        .and_then(|value| parse_colorfgbg(&value))
        .unwrap_or(false)
}

/// Parses a `COLORFGBG` value (`"15;0"`, `"0;default;15"`) into "is the background dark".
///
/// Background indices 0–6 and 8 are the dark entries of the 16-color palette.
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let background = value.rsplit(';').next()?.trim();
    let index: u8 = background.parse().ok()?;
    Some(matches!(index, 0..=6 | 8))
}
