use std::io::IsTerminal;

use colored::Colorize;

/// The emphasis set for the usage bars, resolved once at startup and
/// passed into the renderer rather than consulted as global state
///
/// When color is unavailable every emphasis degrades to plain text, so
/// the rendered output is byte-for-byte alignable either way
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Queries the environment once: color is on only when stdout is a
    /// terminal, `NO_COLOR` is unset, and the user didn't opt out
    pub fn detect(no_color: bool) -> Self {
        if no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
            return Palette::plain();
        }
        Palette { enabled: true }
    }

    /// A palette with every emphasis disabled
    pub fn plain() -> Self {
        Palette { enabled: false }
    }

    pub fn good(&self, text: &str) -> String {
        if self.enabled {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn danger(&self, text: &str) -> String {
        if self.enabled {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_passes_text_through() {
        let palette = Palette::plain();
        assert_eq!(palette.good("ok"), "ok");
        assert_eq!(palette.warning("ok"), "ok");
        assert_eq!(palette.danger("ok"), "ok");
        assert_eq!(palette.bold("ok"), "ok");
    }
}
