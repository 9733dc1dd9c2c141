use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub card_front: String,
    pub card_back: String,
    pub hint: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub cleared: String,
    pub error: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("flipdeck")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        // Try bundled themes
        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename)
            && let Ok(content) = std::str::from_utf8(file.data.as_ref())
            && let Ok(theme) = toml::from_str::<Theme>(content)
        {
            return Some(theme);
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("terminal-default").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            card_front: "#f5e0dc".to_string(),
            card_back: "#a6e3a1".to_string(),
            hint: "#585b70".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            cleared: "#a6e3a1".to_string(),
            error: "#f38ba8".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }
    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }
    pub fn card_front(&self) -> Color {
        Self::parse_color(&self.card_front)
    }
    pub fn card_back(&self) -> Color {
        Self::parse_color(&self.card_back)
    }
    pub fn hint(&self) -> Color {
        Self::parse_color(&self.hint)
    }
    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }
    pub fn accent_dim(&self) -> Color {
        Self::parse_color(&self.accent_dim)
    }
    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }
    pub fn border_focused(&self) -> Color {
        Self::parse_color(&self.border_focused)
    }
    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }
    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }
    pub fn bar_filled(&self) -> Color {
        Self::parse_color(&self.bar_filled)
    }
    pub fn bar_empty(&self) -> Color {
        Self::parse_color(&self.bar_empty)
    }
    pub fn cleared(&self) -> Color {
        Self::parse_color(&self.cleared)
    }
    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }
    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_valid_hex() {
        assert_eq!(
            ThemeColors::parse_color("#89b4fa"),
            Color::Rgb(0x89, 0xb4, 0xfa)
        );
    }

    #[test]
    fn test_parse_color_invalid_falls_back() {
        assert_eq!(ThemeColors::parse_color("zzz"), Color::Reset);
        assert_eq!(ThemeColors::parse_color(""), Color::Reset);
    }

    #[test]
    fn test_bundled_themes_parse() {
        let themes = Theme::available_themes();
        assert!(themes.contains(&"terminal-default".to_string()));
        for name in themes {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to load");
        }
    }
}
