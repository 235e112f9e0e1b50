use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI.
///
/// Built once from config and handed to the renderers; the view state never
/// sees it.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub header: Color,
    pub new_badge_bg: Color,
    pub new_badge_fg: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    pub notification_bg: Color,
    pub notification_fg: Color,
    /// Per-tech label colors, keyed lowercase
    pub tech_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut tech_colors = HashMap::new();
        tech_colors.insert("rust".into(), Color::Rgb(0xF7, 0x4C, 0x00));
        tech_colors.insert("go".into(), Color::Rgb(0x00, 0xAD, 0xD8));
        tech_colors.insert("react".into(), Color::Rgb(0x61, 0xDA, 0xFB));
        tech_colors.insert("python".into(), Color::Rgb(0xFF, 0xD4, 0x3B));

        Theme {
            background: Color::Rgb(0x12, 0x12, 0x1A),
            text: Color::Rgb(0xC8, 0xC8, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x7E, 0x57, 0xC2),
            dim: Color::Rgb(0x80, 0x80, 0x96),
            red: Color::Rgb(0xFF, 0x55, 0x55),
            header: Color::Rgb(0x03, 0xA9, 0xF4),
            new_badge_bg: Color::Rgb(0xFF, 0xEB, 0x3B),
            new_badge_fg: Color::Rgb(0x21, 0x21, 0x21),
            selection_bg: Color::Rgb(0x31, 0x1B, 0x4F),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x12, 0x12, 0x1A),
            notification_bg: Color::Rgb(0x32, 0x32, 0x32),
            notification_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            tech_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    // Byte slicing below needs single-byte chars
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "header" => theme.header = color,
                "new_badge_bg" => theme.new_badge_bg = color,
                "new_badge_fg" => theme.new_badge_fg = color,
                "selection_bg" => theme.selection_bg = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                "notification_bg" => theme.notification_bg = color,
                "notification_fg" => theme.notification_fg = color,
                _ => tracing::warn!(slot = %key, "unknown color slot"),
            }
        }

        for (tech, value) in &ui.tech_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tech_colors.insert(tech.to_lowercase(), color);
            }
        }

        theme
    }

    /// Color for a tech label, falling back to text color
    pub fn tech_color(&self, tech: &str) -> Color {
        self.tech_colors
            .get(&tech.to_lowercase())
            .copied()
            .unwrap_or(self.text)
    }
}
