use anyhow::Result;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kalandar::config::config_dir;

pub fn hex_to_color(hex: &str) -> Color {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() { return Color::Reset; }
    let r = u8::from_str_radix(&h[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&h[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&h[4..6], 16).unwrap_or(0);
    Color::Rgb(r, g, b)
}

fn default_border_style() -> String { "rounded".to_owned() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    // Backgrounds
    pub bg_primary: String, pub bg_secondary: String,
    // Borders
    pub border_normal: String, pub border_focused: String,
    // Text
    pub text_primary: String, pub text_muted: String, pub text_accent: String,
    // Day cells
    pub today_bg: String, pub today_fg: String,
    pub cursor_bg: String, pub cursor_fg: String,
    pub weekend_fg: String, pub fill_fg: String,
    /// Marker colour for days whose highlight carries a label.
    pub label_fg: String,
    /// Border style: "rounded" | "double" | "thick" | "plain"
    #[serde(default = "default_border_style")]
    pub border_style: String,
    /// Highlight class token → colour, e.g. `holiday = "#f38ba8"`.
    #[serde(default)]
    pub class_colors: BTreeMap<String, String>,
}

impl ThemeConfig {
    // ── Color accessors ───────────────────────────────────────────────────────
    pub fn bg(&self)            -> Color { hex_to_color(&self.bg_primary) }
    pub fn bg2(&self)           -> Color { hex_to_color(&self.bg_secondary) }
    pub fn border(&self)        -> Color { hex_to_color(&self.border_normal) }
    pub fn border_active(&self) -> Color { hex_to_color(&self.border_focused) }
    pub fn fg(&self)            -> Color { hex_to_color(&self.text_primary) }
    pub fn fg_dim(&self)        -> Color { hex_to_color(&self.text_muted) }
    pub fn accent(&self)        -> Color { hex_to_color(&self.text_accent) }
    pub fn weekend_color(&self) -> Color { hex_to_color(&self.weekend_fg) }
    pub fn fill_color(&self)    -> Color { hex_to_color(&self.fill_fg) }
    pub fn label_color(&self)   -> Color { hex_to_color(&self.label_fg) }

    pub fn today_highlight(&self)  -> (Color, Color) {
        (hex_to_color(&self.today_bg), hex_to_color(&self.today_fg))
    }
    pub fn cursor_highlight(&self) -> (Color, Color) {
        (hex_to_color(&self.cursor_bg), hex_to_color(&self.cursor_fg))
    }

    /// Colour of the first class token that has one.
    pub fn class_color<'t>(&self, mut tokens: impl Iterator<Item = &'t str>) -> Option<Color> {
        tokens.find_map(|t| self.class_colors.get(t)).map(|hex| hex_to_color(hex))
    }

    pub fn border_type(&self) -> BorderType {
        match self.border_style.as_str() {
            "double" => BorderType::Double,
            "thick"  => BorderType::Thick,
            "plain"  => BorderType::Plain,
            _        => BorderType::Rounded,
        }
    }

    // ── Persistence ───────────────────────────────────────────────────────────
    pub fn load() -> Result<Self> {
        let path = config_dir().join("theme.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            let t = ThemeConfig::default();
            t.save()?;
            Ok(t)
        }
    }

    pub fn save(&self) -> Result<()> {
        let dir = config_dir();
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("theme.toml"), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    // ── Theme catalogue ───────────────────────────────────────────────────────
    pub fn all_themes() -> Vec<ThemeConfig> {
        vec![
            ThemeConfig::default(),    // Catppuccin Mocha
            ThemeConfig::nord(),
            ThemeConfig::gruvbox(),
            ThemeConfig::paper(),
        ]
    }

    // ── Built-in themes ───────────────────────────────────────────────────────

    pub fn nord() -> Self { Self {
        name: "nord".into(),
        bg_primary: "#2e3440".into(), bg_secondary: "#3b4252".into(),
        border_normal: "#4c566a".into(), border_focused: "#88c0d0".into(),
        text_primary: "#eceff4".into(), text_muted: "#4c566a".into(), text_accent: "#88c0d0".into(),
        today_bg: "#88c0d0".into(), today_fg: "#2e3440".into(),
        cursor_bg: "#81a1c1".into(), cursor_fg: "#2e3440".into(),
        weekend_fg: "#bf616a".into(), fill_fg: "#616e88".into(),
        label_fg: "#ebcb8b".into(),
        border_style: "rounded".into(),
        class_colors: default_class_colors("#bf616a", "#a3be8c"),
    }}

    pub fn gruvbox() -> Self { Self {
        name: "gruvbox".into(),
        bg_primary: "#282828".into(), bg_secondary: "#1d2021".into(),
        border_normal: "#504945".into(), border_focused: "#d79921".into(),
        text_primary: "#ebdbb2".into(), text_muted: "#7c6f64".into(), text_accent: "#d79921".into(),
        today_bg: "#d79921".into(), today_fg: "#282828".into(),
        cursor_bg: "#689d6a".into(), cursor_fg: "#282828".into(),
        weekend_fg: "#fb4934".into(), fill_fg: "#665c54".into(),
        label_fg: "#fabd2f".into(),
        border_style: "rounded".into(),
        class_colors: default_class_colors("#fb4934", "#b8bb26"),
    }}

    /// Light theme with plain borders.
    pub fn paper() -> Self { Self {
        name: "paper".into(),
        bg_primary: "#fafafa".into(), bg_secondary: "#eeeeee".into(),
        border_normal: "#bdbdbd".into(), border_focused: "#1565c0".into(),
        text_primary: "#212121".into(), text_muted: "#9e9e9e".into(), text_accent: "#1565c0".into(),
        today_bg: "#1565c0".into(), today_fg: "#ffffff".into(),
        cursor_bg: "#ffe082".into(), cursor_fg: "#212121".into(),
        weekend_fg: "#c62828".into(), fill_fg: "#bdbdbd".into(),
        label_fg: "#ef6c00".into(),
        border_style: "plain".into(),
        class_colors: default_class_colors("#c62828", "#2e7d32"),
    }}
}

fn default_class_colors(holiday: &str, event: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("holiday".to_owned(), holiday.to_owned()),
        ("event".to_owned(),   event.to_owned()),
    ])
}

impl Default for ThemeConfig {
    fn default() -> Self { Self {
        name: "catppuccin-mocha".into(),
        bg_primary: "#1e1e2e".into(), bg_secondary: "#181825".into(),
        border_normal: "#45475a".into(), border_focused: "#89b4fa".into(),
        text_primary: "#cdd6f4".into(), text_muted: "#6c7086".into(), text_accent: "#89b4fa".into(),
        today_bg: "#cba6f7".into(), today_fg: "#1e1e2e".into(),
        cursor_bg: "#89b4fa".into(), cursor_fg: "#1e1e2e".into(),
        weekend_fg: "#f38ba8".into(), fill_fg: "#585b70".into(),
        label_fg: "#f9e2af".into(),
        border_style: "rounded".into(),
        class_colors: default_class_colors("#f38ba8", "#a6e3a1"),
    }}
}
