use crate::layout::EdgeStyle;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal budget per node slot.
    pub slot_width: f32,
    /// Vertical distance between levels.
    pub level_spacing: f32,
    pub top_margin: f32,
    pub node_width: f32,
    pub node_height: f32,
    /// Minimum width the roots are spread across.
    pub available_width: f32,
    /// Top-down ordering sweeps per organize.
    pub order_passes: usize,
    pub edge_style: EdgeStyle,
    pub corner_radius: f32,
    pub bezier_curvature: f32,
    pub min_control_offset: f32,
    pub fit_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_width: 220.0,
            level_spacing: 150.0,
            top_margin: 50.0,
            node_width: 180.0,
            node_height: 80.0,
            available_width: 1200.0,
            order_passes: 2,
            edge_style: EdgeStyle::Curved,
            corner_radius: 8.0,
            bezier_curvature: 0.5,
            min_control_offset: 20.0,
            fit_padding: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    node_fill: Option<String>,
    node_border: Option<String>,
    root_fill: Option<String>,
    title_color: Option<String>,
    subtitle_color: Option<String>,
    line_color: Option<String>,
    line_width: Option<NumberOrString>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    slot_width: Option<f32>,
    level_spacing: Option<f32>,
    top_margin: Option<f32>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    available_width: Option<f32>,
    order_passes: Option<usize>,
    edge_style: Option<String>,
    corner_radius: Option<f32>,
    bezier_curvature: Option<f32>,
    min_control_offset: Option<f32>,
    fit_padding: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Overlays a JSON (or JSON5) config document onto the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config: {json_err}"))?,
    };

    let mut config = Config::default();
    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" | "base" => config.theme = Theme::classic(),
            other => tracing::warn!(theme = other, "unknown theme; keeping default"),
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size.as_ref().and_then(NumberOrString::as_f32) {
            theme.font_size = v;
        }
        if let Some(v) = vars.node_fill {
            theme.node_fill = v;
        }
        if let Some(v) = vars.node_border {
            theme.node_border = v;
        }
        if let Some(v) = vars.root_fill {
            theme.root_fill = v;
        }
        if let Some(v) = vars.title_color {
            theme.title_color = v;
        }
        if let Some(v) = vars.subtitle_color {
            theme.subtitle_color = v;
        }
        if let Some(v) = vars.line_color {
            theme.line_color = v;
        }
        if let Some(v) = vars.line_width.as_ref().and_then(NumberOrString::as_f32) {
            theme.line_width = v;
        }
        if let Some(v) = vars.background {
            theme.background = v.clone();
            config.render.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.slot_width {
            target.slot_width = v;
        }
        if let Some(v) = layout.level_spacing {
            target.level_spacing = v;
        }
        if let Some(v) = layout.top_margin {
            target.top_margin = v;
        }
        if let Some(v) = layout.node_width {
            target.node_width = v;
        }
        if let Some(v) = layout.node_height {
            target.node_height = v;
        }
        if let Some(v) = layout.available_width {
            target.available_width = v;
        }
        if let Some(v) = layout.order_passes {
            target.order_passes = v.max(1);
        }
        if let Some(v) = layout.edge_style {
            target.edge_style = v.parse()?;
        }
        if let Some(v) = layout.corner_radius {
            target.corner_radius = v;
        }
        if let Some(v) = layout.bezier_curvature {
            target.bezier_curvature = v;
        }
        if let Some(v) = layout.min_control_offset {
            target.min_control_offset = v;
        }
        if let Some(v) = layout.fit_padding {
            target.fit_padding = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.slot_width, LayoutConfig::default().slot_width);
    }

    #[test]
    fn overlays_layout_and_theme() {
        let config = parse_config(
            r##"{
                "theme": "modern",
                "themeVariables": { "fontSize": "14px", "lineColor": "#123456" },
                "layout": { "slotWidth": 300, "edgeStyle": "bezier" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.layout.slot_width, 300.0);
        assert_eq!(config.layout.edge_style, EdgeStyle::Bezier);
        assert_eq!(config.layout.level_spacing, LayoutConfig::default().level_spacing);
        assert_eq!(config.theme.font_size, 14.0);
        assert_eq!(config.theme.line_color, "#123456");
        assert_eq!(config.theme.font_family, Theme::modern().font_family);
    }

    #[test]
    fn accepts_json5() {
        let config = parse_config("{ layout: { topMargin: 10, }, }").unwrap();
        assert_eq!(config.layout.top_margin, 10.0);
    }

    #[test]
    fn rejects_unknown_edge_style() {
        assert!(parse_config(r#"{"layout": {"edgeStyle": "zigzag"}}"#).is_err());
    }
}
