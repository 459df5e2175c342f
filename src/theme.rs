use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub node_fill: String,
    pub node_border: String,
    pub root_fill: String,
    pub title_color: String,
    pub subtitle_color: String,
    pub line_color: String,
    pub line_width: f32,
    pub background: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            node_fill: "#ECECFF".to_string(),
            node_border: "#9370DB".to_string(),
            root_fill: "#FFFFDE".to_string(),
            title_color: "#333333".to_string(),
            subtitle_color: "#666666".to_string(),
            line_color: "#333333".to_string(),
            line_width: 1.4,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            node_fill: "#F8FAFF".to_string(),
            node_border: "#C7D2E5".to_string(),
            root_fill: "#EEF2F8".to_string(),
            title_color: "#1C2430".to_string(),
            subtitle_color: "#5B6B85".to_string(),
            line_color: "#7A8AA6".to_string(),
            line_width: 1.2,
            background: "#FFFFFF".to_string(),
        }
    }
}
