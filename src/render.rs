use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{Layout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NODE_PAD_X: f32 = 10.0;
const GLYPH_WIDTH_RATIO: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.4;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let bounds = layout.bounds;
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{:.2} {:.2} {width:.2} {height:.2}\">",
        bounds.min_x, bounds.min_y
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        bounds.min_x, bounds.min_y, theme.background
    ));

    svg.push_str("<g class=\"edges\">");
    for edge in &layout.edges {
        svg.push_str(&format!(
            "<path data-manager=\"{}\" data-subordinate=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            edge.manager,
            edge.subordinate,
            edge.path.to_svg_path(),
            theme.line_color,
            theme.line_width
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in layout.nodes.values() {
        svg.push_str(&node_svg(node, theme, config));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn node_svg(node: &NodeLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let fill = if node.level == 0 {
        theme.root_fill.as_str()
    } else {
        theme.node_fill.as_str()
    };
    let mut out = format!(
        "<g data-id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"10\" ry=\"10\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
        node.id, node.x, node.y, node.width, node.height, fill, theme.node_border
    );

    let max_text = (config.node_width - NODE_PAD_X * 2.0).max(0.0);
    let lines: Vec<(&str, f32, &str, bool)> = [
        (node.name.as_str(), theme.font_size, theme.title_color.as_str(), true),
        (node.position.as_str(), theme.font_size * 0.85, theme.subtitle_color.as_str(), false),
        (node.department.as_str(), theme.font_size * 0.85, theme.subtitle_color.as_str(), false),
    ]
    .into_iter()
    .filter(|(text, ..)| !text.trim().is_empty())
    .collect();

    let total: f32 = lines.iter().map(|(_, size, ..)| size * LINE_HEIGHT).sum();
    let center_x = node.x + node.width / 2.0;
    let mut baseline = node.y + (node.height - total) / 2.0;
    for (text, size, color, bold) in lines {
        baseline += size * LINE_HEIGHT;
        let weight = if bold { " font-weight=\"600\"" } else { "" };
        out.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{size}\" fill=\"{color}\"{weight}>{}</text>",
            baseline - size * (LINE_HEIGHT - 1.0),
            escape_xml(&theme.font_family),
            escape_xml(&fit_label(text, max_text, size))
        ));
    }
    out.push_str("</g>");
    out
}

/// Truncates `text` with an ellipsis so it fits `max_width` at `font_size`.
pub fn fit_label(text: &str, max_width: f32, font_size: f32) -> String {
    let glyph = (font_size * GLYPH_WIDTH_RATIO).max(0.1);
    let max_cols = (max_width / glyph).floor() as usize;
    let text = text.trim();
    if text.width() <= max_cols {
        return text.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_cols {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Employee;
    use crate::layout::{compute_layout, organize};

    #[test]
    fn render_svg_basic() {
        let config = LayoutConfig::default();
        let employees = vec![
            Employee::new(1, None).with_details("Ada <CEO>", "Chief Executive", "Board"),
            Employee::new(2, Some(1)).with_details("Grace", "CTO", "Engineering"),
        ];
        let store = organize(&employees, &config).into_store();
        let layout = compute_layout(&employees, &store, &config);
        let svg = render_svg(&layout, &Theme::modern(), &config);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Ada &lt;CEO&gt;"));
        assert!(svg.contains("data-subordinate=\"2\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn fit_label_truncates_long_text() {
        assert_eq!(fit_label("Short", 100.0, 10.0), "Short");
        let fitted = fit_label("An extremely long department name", 60.0, 10.0);
        assert!(fitted.ends_with('…'));
        assert!(fitted.width() <= 10);
        assert_eq!(fit_label("abc", 0.0, 10.0), "");
    }
}
