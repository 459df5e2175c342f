use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LayoutConfig;

use super::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Straight,
    #[default]
    Curved,
    Bezier,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown edge style `{0}` (expected straight, curved or bezier)")]
pub struct ParseEdgeStyleError(pub String);

impl FromStr for EdgeStyle {
    type Err = ParseEdgeStyleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "straight" | "line" => Ok(Self::Straight),
            "curved" | "step" | "smoothstep" => Ok(Self::Curved),
            "bezier" | "cubic" => Ok(Self::Bezier),
            _ => Err(ParseEdgeStyleError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Position),
    LineTo(Position),
    QuadTo(Position, Position),
    CubicTo(Position, Position, Position),
}

/// Drawable connector from a manager's bottom-centre to a subordinate's
/// top-centre.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub from: Position,
    pub to: Position,
    pub commands: Vec<PathCommand>,
}

impl EdgePath {
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for (idx, command) in self.commands.iter().enumerate() {
            if idx > 0 {
                d.push(' ');
            }
            d.push_str(&match command {
                PathCommand::MoveTo(p) => format!("M {:.2} {:.2}", p.x, p.y),
                PathCommand::LineTo(p) => format!("L {:.2} {:.2}", p.x, p.y),
                PathCommand::QuadTo(c, p) => {
                    format!("Q {:.2} {:.2} {:.2} {:.2}", c.x, c.y, p.x, p.y)
                }
                PathCommand::CubicTo(c1, c2, p) => format!(
                    "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                    c1.x, c1.y, c2.x, c2.y, p.x, p.y
                ),
            });
        }
        d
    }

    /// Point halfway along the connector's vertical span, where a label sits.
    pub fn midpoint(&self) -> Position {
        Position::new(
            (self.from.x + self.to.x) / 2.0,
            (self.from.y + self.to.y) / 2.0,
        )
    }
}

/// Connector between two node boxes placed at `manager` and `subordinate`.
pub fn compute_edge_path(
    manager: Position,
    subordinate: Position,
    style: EdgeStyle,
    config: &LayoutConfig,
) -> EdgePath {
    let from = Position::new(manager.x + config.node_width / 2.0, manager.y + config.node_height);
    let to = Position::new(subordinate.x + config.node_width / 2.0, subordinate.y);
    let commands = match style {
        EdgeStyle::Straight => vec![PathCommand::MoveTo(from), PathCommand::LineTo(to)],
        EdgeStyle::Curved => step_commands(from, to, config.corner_radius),
        EdgeStyle::Bezier => bezier_commands(from, to, config),
    };
    EdgePath { from, to, commands }
}

fn step_commands(from: Position, to: Position, corner_radius: f32) -> Vec<PathCommand> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() < f32::EPSILON || dy.abs() < f32::EPSILON {
        return vec![PathCommand::MoveTo(from), PathCommand::LineTo(to)];
    }
    let mid_y = from.y + dy / 2.0;
    let radius = corner_radius.min(dx.abs() / 2.0).min(dy.abs() / 2.0).max(0.0);
    let sx = dx.signum();
    let sy = dy.signum();

    let first_corner = Position::new(from.x, mid_y);
    let second_corner = Position::new(to.x, mid_y);
    vec![
        PathCommand::MoveTo(from),
        PathCommand::LineTo(Position::new(from.x, mid_y - sy * radius)),
        PathCommand::QuadTo(first_corner, Position::new(from.x + sx * radius, mid_y)),
        PathCommand::LineTo(Position::new(to.x - sx * radius, mid_y)),
        PathCommand::QuadTo(second_corner, Position::new(to.x, mid_y + sy * radius)),
        PathCommand::LineTo(to),
    ]
}

fn bezier_commands(from: Position, to: Position, config: &LayoutConfig) -> Vec<PathCommand> {
    let dy = to.y - from.y;
    let offset = (dy.abs() * config.bezier_curvature).max(config.min_control_offset);
    vec![
        PathCommand::MoveTo(from),
        PathCommand::CubicTo(
            Position::new(from.x, from.y + offset),
            Position::new(to.x, to.y - offset),
            to,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig {
            node_width: 100.0,
            node_height: 40.0,
            corner_radius: 8.0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn anchors_are_bottom_and_top_centres() {
        let path = compute_edge_path(
            Position::new(0.0, 0.0),
            Position::new(200.0, 100.0),
            EdgeStyle::Straight,
            &config(),
        );
        assert_eq!(path.from, Position::new(50.0, 40.0));
        assert_eq!(path.to, Position::new(250.0, 100.0));
        assert_eq!(path.to_svg_path(), "M 50.00 40.00 L 250.00 100.00");
    }

    #[test]
    fn curved_path_steps_through_midpoint() {
        let path = compute_edge_path(
            Position::new(0.0, 0.0),
            Position::new(200.0, 100.0),
            EdgeStyle::Curved,
            &config(),
        );
        assert_eq!(path.commands.len(), 6);
        assert_eq!(
            path.commands[2],
            PathCommand::QuadTo(Position::new(50.0, 70.0), Position::new(58.0, 70.0))
        );
        assert_eq!(path.commands.last(), Some(&PathCommand::LineTo(path.to)));
        assert_eq!(
            path.to_svg_path(),
            "M 50.00 40.00 L 50.00 62.00 Q 50.00 70.00 58.00 70.00 \
             L 242.00 70.00 Q 250.00 70.00 250.00 78.00 L 250.00 100.00"
        );
    }

    #[test]
    fn curved_path_is_straight_when_aligned() {
        let path = compute_edge_path(
            Position::new(0.0, 0.0),
            Position::new(0.0, 100.0),
            EdgeStyle::Curved,
            &config(),
        );
        assert_eq!(path.commands.len(), 2);
    }

    #[test]
    fn curved_radius_shrinks_for_tight_offsets() {
        let path = compute_edge_path(
            Position::new(0.0, 0.0),
            Position::new(6.0, 100.0),
            EdgeStyle::Curved,
            &config(),
        );
        // |dx| = 6, so the corner radius is capped at 3.
        assert_eq!(
            path.commands[2],
            PathCommand::QuadTo(Position::new(50.0, 70.0), Position::new(53.0, 70.0))
        );
    }

    #[test]
    fn bezier_controls_are_vertical() {
        let path = compute_edge_path(
            Position::new(0.0, 0.0),
            Position::new(200.0, 140.0),
            EdgeStyle::Bezier,
            &config(),
        );
        let PathCommand::CubicTo(c1, c2, end) = path.commands[1] else {
            panic!("expected cubic segment");
        };
        assert_eq!(c1, Position::new(50.0, 90.0));
        assert_eq!(c2, Position::new(250.0, 90.0));
        assert_eq!(end, path.to);
    }

    #[test]
    fn parses_style_names() {
        assert_eq!("Bezier".parse::<EdgeStyle>(), Ok(EdgeStyle::Bezier));
        assert_eq!("smoothstep".parse::<EdgeStyle>(), Ok(EdgeStyle::Curved));
        assert!("zigzag".parse::<EdgeStyle>().is_err());
    }
}
