use crate::ir::EmployeeId;
use crate::layout::{Bounds, Layout};
use crate::validate::Warning;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub bounds: Bounds,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: EmployeeId,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub manager: EmployeeId,
    pub subordinate: EmployeeId,
    pub style: String,
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub path: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, warnings: &[Warning]) -> Self {
        let nodes = layout
            .nodes
            .values()
            .map(|node| NodeDump {
                id: node.id,
                level: node.level,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                name: node.name.clone(),
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                manager: edge.manager,
                subordinate: edge.subordinate,
                style: format!("{:?}", edge.style).to_lowercase(),
                from: [edge.path.from.x, edge.path.from.y],
                to: [edge.path.to.x, edge.path.to.y],
                path: edge.path.to_svg_path(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            bounds: layout.bounds,
            nodes,
            edges,
            warnings: warnings.to_vec(),
        }
    }
}

pub fn write_layout_dump(
    output: Option<&Path>,
    layout: &Layout,
    warnings: &[Warning],
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, warnings);
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &dump)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
