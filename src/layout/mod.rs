mod ordering;
mod position;
mod ranking;
pub mod routing;
mod session;
mod sizing;
pub(crate) mod types;
pub use ranking::assign_levels;
pub use routing::{EdgePath, EdgeStyle, ParseEdgeStyleError, PathCommand, compute_edge_path};
pub use session::ChartSession;
pub use sizing::subtree_width;
pub use types::*;
use ordering::*;
use position::*;
use ranking::*;
use sizing::*;

use crate::config::LayoutConfig;
use crate::ir::{Employee, EmployeeId, Hierarchy};
use crate::store::PositionStore;
use std::collections::{BTreeMap, HashMap};

/// Result of a full layout recompute.
#[derive(Debug, Clone, Default)]
pub struct Organized {
    pub positions: BTreeMap<EmployeeId, Position>,
    pub levels: BTreeMap<EmployeeId, usize>,
    pub fit_view: Option<FitViewRequest>,
}

impl Organized {
    pub fn into_store(self) -> PositionStore {
        self.positions.into_iter().collect()
    }
}

/// What an incremental sync did to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub kept: usize,
    pub seeded: Vec<EmployeeId>,
    pub dropped: usize,
}

/// Recomputes every position from the hierarchy alone.
///
/// Prior positions play no part, so the same employee list (same ids,
/// links and order) always yields the same map.
pub fn organize(employees: &[Employee], config: &LayoutConfig) -> Organized {
    let hierarchy = Hierarchy::new(employees);
    if hierarchy.is_empty() {
        return Organized::default();
    }

    let widths = subtree_widths(&hierarchy);
    let available =
        config.available_width.max(forest_width(&hierarchy, &widths) as f32 * config.slot_width);
    let levels = compute_levels(&hierarchy);
    let buckets = level_buckets(&hierarchy, &levels);
    let placement = place_levels(&hierarchy, &buckets, &levels, &widths, available, config);

    let mut positions = BTreeMap::new();
    for (level, bucket) in placement.levels.iter().enumerate() {
        let y = level_y(level, config);
        for id in bucket {
            let x = placement.x.get(id).copied().unwrap_or(0.0);
            positions.insert(*id, Position::new(x, y));
        }
    }

    let fit_view = Bounds::of_nodes(positions.values(), config.node_width, config.node_height)
        .map(|bounds| FitViewRequest {
            bounds: bounds.padded(config.fit_padding),
        });
    tracing::debug!(
        nodes = positions.len(),
        levels = placement.levels.len(),
        available_width = available,
        "organized hierarchy"
    );

    Organized {
        positions,
        levels: levels.into_iter().collect(),
        fit_view,
    }
}

/// Recomputes every position and publishes the full set to `store` at once.
pub fn organize_into(
    employees: &[Employee],
    store: &mut PositionStore,
    config: &LayoutConfig,
) -> Option<FitViewRequest> {
    let organized = organize(employees, config);
    store.replace_all(organized.positions);
    organized.fit_view
}

/// Brings `store` in line with the current employee list.
///
/// Stored positions are left exactly as they are. Nodes without one get
/// their level slot (input order within the level) and are written
/// immediately. Positions of ids no longer present are dropped.
pub fn sync(employees: &[Employee], store: &mut PositionStore, config: &LayoutConfig) -> SyncSummary {
    let hierarchy = Hierarchy::new(employees);
    let dropped = store.retain(|id| hierarchy.contains(id));
    let mut summary = SyncSummary {
        dropped,
        ..SyncSummary::default()
    };
    if hierarchy.is_empty() {
        return summary;
    }

    let seeds = seed_positions(&hierarchy, config);
    for &id in hierarchy.ids() {
        if store.contains(id) {
            summary.kept += 1;
            continue;
        }
        if let Some(seed) = seeds.get(&id) {
            store.set(id, *seed);
            summary.seeded.push(id);
        }
    }

    tracing::debug!(
        kept = summary.kept,
        seeded = summary.seeded.len(),
        dropped = summary.dropped,
        "synced positions"
    );
    summary
}

fn seed_positions(hierarchy: &Hierarchy<'_>, config: &LayoutConfig) -> HashMap<EmployeeId, Position> {
    let levels = compute_levels(hierarchy);
    let buckets = level_buckets(hierarchy, &levels);
    let mut seeds = HashMap::with_capacity(hierarchy.len());
    for (level, bucket) in buckets.iter().enumerate() {
        for (idx, id) in bucket.iter().enumerate() {
            seeds.insert(*id, seed_position(level, idx, bucket.len(), config));
        }
    }
    seeds
}

/// Node boxes and connectors for the rendering surface.
///
/// Nodes missing from `store` are drawn at their seed slot; the store is
/// not modified.
pub fn compute_layout(employees: &[Employee], store: &PositionStore, config: &LayoutConfig) -> Layout {
    let hierarchy = Hierarchy::new(employees);
    let levels = compute_levels(&hierarchy);
    let mut seeds: Option<HashMap<EmployeeId, Position>> = None;

    let mut nodes = BTreeMap::new();
    for &id in hierarchy.ids() {
        let Some(employee) = hierarchy.get(id) else {
            continue;
        };
        let pos = match store.get(id) {
            Some(pos) => pos,
            None => seeds
                .get_or_insert_with(|| seed_positions(&hierarchy, config))
                .get(&id)
                .copied()
                .unwrap_or_default(),
        };
        nodes.insert(
            id,
            NodeLayout {
                id,
                level: levels.get(&id).copied().unwrap_or(0),
                x: pos.x,
                y: pos.y,
                width: config.node_width,
                height: config.node_height,
                name: employee.name.clone(),
                position: employee.position.clone(),
                department: employee.department.clone(),
            },
        );
    }

    let edges = hierarchy
        .edges()
        .into_iter()
        .filter_map(|(manager, subordinate)| {
            let from = nodes.get(&manager)?;
            let to = nodes.get(&subordinate)?;
            Some(EdgeLayout {
                manager,
                subordinate,
                style: config.edge_style,
                path: compute_edge_path(
                    Position::new(from.x, from.y),
                    Position::new(to.x, to.y),
                    config.edge_style,
                    config,
                ),
            })
        })
        .collect();

    let corners: Vec<Position> = nodes
        .values()
        .map(|node| Position::new(node.x, node.y))
        .collect();
    let bounds = Bounds::of_nodes(&corners, config.node_width, config.node_height)
        .unwrap_or_default()
        .padded(config.fit_padding);

    Layout {
        nodes,
        edges,
        bounds,
        width: bounds.width(),
        height: bounds.height(),
    }
}
