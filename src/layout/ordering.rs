use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::{EmployeeId, Hierarchy};

use super::position::{root_budget, root_x};

/// Ordered levels plus the x coordinate chosen for every node.
#[derive(Debug, Clone, Default)]
pub(super) struct LevelPlacement {
    pub(super) levels: Vec<Vec<EmployeeId>>,
    pub(super) x: HashMap<EmployeeId, f32>,
}

/// Horizontal band reserved for one subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f32,
    width: f32,
}

impl Span {
    fn center(&self) -> f32 {
        self.start + self.width / 2.0
    }
}

/// Orders every level and assigns x coordinates.
///
/// Level 0 keeps input order and spreads across `available_width`. Every
/// root owns a span of `subtree width * slot_width`; a manager's span is cut
/// into consecutive child spans sized by their subtree widths, and each node
/// sits at the centre of its span. An only child inherits its manager's span
/// and x unchanged. Deeper levels sort by their manager's x (ties by input
/// order), which is also the order of their spans. The top-down sweep runs
/// `order_passes` times; later passes sort against the settled coordinates.
pub(super) fn place_levels(
    hierarchy: &Hierarchy<'_>,
    buckets: &[Vec<EmployeeId>],
    levels: &HashMap<EmployeeId, usize>,
    widths: &HashMap<EmployeeId, usize>,
    available_width: f32,
    config: &LayoutConfig,
) -> LevelPlacement {
    let mut placement = LevelPlacement {
        levels: buckets.to_vec(),
        x: HashMap::with_capacity(hierarchy.len()),
    };
    let Some(roots) = placement.levels.first() else {
        return placement;
    };

    let mut spans = root_spans(roots, widths, available_width, config);
    for (id, span) in &spans {
        placement.x.insert(*id, span.center());
    }

    for pass in 0..config.order_passes.max(1) {
        for level in 1..placement.levels.len() {
            split_spans(
                &placement.levels[level - 1],
                level,
                hierarchy,
                levels,
                widths,
                &mut spans,
                &mut placement.x,
            );
            let bucket = &mut placement.levels[level];
            order_by_manager(bucket, hierarchy, &placement.x);
            tracing::trace!(pass, level, nodes = bucket.len(), "ordered level");
        }
    }

    placement
}

/// Spans of the level-0 nodes.
///
/// Roots are spread evenly across the budget when neighbouring subtrees fit
/// the even step; otherwise the spans are packed side by side, proportional
/// to subtree width and centred on x = 0.
fn root_spans(
    roots: &[EmployeeId],
    widths: &HashMap<EmployeeId, usize>,
    available_width: f32,
    config: &LayoutConfig,
) -> HashMap<EmployeeId, Span> {
    let count = roots.len();
    if count == 0 {
        return HashMap::new();
    }
    let width_of = |id: &EmployeeId| widths.get(id).copied().unwrap_or(1).max(1) as f32;
    let budget = root_budget(count, available_width, config.node_width);
    let step = budget / count as f32;
    let even_fits = roots
        .windows(2)
        .all(|pair| (width_of(&pair[0]) + width_of(&pair[1])) * config.slot_width / 2.0 <= step);

    if even_fits {
        return roots
            .iter()
            .enumerate()
            .map(|(idx, id)| {
                let width = width_of(id) * config.slot_width;
                let center = root_x(idx, count, budget);
                (*id, Span { start: center - width / 2.0, width })
            })
            .collect();
    }

    let total: f32 = roots.iter().map(width_of).sum();
    let unit = (budget / total).max(config.slot_width);
    let mut start = -(unit * total) / 2.0;
    roots
        .iter()
        .map(|id| {
            let span = Span { start, width: width_of(id) * unit };
            start += span.width;
            (*id, span)
        })
        .collect()
}

/// Cuts the span of every node on `managers` into spans for its subordinates
/// on `level`, in input order.
fn split_spans(
    managers: &[EmployeeId],
    level: usize,
    hierarchy: &Hierarchy<'_>,
    levels: &HashMap<EmployeeId, usize>,
    widths: &HashMap<EmployeeId, usize>,
    spans: &mut HashMap<EmployeeId, Span>,
    x: &mut HashMap<EmployeeId, f32>,
) {
    for &manager in managers {
        let Some(span) = spans.get(&manager).copied() else {
            continue;
        };
        let children = hierarchy.children(manager);
        if let [child] = children {
            if levels.get(child) == Some(&level)
                && let Some(manager_x) = x.get(&manager).copied()
            {
                spans.insert(*child, span);
                x.insert(*child, manager_x);
            }
            continue;
        }

        let below: Vec<EmployeeId> = children
            .iter()
            .copied()
            .filter(|child| levels.get(child) == Some(&level))
            .collect();
        let total: usize = below
            .iter()
            .map(|child| widths.get(child).copied().unwrap_or(1).max(1))
            .sum();
        if total == 0 {
            continue;
        }
        let unit = span.width / total as f32;
        let mut start = span.start;
        for child in below {
            let width = widths.get(&child).copied().unwrap_or(1).max(1) as f32 * unit;
            let child_span = Span { start, width };
            start += width;
            spans.insert(child, child_span);
            x.insert(child, child_span.center());
        }
    }
}

fn order_by_manager(
    bucket: &mut [EmployeeId],
    hierarchy: &Hierarchy<'_>,
    x: &HashMap<EmployeeId, f32>,
) {
    let manager_x = |id: EmployeeId| -> f32 {
        hierarchy
            .manager_of(id)
            .and_then(|manager| x.get(&manager).copied())
            .unwrap_or(0.0)
    };
    bucket.sort_by(|a, b| {
        manager_x(*a)
            .total_cmp(&manager_x(*b))
            .then_with(|| hierarchy.input_index(*a).cmp(&hierarchy.input_index(*b)))
    });
}
