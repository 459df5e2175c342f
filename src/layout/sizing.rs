use std::collections::{HashMap, HashSet};

use crate::ir::{EmployeeId, Hierarchy};

/// Subtree width of every node, in slot units.
///
/// A leaf is 1 wide; an internal node is `max(sum(child widths), child count)`.
/// Post-order walk with an explicit stack. A child already on the stack
/// (only possible on unvalidated, cyclic input) counts as a leaf.
pub(super) fn subtree_widths(hierarchy: &Hierarchy<'_>) -> HashMap<EmployeeId, usize> {
    let mut widths: HashMap<EmployeeId, usize> = HashMap::with_capacity(hierarchy.len());
    let mut on_stack: HashSet<EmployeeId> = HashSet::new();

    for &start in hierarchy.ids() {
        if widths.contains_key(&start) {
            continue;
        }
        let mut stack: Vec<(EmployeeId, bool)> = vec![(start, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                on_stack.remove(&id);
                let children = hierarchy.children(id);
                let sum: usize = children
                    .iter()
                    .map(|child| widths.get(child).copied().unwrap_or(1))
                    .sum();
                widths.insert(id, sum.max(children.len()).max(1));
                continue;
            }
            if widths.contains_key(&id) || !on_stack.insert(id) {
                continue;
            }
            stack.push((id, true));
            for &child in hierarchy.children(id).iter().rev() {
                if !widths.contains_key(&child) && !on_stack.contains(&child) {
                    stack.push((child, false));
                }
            }
        }
    }

    widths
}

/// Width of a single subtree; see [`subtree_widths`].
pub fn subtree_width(hierarchy: &Hierarchy<'_>, id: EmployeeId) -> usize {
    if !hierarchy.contains(id) {
        return 0;
    }
    subtree_widths(hierarchy).get(&id).copied().unwrap_or(1)
}

/// Horizontal slots the whole forest needs: the sum of root subtree widths.
pub(super) fn forest_width(
    hierarchy: &Hierarchy<'_>,
    widths: &HashMap<EmployeeId, usize>,
) -> usize {
    hierarchy
        .roots()
        .iter()
        .map(|root| widths.get(root).copied().unwrap_or(1))
        .sum()
}
