use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::ir::{EmployeeId, Hierarchy};

/// Breadth-first depth of every node, roots at level 0.
///
/// All roots seed the queue together. Nodes the traversal cannot reach
/// (members of an unrepaired cycle) are promoted to roots in input order and
/// the traversal resumes, so every node gets exactly one level.
pub(super) fn compute_levels(hierarchy: &Hierarchy<'_>) -> HashMap<EmployeeId, usize> {
    let mut levels: HashMap<EmployeeId, usize> = HashMap::with_capacity(hierarchy.len());
    let mut queue: VecDeque<(EmployeeId, usize)> = VecDeque::new();

    for &root in hierarchy.roots() {
        levels.insert(root, 0);
        queue.push_back((root, 0));
    }
    drain(hierarchy, &mut levels, &mut queue);

    if levels.len() < hierarchy.len() {
        for &id in hierarchy.ids() {
            if levels.contains_key(&id) {
                continue;
            }
            tracing::debug!(employee_id = id, "unreachable node promoted to root");
            levels.insert(id, 0);
            queue.push_back((id, 0));
            drain(hierarchy, &mut levels, &mut queue);
        }
    }

    levels
}

fn drain(
    hierarchy: &Hierarchy<'_>,
    levels: &mut HashMap<EmployeeId, usize>,
    queue: &mut VecDeque<(EmployeeId, usize)>,
) {
    while let Some((id, level)) = queue.pop_front() {
        for &child in hierarchy.children(id) {
            if levels.contains_key(&child) {
                continue;
            }
            levels.insert(child, level + 1);
            queue.push_back((child, level + 1));
        }
    }
}

/// Buckets node ids by level, each bucket in input order.
pub(super) fn level_buckets(
    hierarchy: &Hierarchy<'_>,
    levels: &HashMap<EmployeeId, usize>,
) -> Vec<Vec<EmployeeId>> {
    let depth = levels.values().copied().max().map_or(0, |max| max + 1);
    let mut buckets: Vec<Vec<EmployeeId>> = vec![Vec::new(); depth];
    for &id in hierarchy.ids() {
        if let Some(level) = levels.get(&id) {
            buckets[*level].push(id);
        }
    }
    buckets
}

/// Level of every node of `hierarchy`.
pub fn assign_levels(hierarchy: &Hierarchy<'_>) -> BTreeMap<EmployeeId, usize> {
    compute_levels(hierarchy).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Employee;

    #[test]
    fn levels_follow_manager_depth() {
        let employees = vec![
            Employee::new(1, None),
            Employee::new(2, Some(1)),
            Employee::new(3, Some(2)),
            Employee::new(4, None),
            Employee::new(5, Some(4)),
        ];
        let hierarchy = Hierarchy::new(&employees);
        let levels = assign_levels(&hierarchy);
        assert_eq!(levels[&1], 0);
        assert_eq!(levels[&2], 1);
        assert_eq!(levels[&3], 2);
        assert_eq!(levels[&4], 0);
        assert_eq!(levels[&5], 1);
    }

    #[test]
    fn buckets_keep_input_order() {
        let employees = vec![
            Employee::new(1, None),
            Employee::new(9, Some(1)),
            Employee::new(2, None),
            Employee::new(3, Some(2)),
        ];
        let hierarchy = Hierarchy::new(&employees);
        let levels = compute_levels(&hierarchy);
        assert_eq!(
            level_buckets(&hierarchy, &levels),
            vec![vec![1, 2], vec![9, 3]]
        );
    }

    #[test]
    fn cyclic_input_still_gets_levels() {
        let employees = vec![
            Employee::new(1, Some(2)),
            Employee::new(2, Some(1)),
            Employee::new(3, Some(2)),
        ];
        let hierarchy = Hierarchy::new(&employees);
        let levels = assign_levels(&hierarchy);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[&1], 0);
        assert_eq!(levels[&2], 1);
        assert_eq!(levels[&3], 2);
    }

    #[test]
    fn empty_hierarchy_has_no_levels() {
        let hierarchy = Hierarchy::new(&[]);
        assert!(assign_levels(&hierarchy).is_empty());
        assert!(level_buckets(&hierarchy, &HashMap::new()).is_empty());
    }
}
