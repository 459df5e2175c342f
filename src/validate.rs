//! Repair of raw manager links into a forest.
//!
//! Validation is total: every anomaly is fixed by clearing a `manager_id`
//! and reported as a [`Warning`]. Records are never dropped.

use crate::ir::{Employee, EmployeeId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    SelfReference,
    DanglingManager,
    Cycle,
    DuplicateId,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningKind::SelfReference => "self-reference",
            WarningKind::DanglingManager => "dangling-manager",
            WarningKind::Cycle => "cycle",
            WarningKind::DuplicateId => "duplicate-id",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub employee_id: EmployeeId,
    pub kind: WarningKind,
    pub description: String,
}

impl Warning {
    fn new(employee_id: EmployeeId, kind: WarningKind, description: String) -> Self {
        tracing::warn!(employee_id, %kind, "{description}");
        Self {
            employee_id,
            kind,
            description,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] employee {}: {}", self.kind, self.employee_id, self.description)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub employees: Vec<Employee>,
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings_for(&self, id: EmployeeId) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.employee_id == id)
    }
}

/// Repairs `employees` into a well-formed forest.
///
/// Passes run in a fixed order: duplicate ids (reported only), self
/// references, dangling references, then cycles. A cycle is broken by
/// clearing the manager of the node visited last before the repeat was
/// seen.
pub fn validate_hierarchy(employees: &[Employee]) -> ValidationReport {
    let mut repaired = employees.to_vec();
    let mut warnings = Vec::new();

    let mut index: HashMap<EmployeeId, usize> = HashMap::with_capacity(repaired.len());
    for (idx, employee) in repaired.iter().enumerate() {
        if let Some(first) = index.get(&employee.id) {
            warnings.push(Warning::new(
                employee.id,
                WarningKind::DuplicateId,
                format!(
                    "record #{idx} repeats the id of record #{first}; lookups use the first record"
                ),
            ));
        } else {
            index.insert(employee.id, idx);
        }
    }

    for employee in repaired.iter_mut() {
        if employee.manager_id == Some(employee.id) {
            employee.manager_id = None;
            warnings.push(Warning::new(
                employee.id,
                WarningKind::SelfReference,
                "listed as their own manager; manager cleared".to_string(),
            ));
        }
    }

    for employee in repaired.iter_mut() {
        if let Some(manager) = employee.manager_id
            && !index.contains_key(&manager)
        {
            employee.manager_id = None;
            warnings.push(Warning::new(
                employee.id,
                WarningKind::DanglingManager,
                format!("manager {manager} does not exist; manager cleared"),
            ));
        }
    }

    break_cycles(&mut repaired, &index, &mut warnings);

    ValidationReport {
        employees: repaired,
        warnings,
    }
}

fn break_cycles(
    employees: &mut [Employee],
    index: &HashMap<EmployeeId, usize>,
    warnings: &mut Vec<Warning>,
) {
    // Indices whose manager chain is known to end at a root.
    let mut resolved: HashSet<usize> = HashSet::with_capacity(employees.len());
    let mut path: Vec<usize> = Vec::new();
    let mut on_path: HashMap<usize, usize> = HashMap::new();

    for start in 0..employees.len() {
        if resolved.contains(&start) {
            continue;
        }
        path.clear();
        on_path.clear();

        let mut current = start;
        loop {
            if resolved.contains(&current) {
                break;
            }
            if let Some(&cycle_start) = on_path.get(&current) {
                let breaker = path[path.len() - 1];
                let cycle: Vec<EmployeeId> =
                    path[cycle_start..].iter().map(|idx| employees[*idx].id).collect();
                let chain = describe_cycle(&cycle);
                let cleared = employees[breaker].manager_id.take();
                for idx in &path[cycle_start..] {
                    let id = employees[*idx].id;
                    let description = if *idx == breaker {
                        match cleared {
                            Some(manager) => {
                                format!("manager {manager} cleared to break cycle {chain}")
                            }
                            None => format!("manager cleared to break cycle {chain}"),
                        }
                    } else {
                        format!("part of management cycle {chain}")
                    };
                    warnings.push(Warning::new(id, WarningKind::Cycle, description));
                }
                break;
            }
            on_path.insert(current, path.len());
            path.push(current);
            let next = employees[current]
                .manager_id
                .and_then(|manager| index.get(&manager).copied());
            match next {
                Some(next) => current = next,
                None => break,
            }
        }

        resolved.extend(path.iter().copied());
    }
}

fn describe_cycle(cycle: &[EmployeeId]) -> String {
    let mut parts: Vec<String> = cycle.iter().map(|id| id.to_string()).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.to_string());
    }
    parts.join(" -> ")
}
