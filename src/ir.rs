use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub type EmployeeId = i64;

/// One record of the org chart.
///
/// `extra` carries every field the layout does not understand (email, phone,
/// custom attributes). It is flattened on (de)serialization so those fields
/// round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Employee {
    pub fn new(id: EmployeeId, manager_id: Option<EmployeeId>) -> Self {
        Self {
            id,
            name: format!("Employee {id}"),
            position: String::new(),
            department: String::new(),
            manager_id,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_details(mut self, name: &str, position: &str, department: &str) -> Self {
        self.name = name.to_string();
        self.position = position.to_string();
        self.department = department.to_string();
        self
    }

    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }
}

/// Read-only index over an employee list.
///
/// Built on every layout pass. Lookups are first-wins: a record whose id
/// repeats an earlier one is not indexed. A manager reference that is
/// missing or points at the node itself makes that node a root, so the
/// index is usable before validation has run.
#[derive(Debug, Clone)]
pub struct Hierarchy<'a> {
    employees: &'a [Employee],
    order: Vec<EmployeeId>,
    index: HashMap<EmployeeId, usize>,
    parent: HashMap<EmployeeId, EmployeeId>,
    children: HashMap<EmployeeId, Vec<EmployeeId>>,
    roots: Vec<EmployeeId>,
}

impl<'a> Hierarchy<'a> {
    pub fn new(employees: &'a [Employee]) -> Self {
        let mut index = HashMap::with_capacity(employees.len());
        let mut order = Vec::with_capacity(employees.len());
        for (idx, employee) in employees.iter().enumerate() {
            if !index.contains_key(&employee.id) {
                index.insert(employee.id, idx);
                order.push(employee.id);
            }
        }

        let mut parent = HashMap::new();
        let mut children: HashMap<EmployeeId, Vec<EmployeeId>> = HashMap::new();
        let mut roots = Vec::new();
        for id in &order {
            let employee = &employees[index[id]];
            match employee.manager_id {
                Some(manager) if manager != *id && index.contains_key(&manager) => {
                    parent.insert(*id, manager);
                    children.entry(manager).or_default().push(*id);
                }
                _ => roots.push(*id),
            }
        }

        Self {
            employees,
            order,
            index,
            parent,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct ids in input order.
    pub fn ids(&self) -> &[EmployeeId] {
        &self.order
    }

    pub fn roots(&self) -> &[EmployeeId] {
        &self.roots
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: EmployeeId) -> Option<&'a Employee> {
        self.index.get(&id).map(|idx| &self.employees[*idx])
    }

    /// Position of `id` in the input list, used as the stable tie-breaker.
    pub fn input_index(&self, id: EmployeeId) -> usize {
        self.index.get(&id).copied().unwrap_or(usize::MAX)
    }

    pub fn manager_of(&self, id: EmployeeId) -> Option<EmployeeId> {
        self.parent.get(&id).copied()
    }

    /// Direct subordinates in input order.
    pub fn children(&self, id: EmployeeId) -> &[EmployeeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Manager→subordinate pairs in subordinate input order.
    pub fn edges(&self) -> Vec<(EmployeeId, EmployeeId)> {
        self.order
            .iter()
            .filter_map(|id| self.manager_of(*id).map(|manager| (manager, *id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_children_in_input_order() {
        let employees = vec![
            Employee::new(1, None),
            Employee::new(3, Some(1)),
            Employee::new(2, Some(1)),
        ];
        let hierarchy = Hierarchy::new(&employees);
        assert_eq!(hierarchy.roots(), &[1]);
        assert_eq!(hierarchy.children(1), &[3, 2]);
        assert_eq!(hierarchy.edges(), vec![(1, 3), (1, 2)]);
    }

    #[test]
    fn unresolved_managers_become_roots() {
        let employees = vec![Employee::new(1, Some(1)), Employee::new(2, Some(99))];
        let hierarchy = Hierarchy::new(&employees);
        assert_eq!(hierarchy.roots(), &[1, 2]);
        assert!(hierarchy.edges().is_empty());
    }

    #[test]
    fn duplicate_ids_are_first_wins() {
        let employees = vec![
            Employee::new(1, None).with_details("First", "", ""),
            Employee::new(1, None).with_details("Second", "", ""),
        ];
        let hierarchy = Hierarchy::new(&employees);
        assert_eq!(hierarchy.len(), 1);
        assert_eq!(hierarchy.get(1).map(|e| e.name.as_str()), Some("First"));
    }

    #[test]
    fn extra_fields_round_trip() {
        let json = r#"{"id":7,"name":"Ada","managerId":null,"email":"ada@example.com"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.manager_id, None);
        assert_eq!(
            employee.extra.get("email").and_then(|v| v.as_str()),
            Some("ada@example.com")
        );
        let back = serde_json::to_value(&employee).unwrap();
        assert_eq!(back["email"], "ada@example.com");
        assert_eq!(back["managerId"], serde_json::Value::Null);
    }
}
