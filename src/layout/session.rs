use crate::config::LayoutConfig;
use crate::ir::{Employee, EmployeeId};
use crate::store::PositionStore;
use crate::validate::{Warning, validate_hierarchy};

use super::types::{FitViewRequest, Layout, Position};
use super::{SyncSummary, compute_layout, organize_into, sync};

/// Owns the validated employee list and the position store between events.
///
/// Every hierarchy mutation goes through validation, then `sync`. Only
/// [`ChartSession::organize`] (or the first load into an empty store)
/// rewrites positions wholesale.
#[derive(Debug, Clone)]
pub struct ChartSession {
    employees: Vec<Employee>,
    warnings: Vec<Warning>,
    store: PositionStore,
    config: LayoutConfig,
}

impl ChartSession {
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_store(config, PositionStore::new())
    }

    pub fn with_store(config: LayoutConfig, store: PositionStore) -> Self {
        Self {
            employees: Vec::new(),
            warnings: Vec::new(),
            store,
            config,
        }
    }

    /// Replaces the employee list. An empty store gets a full organize and
    /// the returned fit-view request; otherwise stored positions are kept.
    pub fn load(&mut self, employees: Vec<Employee>) -> Option<FitViewRequest> {
        let first_layout = self.store.is_empty();
        self.apply(employees);
        if first_layout {
            organize_into(&self.employees, &mut self.store, &self.config)
        } else {
            sync(&self.employees, &mut self.store, &self.config);
            None
        }
    }

    /// Replaces the employee list after an add, edit or delete.
    pub fn update(&mut self, employees: Vec<Employee>) -> SyncSummary {
        self.apply(employees);
        sync(&self.employees, &mut self.store, &self.config)
    }

    /// Adds `employee`, or replaces the record with the same id.
    pub fn upsert_employee(&mut self, employee: Employee) -> SyncSummary {
        let mut employees = self.employees.clone();
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => employees.push(employee),
        }
        self.update(employees)
    }

    /// Removes `id`. Its subordinates lose their manager link and become roots.
    pub fn remove_employee(&mut self, id: EmployeeId) -> SyncSummary {
        let employees = self
            .employees
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.update(employees)
    }

    pub fn organize(&mut self) -> Option<FitViewRequest> {
        organize_into(&self.employees, &mut self.store, &self.config)
    }

    /// Drag-end write from the rendering surface. Unknown ids are ignored.
    pub fn move_node(&mut self, id: EmployeeId, position: Position) -> bool {
        if !self.employees.iter().any(|e| e.id == id) {
            return false;
        }
        self.store.set(id, position);
        true
    }

    pub fn layout(&self) -> Layout {
        compute_layout(&self.employees, &self.store, &self.config)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Warnings from the most recent validation.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn into_store(self) -> PositionStore {
        self.store
    }

    fn apply(&mut self, employees: Vec<Employee>) {
        let report = validate_hierarchy(&employees);
        self.employees = report.employees;
        self.warnings = report.warnings;
    }
}
