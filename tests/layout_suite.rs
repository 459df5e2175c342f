use std::path::Path;

use orgchart_layout::{
    ChartSession, Employee, EmployeeId, LayoutConfig, Position, PositionStore, Theme, WarningKind,
    compute_layout, organize, render_svg, sync, validate_hierarchy,
};

fn fixture(name: &str) -> Vec<Employee> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let raw = std::fs::read_to_string(&path).expect("fixture read failed");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("fixture is not JSON");
    let list = match value {
        serde_json::Value::Object(mut map) => map.remove("employees").expect("missing employees"),
        other => other,
    };
    serde_json::from_value(list).expect("fixture is not an employee list")
}

fn employees(links: &[(EmployeeId, Option<EmployeeId>)]) -> Vec<Employee> {
    links
        .iter()
        .map(|(id, manager)| Employee::new(*id, *manager))
        .collect()
}

#[test]
fn scenario_a_two_reports_keep_input_order() {
    let config = LayoutConfig::default();
    let list = employees(&[(1, None), (2, Some(1)), (3, Some(1))]);
    let first = organize(&list, &config);
    let second = organize(&list, &config);
    assert_eq!(first.levels[&1], 0);
    assert_eq!(first.levels[&2], 1);
    assert_eq!(first.levels[&3], 1);
    assert!(first.positions[&2].x < first.positions[&3].x);
    assert_eq!(first.positions, second.positions);
}

#[test]
fn scenario_b_single_child_is_aligned() {
    let organized = organize(&employees(&[(1, None), (2, Some(1))]), &LayoutConfig::default());
    assert_eq!(organized.positions[&2].x, organized.positions[&1].x);
}

#[test]
fn scenario_c_cycle_is_broken() {
    let report = validate_hierarchy(&employees(&[(1, Some(2)), (2, Some(1))]));
    assert!(report.employees.iter().any(|e| e.manager_id.is_none()));
    assert!(report.warnings.iter().any(|w| w.kind == WarningKind::Cycle));
}

#[test]
fn scenario_d_dangling_reference_is_cleared() {
    let report = validate_hierarchy(&employees(&[(1, Some(99))]));
    assert_eq!(report.employees[0].id, 1);
    assert_eq!(report.employees[0].manager_id, None);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].kind, WarningKind::DanglingManager);
}

#[test]
fn corrupt_fixture_repairs_to_forest() {
    let report = validate_hierarchy(&fixture("corrupt.json"));
    let manager = |id: EmployeeId| {
        report
            .employees
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.manager_id)
    };
    assert_eq!(manager(2), None);
    assert_eq!(manager(3), None);
    assert_eq!(manager(4), Some(5));
    assert_eq!(manager(5), Some(6));
    assert_eq!(manager(6), None);
    assert_eq!(manager(7), Some(6));
    assert_eq!(manager(8), Some(1));

    let kinds: Vec<WarningKind> = report.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WarningKind::SelfReference,
            WarningKind::DanglingManager,
            WarningKind::Cycle,
            WarningKind::Cycle,
            WarningKind::Cycle,
        ]
    );
}

#[test]
fn leadership_fixture_has_no_overlap_within_levels() {
    let config = LayoutConfig::default();
    let list = fixture("leadership.json");
    let organized = organize(&list, &config);
    assert_eq!(organized.positions.len(), list.len());

    let mut by_level: std::collections::BTreeMap<usize, Vec<f32>> = Default::default();
    for (id, level) in &organized.levels {
        by_level.entry(*level).or_default().push(organized.positions[id].x);
    }
    for xs in by_level.values_mut() {
        xs.sort_by(f32::total_cmp);
        for pair in xs.windows(2) {
            assert!(pair[1] - pair[0] >= config.node_width, "nodes overlap: {pair:?}");
        }
    }
    // Grace (2) manages two people, Barbara (5) only Edsger (6).
    assert_eq!(organized.positions[&6].x, organized.positions[&5].x);
}

#[test]
fn wide_team_between_single_reports_stays_ordered() {
    let config = LayoutConfig::default();
    let list = employees(&[
        (1, None),
        (2, Some(1)),
        (3, Some(1)),
        (4, Some(1)),
        (20, Some(2)),
        (30, Some(3)),
        (31, Some(3)),
        (32, Some(3)),
        (40, Some(4)),
    ]);
    let organized = organize(&list, &config);
    let x = |id: EmployeeId| organized.positions[&id].x;
    assert_eq!(x(20), x(2));
    assert_eq!(x(40), x(4));
    assert!(x(32) < x(40));
    assert!(x(40) - x(32) >= config.node_width);
    assert!(x(30) - x(20) >= config.node_width);
}

#[test]
fn sync_after_edit_preserves_drag_and_seeds_new_hire() {
    let config = LayoutConfig::default();
    let mut list = fixture("leadership.json");
    let mut store = organize(&list, &config).into_store();
    let dragged = Position::new(1234.0, -56.0);
    store.set(4, dragged);

    list.push(Employee::new(9, Some(3)).with_details("Annie Easley", "Analyst", "Finance"));
    list.retain(|e| e.id != 8);
    let summary = sync(&list, &mut store, &config);

    assert_eq!(summary.seeded, vec![9]);
    assert_eq!(summary.dropped, 1);
    assert_eq!(store.get(4), Some(dragged));
    assert!(store.get(9).is_some());
    assert!(store.get(8).is_none());
}

#[test]
fn session_renders_fixture() {
    let mut session = ChartSession::new(LayoutConfig::default());
    assert!(session.load(fixture("leadership.json")).is_some());
    let layout = session.layout();
    assert_eq!(layout.edges.len(), 7);
    let svg = render_svg(&layout, &Theme::modern(), session.config());
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("Grace Hopper"));
}

#[test]
fn layout_tolerates_unvalidated_cycles() {
    let config = LayoutConfig::default();
    let list = employees(&[(1, Some(2)), (2, Some(1)), (3, Some(3))]);
    let store = PositionStore::new();
    let layout = compute_layout(&list, &store, &config);
    assert_eq!(layout.nodes.len(), 3);
    let organized = organize(&list, &config);
    assert_eq!(organized.positions.len(), 3);
}
