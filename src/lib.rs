#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod store;
pub mod theme;
pub mod validate;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Employee, EmployeeId, Hierarchy};
pub use layout::{
    ChartSession, EdgePath, EdgeStyle, FitViewRequest, Layout, Organized, Position, SyncSummary,
    assign_levels, compute_edge_path, compute_layout, organize, organize_into, subtree_width, sync,
};
pub use render::render_svg;
pub use store::{PositionStore, StoreError};
pub use theme::Theme;
pub use validate::{ValidationReport, Warning, WarningKind, validate_hierarchy};
