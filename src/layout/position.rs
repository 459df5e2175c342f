use crate::config::LayoutConfig;

use super::types::Position;

/// x of slot `index` in a level of `count` slots, centred on x = 0.
pub(super) fn slot_x(index: usize, count: usize, slot_width: f32) -> f32 {
    level_start_x(count, slot_width) + index as f32 * slot_width
}

pub(super) fn level_start_x(count: usize, slot_width: f32) -> f32 {
    -((count.saturating_sub(1)) as f32 * slot_width) / 2.0
}

pub(super) fn level_y(level: usize, config: &LayoutConfig) -> f32 {
    level as f32 * config.level_spacing + config.top_margin
}

/// Width across which the roots are spread.
pub(super) fn root_budget(root_count: usize, available_width: f32, node_width: f32) -> f32 {
    available_width.max(root_count as f32 * node_width * 2.0)
}

/// x of root `index` when `count` roots share `budget` evenly.
pub(super) fn root_x(index: usize, count: usize, budget: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let step = budget / count as f32;
    -budget / 2.0 + step * (index as f32 + 0.5)
}

/// Default position of a node that has no stored position yet: its slot
/// within its level, counting nodes of that level in input order.
pub(super) fn seed_position(
    level: usize,
    index: usize,
    level_count: usize,
    config: &LayoutConfig,
) -> Position {
    Position::new(
        slot_x(index, level_count, config.slot_width),
        level_y(level, config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_centred() {
        assert_eq!(slot_x(0, 1, 200.0), 0.0);
        assert_eq!(slot_x(0, 3, 200.0), -200.0);
        assert_eq!(slot_x(1, 3, 200.0), 0.0);
        assert_eq!(slot_x(2, 3, 200.0), 200.0);
        assert_eq!(slot_x(0, 2, 200.0), -100.0);
    }

    #[test]
    fn levels_step_down_from_margin() {
        let config = LayoutConfig::default();
        assert_eq!(level_y(0, &config), config.top_margin);
        assert_eq!(
            level_y(2, &config),
            2.0 * config.level_spacing + config.top_margin
        );
    }

    #[test]
    fn roots_share_budget_evenly() {
        let budget = root_budget(2, 1000.0, 100.0);
        assert_eq!(budget, 1000.0);
        assert_eq!(root_x(0, 2, budget), -250.0);
        assert_eq!(root_x(1, 2, budget), 250.0);
        assert_eq!(root_x(0, 1, budget), 0.0);
        assert_eq!(root_budget(10, 1000.0, 100.0), 2000.0);
    }
}
