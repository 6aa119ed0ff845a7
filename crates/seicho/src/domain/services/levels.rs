//! Level thresholds - cumulative XP breakpoints for the 20 levels
//!
//! The table is fixed; XP beyond the last threshold still accrues but
//! produces no further level increase.

use serde::Serialize;

/// Cumulative XP required to reach each level, index 0 = level 1.
/// Strictly increasing; the level-1 floor is 0.
pub const LEVEL_THRESHOLDS: [u64; 20] = [
    0, 100, 250, 450, 700, 1000, 1350, 1750, 2200, 2700, 3250, 3850, 4500, 5200, 5950, 6750, 7600,
    8500, 9450, 10450,
];

/// Highest level the table defines
pub const MAX_LEVEL: u32 = LEVEL_THRESHOLDS.len() as u32;

/// Position within the current level band
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LevelProgress {
    /// XP floor of the current level
    pub current_floor: u64,
    /// XP floor of the next level (equal to `current_floor` at max level)
    pub next_floor: u64,
    /// Percent of the band completed, clamped to [0, 100]
    pub percent: f64,
}

/// 1-based level for a cumulative XP total. Never fails:
/// `level_for(0) == 1` and the result saturates at [`MAX_LEVEL`].
pub fn level_for(total_xp: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| threshold <= total_xp)
        .map(|i| i as u32 + 1)
        .unwrap_or(1)
}

/// Progress within the current level band.
///
/// At the final level there is no next threshold; the percent clamps
/// to 100 rather than dividing by zero.
pub fn progress_within(total_xp: u64) -> LevelProgress {
    let level = level_for(total_xp) as usize;
    let current_floor = LEVEL_THRESHOLDS[level - 1];

    match LEVEL_THRESHOLDS.get(level) {
        Some(&next_floor) => {
            let span = next_floor - current_floor;
            let earned = total_xp - current_floor;
            let percent = (earned as f64 / span as f64 * 100.0).clamp(0.0, 100.0);
            LevelProgress {
                current_floor,
                next_floor,
                percent,
            }
        }
        None => LevelProgress {
            current_floor,
            next_floor: current_floor,
            percent: 100.0,
        },
    }
}

/// XP remaining until the next level, 0 at max level
pub fn xp_to_next(total_xp: u64) -> u64 {
    let level = level_for(total_xp) as usize;
    match LEVEL_THRESHOLDS.get(level) {
        Some(&next_floor) => next_floor.saturating_sub(total_xp),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_strictly_increasing() {
        for pair in LEVEL_THRESHOLDS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(LEVEL_THRESHOLDS[0], 0);
    }

    #[test]
    fn test_level_for_floor_values() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(105), 2);
        assert_eq!(level_for(250), 3);
    }

    #[test]
    fn test_level_for_saturates_at_max() {
        assert_eq!(level_for(LEVEL_THRESHOLDS[19]), MAX_LEVEL);
        assert_eq!(level_for(u64::MAX), MAX_LEVEL);
    }

    #[test]
    fn test_level_for_non_decreasing() {
        let mut last = 0;
        for xp in (0..12_000).step_by(7) {
            let level = level_for(xp);
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn test_each_threshold_reaches_its_level() {
        for (i, &threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
            assert_eq!(level_for(threshold), i as u32 + 1);
        }
    }

    #[test]
    fn test_progress_within_band() {
        let progress = progress_within(50);
        assert_eq!(progress.current_floor, 0);
        assert_eq!(progress.next_floor, 100);
        assert!((progress.percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_at_zero() {
        let progress = progress_within(0);
        assert_eq!(progress.percent, 0.0);
    }

    #[test]
    fn test_progress_clamped_at_max_level() {
        let progress = progress_within(LEVEL_THRESHOLDS[19] + 5_000);
        assert_eq!(progress.current_floor, progress.next_floor);
        assert_eq!(progress.percent, 100.0);
    }

    #[test]
    fn test_progress_always_in_range() {
        for xp in (0..20_000).step_by(13) {
            let percent = progress_within(xp).percent;
            assert!((0.0..=100.0).contains(&percent), "xp={} -> {}", xp, percent);
        }
    }

    #[test]
    fn test_xp_to_next() {
        assert_eq!(xp_to_next(0), 100);
        assert_eq!(xp_to_next(105), 145);
        assert_eq!(xp_to_next(LEVEL_THRESHOLDS[19]), 0);
        assert_eq!(xp_to_next(LEVEL_THRESHOLDS[19] + 999), 0);
    }
}
