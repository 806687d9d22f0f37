//! Scoring module - points, level progression and drop speed
//!
//! Classic Nintendo rules:
//! - a clear of N lines at once scores `LINE_SCORES[N] * (level + 1)`;
//! - the first level-up needs a number of lines derived from the start level,
//!   every later one 10 more;
//! - gravity follows the NES frames-per-drop curve, clamped at level 29.

use crate::types::{
    FRAMES_PER_DROP, LEVEL_UP_FLOOR_LINES, LINES_PER_LEVEL, LINE_SCORES, SECONDS_PER_FRAME,
};

/// Calculate line clear score
/// lines: number of lines cleared by one lock (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u64 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    u64::from(LINE_SCORES[lines]) * (u64::from(level) + 1)
}

/// Cumulative line count at which `level` advances to `level + 1`
///
/// Base threshold: `min(max(100, start*10 - 50), start*10 - 10)`, clamped to
/// be non-negative. Every level already gained above the start level adds 10.
pub fn level_up_threshold(start_level: u32, level: u32) -> u64 {
    let start = i64::from(start_level) * 10;
    let max_condition = start - 50;
    let min_condition = start - 10;
    let first = LEVEL_UP_FLOOR_LINES.max(max_condition).min(min_condition).max(0);

    let gained = i64::from(level.saturating_sub(start_level));
    (first + LINES_PER_LEVEL * gained) as u64
}

/// Whether a line-clear event that brought the total to `cleared_lines`
/// should raise the level by one
pub fn should_level_up(cleared_lines: u64, start_level: u32, level: u32) -> bool {
    cleared_lines >= level_up_threshold(start_level, level)
}

/// Frames per gravity drop at `level`
pub fn frames_per_drop(level: u32) -> u8 {
    let last = FRAMES_PER_DROP.len() - 1;
    FRAMES_PER_DROP[(level as usize).min(last)]
}

/// Seconds between gravity drops at `level`
pub fn seconds_per_drop(level: u32) -> f64 {
    f64::from(frames_per_drop(level)) * SECONDS_PER_FRAME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 4
        assert_eq!(calculate_line_score(3, 4), 1500);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_line_score_exact_at_huge_levels() {
        // Past u32::MAX / 1200
        assert_eq!(calculate_line_score(4, 4_000_000), 1200 * 4_000_001);
        assert_eq!(
            calculate_line_score(4, u32::MAX),
            1200 * (u64::from(u32::MAX) + 1)
        );
    }

    #[test]
    fn test_out_of_table_counts_score_nothing() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 3), 0);
    }

    #[test]
    fn test_first_threshold_from_start_level() {
        // start 0: min(max(100, -50), -10) = -10, clamped to 0
        assert_eq!(level_up_threshold(0, 0), 0);
        // start 1: min(max(100, -40), 0) = 0
        assert_eq!(level_up_threshold(1, 1), 0);
        // start 10: min(max(100, 50), 90) = 90
        assert_eq!(level_up_threshold(10, 10), 90);
        // start 15: min(max(100, 100), 140) = 100
        assert_eq!(level_up_threshold(15, 15), 100);
        // start 20: min(max(100, 150), 190) = 150
        assert_eq!(level_up_threshold(20, 20), 150);
    }

    #[test]
    fn test_threshold_grows_ten_per_gained_level() {
        assert_eq!(level_up_threshold(0, 1), 10);
        assert_eq!(level_up_threshold(0, 5), 50);
        assert_eq!(level_up_threshold(10, 12), 110);
    }

    #[test]
    fn test_should_level_up() {
        assert!(should_level_up(1, 0, 0));
        assert!(!should_level_up(9, 0, 1));
        assert!(should_level_up(10, 0, 1));
        assert!(!should_level_up(89, 10, 10));
        assert!(should_level_up(90, 10, 10));
    }

    #[test]
    fn test_drop_speed_curve() {
        assert_eq!(frames_per_drop(0), 48);
        assert_eq!(frames_per_drop(9), 6);
        assert_eq!(frames_per_drop(29), 1);
        assert_eq!(frames_per_drop(200), 1); // clamped

        assert!((seconds_per_drop(0) - 0.8).abs() < 1e-9);
        assert!((seconds_per_drop(29) - 1.0 / 60.0).abs() < 1e-9);
    }
}
