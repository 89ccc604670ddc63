//! Scoring module - line-clear points, levels and gravity speed
//!
//! Levels are 1-based: a fresh game is level 1 and every 10 cleared lines
//! add one level. Line-clear points are the classic table multiplied by the
//! level in force when the clear resolves.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
/// 1000ms at level 1, 50ms faster per level, never below 50ms
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 40);
        assert_eq!(calculate_line_score(2, 1), 100);
        assert_eq!(calculate_line_score(3, 1), 300);
        assert_eq!(calculate_line_score(4, 1), 1200);

        assert_eq!(calculate_line_score(1, 5), 40 * 5);
        assert_eq!(calculate_line_score(4, 3), 1200 * 3);
    }

    #[test]
    fn test_more_than_four_lines_scores_nothing() {
        assert_eq!(calculate_line_score(5, 1), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1), 1000);
        assert_eq!(get_drop_interval_ms(2), 950);
        assert_eq!(get_drop_interval_ms(10), 550);
        assert_eq!(get_drop_interval_ms(19), 100);
        assert_eq!(get_drop_interval_ms(20), 50);
        assert_eq!(get_drop_interval_ms(40), 50); // Floor at 50
    }

    #[test]
    fn test_drop_interval_never_increases() {
        let mut prev = get_drop_interval_ms(1);
        for level in 2..60 {
            let cur = get_drop_interval_ms(level);
            assert!(cur <= prev);
            prev = cur;
        }
    }
}
