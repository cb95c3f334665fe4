//! Difficulty progression
//!
//! Level is a pure function of score so it can never drift out of sync.

/// Level for a score: 1 plus the number of thresholds reached.
///
/// With the default thresholds `[50, 150, 300]`:
/// `[0,50) -> 1`, `[50,150) -> 2`, `[150,300) -> 3`, `[300,inf) -> 4`.
pub fn level_for_score(score: u32, thresholds: &[u32]) -> u32 {
    1 + thresholds.iter().filter(|&&t| score >= t).count() as u32
}

/// Fall speed for objects spawned at `level` (steps, not a curve)
pub fn fall_speed(level: u32, base: f32, per_level: f32) -> f32 {
    base + level as f32 * per_level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LEVEL_THRESHOLDS;
    use proptest::prelude::*;

    #[test]
    fn test_threshold_table() {
        let cases = [
            (0, 1),
            (49, 1),
            (50, 2),
            (149, 2),
            (150, 3),
            (299, 3),
            (300, 4),
            (100_000, 4),
        ];
        for (score, level) in cases {
            assert_eq!(level_for_score(score, &LEVEL_THRESHOLDS), level, "score {score}");
        }
    }

    #[test]
    fn test_fall_speed_steps() {
        assert!((fall_speed(1, 1.5, 0.8) - 2.3).abs() < 1e-6);
        assert!((fall_speed(4, 1.5, 0.8) - 4.7).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_level_is_monotonic(a in 0u32..1000, b in 0u32..1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for_score(lo, &LEVEL_THRESHOLDS) <= level_for_score(hi, &LEVEL_THRESHOLDS));
        }
    }
}
