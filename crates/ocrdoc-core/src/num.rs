//! Small numeric helpers shared by geometry, statistics and the snapshot codec.

/// Round to the nearest integer, halves away from zero.
pub fn to_int(value: f64) -> i64 {
    value.round() as i64
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether `a` and `b` are closer than `range` (strict).
pub fn is_in_range(a: f64, b: f64, range: f64) -> bool {
    (a - b).abs() < range
}

/// Trimmed mean: sort, drop `perc_to_remove / 2` of the values from each end
/// and average the rest.
///
/// The number of dropped values per end is `floor(floor(perc * len) / 2)`;
/// when that is below one nothing is dropped and the plain mean is returned.
/// An empty sample yields `0.0`.
pub fn rank(values: &[f64], perc_to_remove: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = (perc_to_remove * sorted.len() as f64) as usize;
    let half_n = (n / 2).min(sorted.len() / 2);
    let kept = &sorted[half_n..sorted.len() - half_n];
    if kept.is_empty() {
        return 0.0;
    }
    kept.iter().sum::<f64>() / kept.len() as f64
}

/// Arithmetic mean; `0.0` for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    rank(values, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_int_rounds_half_away_from_zero() {
        assert_eq!(to_int(2.5), 3);
        assert_eq!(to_int(-2.5), -3);
        assert_eq!(to_int(2.49), 2);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(0.12345), 0.12);
        assert_eq!(round2(99.999), 100.0);
    }

    #[test]
    fn is_in_range_is_strict() {
        assert!(is_in_range(10.0, 11.0, 1.5));
        assert!(!is_in_range(10.0, 11.0, 1.0));
    }

    #[test]
    fn rank_of_ten_values_drops_nothing() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        // 0.15 * 10 = 1.5 -> n = 1 -> half_n = 0
        assert_eq!(rank(&values, 0.15), 5.5);
    }

    #[test]
    fn rank_trims_both_ends() {
        let mut values: Vec<f64> = vec![10.0; 18];
        values.push(1.0);
        values.push(100.0);
        // 0.15 * 20 = 3 -> half_n = 1
        assert_eq!(rank(&values, 0.15), 10.0);
    }

    #[test]
    fn rank_empty() {
        assert_eq!(rank(&[], 0.15), 0.0);
    }

    #[test]
    fn rank_is_order_independent() {
        assert_eq!(rank(&[3.0, 1.0, 2.0], 0.0), 2.0);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }
}
