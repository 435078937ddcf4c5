// outliers.rs - Mean/std classification of reference-vs-alternative differences

/// Classification of one metric's point population for one individual
///
/// The three masks are mutually exclusive and collectively exhaustive over the
/// input length. `mean_diff` and `std_diff` are exposed so downstream
/// rendering can recompute the +-2/3/4 std bands consistently.
#[derive(Debug, Clone)]
pub struct OutlierStats {
    pub mean_diff: f64,
    pub std_diff: f64,
    pub upper: Vec<bool>,
    pub lower: Vec<bool>,
    pub normal: Vec<bool>,
}

impl OutlierStats {
    pub fn total_points(&self) -> usize {
        self.normal.len()
    }

    pub fn upper_count(&self) -> usize {
        self.upper.iter().filter(|&&b| b).count()
    }

    pub fn lower_count(&self) -> usize {
        self.lower.iter().filter(|&&b| b).count()
    }

    /// Outlier share of the population, guarded against an empty population
    pub fn percentage(&self, count: usize) -> f64 {
        let total = self.total_points();
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    }
}

/// Classify every ref/alt point as normal, upper outlier or lower outlier
///
/// diff[i] = reference[i] - alternative[i]; a point is an upper outlier iff
/// diff > mean + 2*std and a lower outlier iff diff < mean - 2*std, both
/// strict. std is the population standard deviation, so a constant diff
/// vector yields std = 0 and no outliers at all.
///
/// Unequal input lengths are truncated to the shorter side.
pub fn classify_outliers(ref_values: &[f64], alt_values: &[f64]) -> OutlierStats {
    let n = ref_values.len().min(alt_values.len());
    let diff: Vec<f64> = (0..n).map(|i| ref_values[i] - alt_values[i]).collect();

    let (mean_diff, std_diff) = if n == 0 {
        (0.0, 0.0)
    } else {
        let mean = diff.iter().sum::<f64>() / n as f64;
        let variance = diff.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, variance.sqrt())
    };

    let upper_bound = mean_diff + 2.0 * std_diff;
    let lower_bound = mean_diff - 2.0 * std_diff;

    let upper: Vec<bool> = diff.iter().map(|&d| d > upper_bound).collect();
    let lower: Vec<bool> = diff.iter().map(|&d| d < lower_bound).collect();
    let normal: Vec<bool> = upper
        .iter()
        .zip(lower.iter())
        .map(|(&u, &l)| !u && !l)
        .collect();

    OutlierStats {
        mean_diff,
        std_diff,
        upper,
        lower,
        normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_all_normal() {
        let values = vec![5.0, -3.0, 12.5, 0.0];
        let stats = classify_outliers(&values, &values);

        assert_eq!(stats.mean_diff, 0.0);
        assert_eq!(stats.std_diff, 0.0);
        assert_eq!(stats.upper_count(), 0);
        assert_eq!(stats.lower_count(), 0);
        assert!(stats.normal.iter().all(|&b| b));
    }

    #[test]
    fn test_constant_nonzero_diff_no_outliers() {
        let ref_values = vec![10.0, 20.0, 30.0];
        let alt_values = vec![7.0, 17.0, 27.0];
        let stats = classify_outliers(&ref_values, &alt_values);

        assert_eq!(stats.mean_diff, 3.0);
        assert_eq!(stats.std_diff, 0.0);
        assert!(stats.normal.iter().all(|&b| b));
    }

    #[test]
    fn test_boundary_point_is_not_an_outlier() {
        // diff = [0, 0, 0, 0, 100]: mean = 20, population std = 40, so the
        // spike lands exactly on mean + 2*std = 100. Strict comparison keeps
        // it normal.
        let ref_values = vec![10.0, 10.0, 10.0, 10.0, 100.0];
        let alt_values = vec![10.0, 10.0, 10.0, 10.0, 0.0];
        let stats = classify_outliers(&ref_values, &alt_values);

        assert!((stats.mean_diff - 20.0).abs() < 1e-9);
        assert!((stats.std_diff - 40.0).abs() < 1e-9);
        assert_eq!(stats.upper_count(), 0);
        assert_eq!(stats.lower_count(), 0);
        assert!(stats.normal[4]);
    }

    #[test]
    fn test_strictly_above_threshold_is_upper_outlier() {
        // diff = [0, 0, 0, 0, 0, 60]: mean = 10, population std = 10*sqrt(5),
        // mean + 2*std ~ 54.7 < 60, so the spike is an upper outlier.
        let ref_values = vec![10.0, 10.0, 10.0, 10.0, 10.0, 70.0];
        let alt_values = vec![10.0, 10.0, 10.0, 10.0, 10.0, 10.0];
        let stats = classify_outliers(&ref_values, &alt_values);

        assert_eq!(stats.upper_count(), 1);
        assert!(stats.upper[5]);
        assert!(!stats.normal[5]);
        assert_eq!(stats.lower_count(), 0);
    }

    #[test]
    fn test_lower_outlier() {
        let ref_values = vec![10.0, 10.0, 10.0, 10.0, 10.0, 10.0];
        let alt_values = vec![10.0, 10.0, 10.0, 10.0, 10.0, 70.0];
        let stats = classify_outliers(&ref_values, &alt_values);

        assert_eq!(stats.lower_count(), 1);
        assert!(stats.lower[5]);
        assert_eq!(stats.upper_count(), 0);
    }

    #[test]
    fn test_masks_are_exclusive_and_exhaustive() {
        let ref_values = vec![1.0, 2.0, 50.0, -40.0, 3.0, 2.0, 1.0, 2.0];
        let alt_values = vec![1.5, 2.0, 1.0, 1.0, 2.0, 2.5, 1.0, 2.0];
        let stats = classify_outliers(&ref_values, &alt_values);

        for i in 0..stats.total_points() {
            let flags = [stats.upper[i], stats.lower[i], stats.normal[i]];
            assert_eq!(flags.iter().filter(|&&b| b).count(), 1);
        }
    }

    #[test]
    fn test_empty_input_is_safe() {
        let stats = classify_outliers(&[], &[]);
        assert_eq!(stats.total_points(), 0);
        assert_eq!(stats.mean_diff, 0.0);
        assert_eq!(stats.std_diff, 0.0);
        assert_eq!(stats.percentage(0), 0.0);
    }

    #[test]
    fn test_percentage_reporting() {
        let ref_values = vec![10.0, 10.0, 10.0, 10.0, 10.0, 70.0];
        let alt_values = vec![10.0; 6];
        let stats = classify_outliers(&ref_values, &alt_values);
        let pct = stats.percentage(stats.upper_count());
        assert!((pct - 100.0 / 6.0).abs() < 1e-9);
    }
}
