//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (n denominator).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Calculate the autocorrelation at a given lag.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    if values.len() <= lag {
        return f64::NAN;
    }
    let m = mean(values);

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (i, &x) in values.iter().enumerate() {
        denominator += (x - m).powi(2);
        if i >= lag {
            numerator += (x - m) * (values[i - lag] - m);
        }
    }

    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// One equal-width histogram bin, `[lower, upper)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of finite values over their observed range.
///
/// Returns no bins for empty input or `bins == 0`. A constant input yields a
/// single bin holding every value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return vec![];
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![Bin {
            lower: min,
            upper: max,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_and_variance() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&values), 2.5, epsilon = 1e-12);
        assert_relative_eq!(population_variance(&values), 1.25, epsilon = 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn autocorrelation_lag_zero_is_one() {
        let values = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_relative_eq!(autocorrelation(&values, 0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn autocorrelation_of_alternating_series_is_negative() {
        let values = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        assert!(autocorrelation(&values, 1) < -0.5);
        assert!(autocorrelation(&values, 10).is_nan());
        assert_eq!(autocorrelation(&[2.0, 2.0, 2.0], 1), 0.0);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
        let bins = histogram(&values, 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[29].upper, 9.9);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[1.0], 0).is_empty());
        let single = histogram(&[2.0, 2.0, f64::NAN], 5);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 2);
    }
}
