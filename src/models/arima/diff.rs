//! Differencing utilities for ARIMA models.

/// Apply differencing to a time series.
///
/// # Arguments
/// * `series` - The input series
/// * `d` - Differencing order (number of times to difference)
///
/// # Returns
/// The differenced series, `d` elements shorter than the input (never
/// shorter than empty).
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            return vec![];
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Integrate (reverse differencing) a differenced continuation of `original`.
///
/// At every differencing level the cumulative sum is seeded with the last
/// value of `original` differenced to that level, so the output continues
/// directly from the end of `original`.
///
/// # Arguments
/// * `differenced` - Values following `original` on the `d`-th difference scale
/// * `original` - The undifferenced history
/// * `d` - Differencing order used
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || differenced.is_empty() {
        return differenced.to_vec();
    }

    let mut result = differenced.to_vec();

    for level in (0..d).rev() {
        let seed = difference(original, level).last().copied().unwrap_or(0.0);

        let mut cumsum = seed;
        for value in result.iter_mut() {
            cumsum += *value;
            *value = cumsum;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_order_0() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = difference(&series, 0);
        assert_eq!(result, series);
    }

    #[test]
    fn difference_order_1() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        let result = difference(&series, 1);
        assert_eq!(result, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn difference_order_2() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        let result = difference(&series, 2);
        // First diff: [2, 3, 4, 5]
        // Second diff: [1, 1, 1]
        assert_eq!(result, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn difference_too_short() {
        assert!(difference(&[], 1).is_empty());
        assert!(difference(&[4.0], 1).is_empty());
        assert!(difference(&[4.0, 5.0], 2).is_empty());
    }

    #[test]
    fn integrate_continues_from_last_value() {
        let original = vec![10.0, 12.0, 15.0, 19.0, 24.0];
        let forecast_diff = vec![6.0, 7.0];
        let integrated = integrate(&forecast_diff, &original, 1);

        // 24 + 6 = 30, 30 + 7 = 37
        assert_relative_eq!(integrated[0], 30.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 37.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_order_2_continues_quadratic() {
        // Triangular numbers: second difference is constant 1
        let original = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        let integrated = integrate(&[1.0, 1.0], &original, 2);

        // Next first differences: 6, 7 -> levels 21, 28
        assert_relative_eq!(integrated[0], 21.0, epsilon = 1e-10);
        assert_relative_eq!(integrated[1], 28.0, epsilon = 1e-10);
    }

    #[test]
    fn integrate_order_0_is_identity() {
        assert_eq!(integrate(&[1.5, 2.5], &[9.0], 0), vec![1.5, 2.5]);
    }
}
