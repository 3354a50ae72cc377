//! Trailing simple moving average.

/// Trailing mean over `window` values.
///
/// The first `window - 1` positions are `None`; position `i` holds the mean
/// of `values[i + 1 - window..=i]`. A zero window yields all `None`.
#[must_use]
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            (i + 1 >= window).then(|| {
                let slice = &values[i + 1 - window..=i];
                slice.iter().sum::<f64>() / window as f64
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_of_three() {
        let ma = trailing_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(ma[0], None);
        assert_eq!(ma[1], None);
        assert_relative_eq!(ma[2].unwrap(), 2.0);
        assert_relative_eq!(ma[3].unwrap(), 3.0);
        assert_relative_eq!(ma[4].unwrap(), 4.0);
    }

    #[test]
    fn test_window_longer_than_series() {
        assert!(trailing_mean(&[1.0, 2.0], 5).iter().all(Option::is_none));
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(trailing_mean(&[1.0], 0), vec![None]);
    }
}
