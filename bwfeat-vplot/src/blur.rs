//! Discrete Gaussian and Gaussian-derivative kernels, one per fragment-length row.
//!
//! The blur width of row `i` grows linearly with fragment length:
//! `sd = intercept + slope * i`. Rows whose `sd` is not positive get no kernel
//! and keep their raw density.

use bwfeat_core::config::{DEFAULT_BLUR_INTERCEPT, DEFAULT_BLUR_PRECISION};
use bwfeat_core::{FeaturizeError, Result};

/// Largest kernel radius accepted, in positions.
pub const MAX_BLUR_RADIUS: usize = 100_000;

/// Radius `floor(precision * sd + 0.5)`, or `None` past [`MAX_BLUR_RADIUS`].
fn kernel_radius(sd: f64, precision: u32) -> Option<usize> {
    let lw = (precision as f64 * sd + 0.5).floor();
    if lw.is_finite() && lw <= MAX_BLUR_RADIUS as f64 {
        Some(lw as usize)
    } else {
        None
    }
}

/// Derivative order of the Gaussian kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlurOrder {
    #[default]
    Smooth,
    First,
    Second,
    Third,
}

impl TryFrom<i64> for BlurOrder {
    type Error = FeaturizeError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(BlurOrder::Smooth),
            1 => Ok(BlurOrder::First),
            2 => Ok(BlurOrder::Second),
            3 => Ok(BlurOrder::Third),
            other => Err(FeaturizeError::InvalidBlurOrder(other)),
        }
    }
}

impl From<BlurOrder> for i64 {
    fn from(order: BlurOrder) -> Self {
        match order {
            BlurOrder::Smooth => 0,
            BlurOrder::First => 1,
            BlurOrder::Second => 2,
            BlurOrder::Third => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlurConfig {
    /// `None` disables blurring.
    pub slope: Option<f64>,
    pub intercept: f64,
    pub order: BlurOrder,
    /// Kernel radius in standard deviations.
    pub precision: u32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        BlurConfig {
            slope: None,
            intercept: DEFAULT_BLUR_INTERCEPT,
            order: BlurOrder::Smooth,
            precision: DEFAULT_BLUR_PRECISION as u32,
        }
    }
}

impl BlurConfig {
    pub fn is_enabled(&self) -> bool {
        self.slope.is_some()
    }

    /// Standard deviation of the kernel for fragment-length row `row`.
    pub fn sd_for_row(&self, row: usize) -> Option<f64> {
        self.slope.map(|slope| self.intercept + slope * row as f64)
    }
}

/// Weights for one fragment-length row, indexed by offset from the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct BlurKernel {
    pub row: usize,
    pub radius: usize,
    pub weights: Vec<f64>,
}

impl BlurKernel {
    ///
    /// Build the kernel for one standard deviation. Returns `None` for `sd <= 0`
    /// and for kernels wider than [`MAX_BLUR_RADIUS`].
    ///
    /// # Arguments
    /// - row: fragment-length row the kernel belongs to
    /// - sd: standard deviation of the base Gaussian
    /// - order: derivative order
    /// - precision: radius in standard deviations
    pub fn new(row: usize, sd: f64, order: BlurOrder, precision: u32) -> Option<Self> {
        if sd.is_nan() || sd <= 0.0 {
            return None;
        }

        let lw = kernel_radius(sd, precision)?;
        let mut weights = vec![0.0; 2 * lw + 1];
        weights[lw] = 1.0;

        let var = sd * sd;
        let mut sum = 1.0;
        for k in 1..=lw {
            let kf = k as f64;
            let tmp = (-0.5 * kf * kf / var).exp();
            weights[lw + k] = tmp;
            weights[lw - k] = tmp;
            sum += 2.0 * tmp;
        }
        for w in weights.iter_mut() {
            *w /= sum;
        }

        match order {
            BlurOrder::Smooth => {}
            BlurOrder::First => {
                weights[lw] = 0.0;
                for k in 1..=lw {
                    let kf = k as f64;
                    let tmp = -kf / var * weights[lw + k];
                    weights[lw + k] = -tmp;
                    weights[lw - k] = tmp;
                }
            }
            BlurOrder::Second => {
                weights[lw] *= -1.0 / var;
                for k in 1..=lw {
                    let kf = k as f64;
                    let tmp = (kf * kf / var - 1.0) * weights[lw + k] / var;
                    weights[lw + k] = tmp;
                    weights[lw - k] = tmp;
                }
            }
            BlurOrder::Third => {
                weights[lw] = 0.0;
                let var2 = var * var;
                for k in 1..=lw {
                    let kf = k as f64;
                    let tmp = (3.0 - kf * kf / var) * kf * weights[lw + k] / var2;
                    weights[lw + k] = -tmp;
                    weights[lw - k] = tmp;
                }
            }
        }

        Some(BlurKernel {
            row,
            radius: lw,
            weights,
        })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

///
/// Build one kernel per fragment-length row in `[0, max_fraglen)`.
///
/// Returns `Ok(None)` when blurring is disabled (`slope` unset). Rows with a
/// non-positive standard deviation are left out of the returned list.
///
pub fn build_blur_kernels(max_fraglen: usize, config: &BlurConfig) -> Result<Option<Vec<BlurKernel>>> {
    let Some(slope) = config.slope else {
        return Ok(None);
    };

    if config.precision == 0 {
        return Err(FeaturizeError::InvalidConfig(
            "blur_precision must be a positive integer".to_string(),
        ));
    }
    if !slope.is_finite() || !config.intercept.is_finite() {
        return Err(FeaturizeError::InvalidConfig(format!(
            "blur slope and intercept must be finite, got {} and {}",
            slope, config.intercept
        )));
    }

    // sd is linear in the row, so the widest kernel sits at one of the ends
    let last = max_fraglen.saturating_sub(1) as f64;
    let widest = config.intercept.max(config.intercept + slope * last);
    if widest > 0.0 && kernel_radius(widest, config.precision).is_none() {
        return Err(FeaturizeError::InvalidConfig(format!(
            "blur kernel radius {} exceeds {} positions (slope {}, intercept {}, precision {})",
            (config.precision as f64 * widest + 0.5).floor(),
            MAX_BLUR_RADIUS,
            slope,
            config.intercept,
            config.precision
        )));
    }

    let kernels = (0..max_fraglen)
        .filter_map(|row| {
            let sd = config.intercept + slope * row as f64;
            BlurKernel::new(row, sd, config.order, config.precision)
        })
        .collect();

    Ok(Some(kernels))
}

/// Largest kernel radius, or 0 for an empty list.
pub fn max_radius(kernels: &[BlurKernel]) -> usize {
    kernels.iter().map(|k| k.radius).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn config(slope: f64, intercept: f64, order: BlurOrder) -> BlurConfig {
        BlurConfig {
            slope: Some(slope),
            intercept,
            order,
            precision: 3,
        }
    }

    #[rstest]
    fn test_disabled_without_slope() {
        let kernels = build_blur_kernels(300, &BlurConfig::default()).unwrap();
        assert!(kernels.is_none());
    }

    #[rstest]
    #[case(0, BlurOrder::Smooth)]
    #[case(1, BlurOrder::First)]
    #[case(2, BlurOrder::Second)]
    #[case(3, BlurOrder::Third)]
    fn test_order_from_int(#[case] value: i64, #[case] expected: BlurOrder) {
        assert_eq!(BlurOrder::try_from(value).unwrap(), expected);
        assert_eq!(i64::from(expected), value);
    }

    #[rstest]
    #[case(4)]
    #[case(-1)]
    fn test_invalid_order(#[case] value: i64) {
        assert!(matches!(
            BlurOrder::try_from(value),
            Err(FeaturizeError::InvalidBlurOrder(v)) if v == value
        ));
    }

    #[rstest]
    fn test_zero_precision_is_rejected() {
        let mut cfg = config(0.01, 1.0, BlurOrder::Smooth);
        cfg.precision = 0;
        assert!(matches!(
            build_blur_kernels(10, &cfg),
            Err(FeaturizeError::InvalidConfig(_))
        ));
    }

    #[rstest]
    fn test_radius_scenario() {
        let kernels = build_blur_kernels(300, &config(0.01, 1.0, BlurOrder::Smooth))
            .unwrap()
            .unwrap();

        assert_eq!(kernels.len(), 300);
        assert_eq!(kernels[0].row, 0);
        assert_eq!(kernels[0].radius, 3);
        assert_eq!(kernels[0].len(), 7);
        // sd = 1 + 0.01 * 299 = 3.99
        assert_eq!(kernels[299].radius, 12);
        assert_eq!(kernels[299].len(), 25);
        assert_eq!(max_radius(&kernels), 12);
    }

    #[rstest]
    fn test_smooth_kernels_sum_to_one() {
        let kernels = build_blur_kernels(300, &config(0.01, 1.0, BlurOrder::Smooth))
            .unwrap()
            .unwrap();
        for kernel in kernels {
            let sum: f64 = kernel.weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "row {} sums to {}", kernel.row, sum);
        }
    }

    #[rstest]
    #[case(BlurOrder::Smooth, 1.0)]
    #[case(BlurOrder::First, -1.0)]
    #[case(BlurOrder::Second, 1.0)]
    #[case(BlurOrder::Third, -1.0)]
    fn test_kernel_parity(#[case] order: BlurOrder, #[case] parity: f64) {
        let kernels = build_blur_kernels(50, &config(0.05, 0.7, order))
            .unwrap()
            .unwrap();
        for kernel in kernels {
            let lw = kernel.radius;
            for k in 1..=lw {
                let right = kernel.weights[lw + k];
                let left = kernel.weights[lw - k];
                assert!((right - parity * left).abs() < 1e-12);
            }
            if parity < 0.0 {
                assert_eq!(kernel.weights[lw], 0.0);
            }
        }
    }

    #[rstest]
    fn test_first_derivative_values() {
        let kernel = BlurKernel::new(0, 1.0, BlurOrder::First, 3).unwrap();
        let base = BlurKernel::new(0, 1.0, BlurOrder::Smooth, 3).unwrap();

        // right side is +k/sd^2 * g_k, left side its negation
        for k in 1..=3 {
            let expected = k as f64 * base.weights[3 + k];
            assert!((kernel.weights[3 + k] - expected).abs() < 1e-12);
            assert!((kernel.weights[3 - k] + expected).abs() < 1e-12);
        }
    }

    #[rstest]
    fn test_second_derivative_centre() {
        let sd: f64 = 2.0;
        let kernel = BlurKernel::new(0, sd, BlurOrder::Second, 3).unwrap();
        let base = BlurKernel::new(0, sd, BlurOrder::Smooth, 3).unwrap();
        let lw = base.radius;

        assert!((kernel.weights[lw] + base.weights[lw] / (sd * sd)).abs() < 1e-12);
        let k = 2.0;
        let expected = (k * k / (sd * sd) - 1.0) * base.weights[lw + 2] / (sd * sd);
        assert!((kernel.weights[lw + 2] - expected).abs() < 1e-12);
    }

    #[rstest]
    fn test_non_positive_sd_rows_are_skipped() {
        // sd = -2 + 0.5 * i is positive from row 5 on
        let kernels = build_blur_kernels(10, &config(0.5, -2.0, BlurOrder::Smooth))
            .unwrap()
            .unwrap();

        let rows: Vec<usize> = kernels.iter().map(|k| k.row).collect();
        assert_eq!(rows, vec![5, 6, 7, 8, 9]);
    }

    #[rstest]
    fn test_all_rows_skipped() {
        let kernels = build_blur_kernels(10, &config(0.0, 0.0, BlurOrder::Smooth))
            .unwrap()
            .unwrap();
        assert!(kernels.is_empty());
        assert_eq!(max_radius(&kernels), 0);
    }

    #[rstest]
    #[case(1e300, 1.0)]
    #[case(1e7, 1.0)]
    #[case(-1e300, 1e300)]
    fn test_oversized_kernels_are_rejected(#[case] slope: f64, #[case] intercept: f64) {
        assert!(matches!(
            build_blur_kernels(2, &config(slope, intercept, BlurOrder::Smooth)),
            Err(FeaturizeError::InvalidConfig(msg)) if msg.contains("exceeds")
        ));
    }

    #[rstest]
    fn test_oversized_single_kernel_is_none() {
        assert!(BlurKernel::new(0, 1e300, BlurOrder::Smooth, 3).is_none());
        assert!(BlurKernel::new(0, f64::INFINITY, BlurOrder::Smooth, 3).is_none());
    }

    #[rstest]
    fn test_tiny_sd_gives_identity_kernel() {
        let kernel = BlurKernel::new(0, 0.1, BlurOrder::Smooth, 3).unwrap();
        assert_eq!(kernel.radius, 0);
        assert_eq!(kernel.weights, vec![1.0]);
    }
}
