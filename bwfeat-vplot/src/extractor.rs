use std::path::PathBuf;

use log::debug;
use ndarray::{Array2, Array4, ArrayViewMut2, s};

use bwfeat_core::config::DEFAULT_MAX_FRAGLEN;
use bwfeat_core::mirror::mirror;
use bwfeat_core::models::Interval;
use bwfeat_core::{Extractor, ExtractorConfig, FeaturizeError, Result, validate_request};

use crate::blur::{BlurConfig, BlurKernel, BlurOrder, build_blur_kernels, max_radius};
use crate::cache::ChromosomeMatrixCache;
use crate::correlate::correlate1d;
use crate::matrix::ChromosomeMatrix;

#[derive(Debug, Clone, PartialEq)]
pub struct VplotConfig {
    pub blur: BlurConfig,
    /// Number of fragment-length rows in the output.
    pub max_fraglen: usize,
}

impl Default for VplotConfig {
    fn default() -> Self {
        VplotConfig {
            blur: BlurConfig::default(),
            max_fraglen: DEFAULT_MAX_FRAGLEN as usize,
        }
    }
}

impl TryFrom<&ExtractorConfig> for VplotConfig {
    type Error = FeaturizeError;

    fn try_from(config: &ExtractorConfig) -> Result<Self> {
        if config.max_fraglen <= 0 {
            return Err(FeaturizeError::NonPositiveMaxFraglen(config.max_fraglen));
        }
        let precision = u32::try_from(config.blur_precision)
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| {
                FeaturizeError::InvalidConfig(format!(
                    "blur_precision must be a positive integer, got {}",
                    config.blur_precision
                ))
            })?;

        Ok(VplotConfig {
            blur: BlurConfig {
                slope: config.blur_slope,
                intercept: config.blur_intercept,
                order: BlurOrder::try_from(config.blur_order)?,
                precision,
            },
            max_fraglen: config.max_fraglen as usize,
        })
    }
}

///
/// Extracts fragment-length x position windows from per-chromosome matrices,
/// optionally blurring each fragment-length row with its own Gaussian
/// (derivative) kernel.
///
/// Output shape is `(intervals, 1, max_fraglen, width)`.
///
#[derive(Debug)]
pub struct VplotExtractor {
    cache: ChromosomeMatrixCache,
    config: VplotConfig,
    kernels: Option<Vec<BlurKernel>>,
}

impl VplotExtractor {
    ///
    /// Create an extractor reading `<datafile>.<chrom>` matrices. Blur kernels
    /// are built once here.
    ///
    /// # Arguments
    /// - datafile: path prefix of the per-chromosome matrix files
    /// - config: fragment length range and blur parameters
    pub fn new<P: Into<PathBuf>>(datafile: P, config: VplotConfig) -> Result<Self> {
        if config.max_fraglen == 0 {
            return Err(FeaturizeError::NonPositiveMaxFraglen(0));
        }
        let kernels = build_blur_kernels(config.max_fraglen, &config.blur)?;
        if let Some(kernels) = &kernels {
            debug!(
                "Built {} blur kernels, max radius {}",
                kernels.len(),
                max_radius(kernels)
            );
        }

        Ok(VplotExtractor {
            cache: ChromosomeMatrixCache::new(datafile),
            config,
            kernels,
        })
    }

    pub fn config(&self) -> &VplotConfig {
        &self.config
    }

    /// `None` when blurring is disabled.
    pub fn kernels(&self) -> Option<&[BlurKernel]> {
        self.kernels.as_deref()
    }

    pub fn cache(&self) -> &ChromosomeMatrixCache {
        &self.cache
    }

    /// Positions read on each side of an interval before blurring.
    pub fn padding(&self) -> usize {
        self.kernels
            .as_deref()
            .map(|kernels| max_radius(kernels) * self.config.blur.precision as usize)
            .unwrap_or(0)
    }

    /// Width of the blur scratch window for an interval of `width` positions.
    pub fn scratch_width(&self, width: usize) -> usize {
        width + 2 * self.padding()
    }

    fn extract_interval(&mut self, interval: &Interval, out: ArrayViewMut2<f32>) -> Result<()> {
        let matrix = self.cache.get(&interval.chrom)?;
        matrix.check_window(interval, self.config.max_fraglen)?;

        match self.kernels.as_deref() {
            Some(kernels) => blur_window(&matrix, interval, kernels, self.padding(), out),
            None => matrix.densify_into(interval.start as i64, out),
        }
        Ok(())
    }
}

fn blur_window(
    matrix: &ChromosomeMatrix,
    interval: &Interval,
    kernels: &[BlurKernel],
    pad: usize,
    mut out: ArrayViewMut2<f32>,
) {
    let (rows, width) = out.dim();
    let mut scratch = Array2::<f64>::zeros((rows, width + 2 * pad));
    matrix.densify_into(interval.start as i64 - pad as i64, scratch.view_mut());

    // rows without a kernel keep their raw density
    out.assign(&scratch.slice(s![.., pad..pad + width]).mapv(|v| v as f32));

    for kernel in kernels {
        let blurred = correlate1d(&scratch.row(kernel.row), &kernel.weights);
        out.row_mut(kernel.row)
            .assign(&blurred.slice(s![pad..pad + width]).mapv(|v| v as f32));
    }
}

impl Extractor for VplotExtractor {
    const MULTIPROCESSING_SAFE: bool = false;

    fn extract(&mut self, intervals: &[Interval], to_mirror: Option<&[bool]>) -> Result<Array4<f32>> {
        let width = validate_request(intervals, to_mirror)? as usize;
        let mut data = Array4::<f32>::zeros((intervals.len(), 1, self.config.max_fraglen, width));

        for (index, interval) in intervals.iter().enumerate() {
            self.extract_interval(interval, data.slice_mut(s![index, 0, .., ..]))?;
        }

        if let Some(flags) = to_mirror {
            mirror(&mut data, flags);
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fmt::Write as _;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use rstest::*;

    /// Write a Matrix Market file; `entries` use 0-based coordinates.
    fn write_matrix(path: &Path, rows: usize, cols: usize, entries: &[(usize, usize, f32)]) {
        let mut text = String::from("%%MatrixMarket matrix coordinate real general\n");
        writeln!(text, "{} {} {}", rows, cols, entries.len()).unwrap();
        for (row, col, value) in entries {
            writeln!(text, "{} {} {}", row + 1, col + 1, value).unwrap();
        }
        std::fs::write(path, text).unwrap();
    }

    fn blur(slope: f64, intercept: f64) -> BlurConfig {
        BlurConfig {
            slope: Some(slope),
            intercept,
            order: BlurOrder::Smooth,
            precision: 3,
        }
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{} != {}", a, b);
    }

    /// chr1: 300 x 1000 with a handful of counts, chr2: 300 x 500 with one count
    #[fixture]
    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_matrix(
            &dir.path().join("sample.chr1"),
            300,
            1000,
            &[
                (0, 150, 4.0),
                (4, 150, 2.0),
                (9, 150, 8.0),
                (120, 101, 1.0),
                (120, 299, 3.0),
                (299, 400, 5.0),
                (5, 99, 6.0),
            ],
        );
        write_matrix(&dir.path().join("sample.chr2"), 300, 500, &[(10, 20, 1.0)]);
        dir
    }

    fn prefix(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("sample")
    }

    #[rstest]
    fn test_not_multiprocessing_safe() {
        assert!(!VplotExtractor::MULTIPROCESSING_SAFE);
    }

    #[rstest]
    fn test_no_blur_shape_and_densification(data_dir: tempfile::TempDir) {
        let mut extractor = VplotExtractor::new(prefix(&data_dir), VplotConfig::default()).unwrap();
        let intervals = vec![Interval::new("chr1", 100, 300)];

        let data = extractor.extract(&intervals, None).unwrap();
        assert_eq!(data.dim(), (1, 1, 300, 200));
        assert_eq!(extractor.padding(), 0);

        let matrix = ChromosomeMatrix::from_path(&data_dir.path().join("sample.chr1")).unwrap();
        let mut expected = Array2::<f32>::zeros((300, 200));
        matrix.densify_into(100, expected.view_mut());
        assert_eq!(data.slice(s![0, 0, .., ..]), expected);

        assert_eq!(data[[0, 0, 0, 50]], 4.0);
        assert_eq!(data[[0, 0, 120, 1]], 1.0);
        assert_eq!(data[[0, 0, 120, 199]], 3.0);
        assert_eq!(data.sum(), 4.0 + 2.0 + 8.0 + 1.0 + 3.0);
    }

    #[rstest]
    fn test_blur_scenario_radii_and_padding(data_dir: tempfile::TempDir) {
        let config = VplotConfig {
            blur: blur(0.01, 1.0),
            max_fraglen: 300,
        };
        let mut extractor = VplotExtractor::new(prefix(&data_dir), config).unwrap();

        let kernels = extractor.kernels().unwrap();
        assert_eq!(kernels[0].radius, 3);
        assert_eq!(kernels[299].radius, 12);
        assert_eq!(extractor.padding(), 36);
        assert!(extractor.scratch_width(200) - 200 >= 2 * 12 * 3);

        let data = extractor
            .extract(&[Interval::new("chr1", 100, 300)], None)
            .unwrap();
        assert_eq!(data.dim(), (1, 1, 300, 200));
    }

    #[rstest]
    fn test_blur_spreads_interior_count(data_dir: tempfile::TempDir) {
        let config = VplotConfig {
            blur: blur(0.01, 1.0),
            max_fraglen: 300,
        };
        let mut extractor = VplotExtractor::new(prefix(&data_dir), config).unwrap();
        let weights = extractor.kernels().unwrap()[0].weights.clone();

        let data = extractor
            .extract(&[Interval::new("chr1", 100, 300)], None)
            .unwrap();

        // row 0 holds a single count of 4 at column 150 (offset 50)
        for k in 0..7 {
            assert_close(data[[0, 0, 0, 47 + k]], 4.0 * weights[k] as f32);
        }
        assert_eq!(data[[0, 0, 0, 46]], 0.0);
        let row_sum: f32 = data.slice(s![0, 0, 0, ..]).sum();
        assert_close(row_sum, 4.0);
    }

    #[rstest]
    fn test_blur_reads_into_padding(data_dir: tempfile::TempDir) {
        let config = VplotConfig {
            blur: blur(0.0, 1.0),
            max_fraglen: 300,
        };
        let mut extractor = VplotExtractor::new(prefix(&data_dir), config).unwrap();
        let weights = extractor.kernels().unwrap()[5].weights.clone();

        // row 5 has a count of 6 at column 99, one position left of the interval
        let data = extractor
            .extract(&[Interval::new("chr1", 100, 300)], None)
            .unwrap();
        assert_close(data[[0, 0, 5, 0]], 6.0 * weights[2] as f32);
        assert_close(data[[0, 0, 5, 1]], 6.0 * weights[1] as f32);
        assert_close(data[[0, 0, 5, 2]], 6.0 * weights[0] as f32);
        assert_eq!(data[[0, 0, 5, 3]], 0.0);
    }

    #[rstest]
    fn test_blur_at_chromosome_start(data_dir: tempfile::TempDir) {
        let config = VplotConfig {
            blur: blur(0.01, 1.0),
            max_fraglen: 300,
        };
        let mut extractor = VplotExtractor::new(prefix(&data_dir), config).unwrap();

        let data = extractor
            .extract(&[Interval::new("chr2", 0, 40)], None)
            .unwrap();
        assert_eq!(data.dim(), (1, 1, 300, 40));
        let row_sum: f32 = data.slice(s![0, 0, 10, ..]).sum();
        assert_close(row_sum, 1.0);
    }

    #[rstest]
    fn test_rows_without_kernel_are_unblurred(data_dir: tempfile::TempDir) {
        // sd = -2 + 0.5 * i: rows 0..=4 have no kernel
        let config = VplotConfig {
            blur: blur(0.5, -2.0),
            max_fraglen: 10,
        };
        let mut extractor = VplotExtractor::new(prefix(&data_dir), config).unwrap();
        assert_eq!(extractor.kernels().unwrap().len(), 5);

        let data = extractor
            .extract(&[Interval::new("chr1", 100, 300)], None)
            .unwrap();
        assert_eq!(data.dim(), (1, 1, 10, 200));

        assert_eq!(data[[0, 0, 0, 50]], 4.0);
        assert_eq!(data[[0, 0, 4, 50]], 2.0);
        assert_eq!(data[[0, 0, 4, 49]], 0.0);

        // row 9 (sd 2.5) is blurred but keeps its mass
        assert!(data[[0, 0, 9, 50]] < 8.0);
        assert!(data[[0, 0, 9, 49]] > 0.0);
        let row_sum: f32 = data.slice(s![0, 0, 9, ..]).sum();
        assert_close(row_sum, 8.0);
    }

    #[rstest]
    fn test_negative_slope_keeps_tail_rows_unblurred(data_dir: tempfile::TempDir) {
        // sd = 2 - 0.5 * i: rows 4..10 have no kernel
        let config = VplotConfig {
            blur: blur(-0.5, 2.0),
            max_fraglen: 10,
        };
        let mut extractor = VplotExtractor::new(prefix(&data_dir), config).unwrap();
        let rows: Vec<usize> = extractor.kernels().unwrap().iter().map(|k| k.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);

        let data = extractor
            .extract(&[Interval::new("chr1", 100, 300)], None)
            .unwrap();
        assert_eq!(data[[0, 0, 4, 50]], 2.0);
        assert_eq!(data[[0, 0, 9, 50]], 8.0);
        assert!(data[[0, 0, 0, 50]] < 4.0);
    }

    #[rstest]
    fn test_mirror_only_flagged_interval(data_dir: tempfile::TempDir) {
        let mut extractor = VplotExtractor::new(prefix(&data_dir), VplotConfig::default()).unwrap();
        let intervals = vec![
            Interval::new("chr1", 100, 300),
            Interval::new("chr1", 100, 300),
        ];

        let plain = extractor.extract(&intervals, None).unwrap();
        let data = extractor.extract(&intervals, Some(&[false, true])).unwrap();

        assert_eq!(data.slice(s![0, .., .., ..]), plain.slice(s![0, .., .., ..]));
        assert_eq!(data[[1, 0, 0, 149]], 4.0);
        assert_eq!(data[[1, 0, 120, 0]], 3.0);
        assert_eq!(
            data.slice(s![1, 0, .., ..;-1]),
            plain.slice(s![1, 0, .., ..])
        );
    }

    #[rstest]
    fn test_one_load_per_chromosome(data_dir: tempfile::TempDir) {
        let mut extractor = VplotExtractor::new(prefix(&data_dir), VplotConfig::default()).unwrap();
        let intervals = vec![
            Interval::new("chr1", 0, 50),
            Interval::new("chr2", 0, 50),
            Interval::new("chr1", 200, 250),
        ];

        extractor.extract(&intervals, None).unwrap();
        extractor.extract(&intervals, None).unwrap();
        assert_eq!(extractor.cache().loads(), 2);
    }

    #[rstest]
    fn test_missing_chromosome(data_dir: tempfile::TempDir) {
        let mut extractor = VplotExtractor::new(prefix(&data_dir), VplotConfig::default()).unwrap();
        let result = extractor.extract(&[Interval::new("chrY", 0, 50)], None);
        assert!(matches!(result, Err(FeaturizeError::MissingData { chrom, .. }) if chrom == "chrY"));
    }

    #[rstest]
    fn test_request_checked_before_loading(data_dir: tempfile::TempDir) {
        let mut extractor = VplotExtractor::new(prefix(&data_dir), VplotConfig::default()).unwrap();

        let widths = extractor.extract(
            &[Interval::new("chr1", 0, 50), Interval::new("chr2", 0, 60)],
            None,
        );
        assert!(matches!(widths, Err(FeaturizeError::MismatchedWidths { .. })));

        let flags = extractor.extract(&[Interval::new("chr1", 0, 50)], Some(&[true, false]));
        assert!(matches!(flags, Err(FeaturizeError::MirrorLengthMismatch { .. })));

        assert!(matches!(
            extractor.extract(&[], None),
            Err(FeaturizeError::EmptyIntervals)
        ));
        assert_eq!(extractor.cache().loads(), 0);
    }

    #[rstest]
    fn test_interval_past_matrix_end(data_dir: tempfile::TempDir) {
        let mut extractor = VplotExtractor::new(prefix(&data_dir), VplotConfig::default()).unwrap();
        let result = extractor.extract(&[Interval::new("chr2", 450, 550)], None);
        assert!(matches!(result, Err(FeaturizeError::MatrixShape { .. })));
    }

    #[rstest]
    fn test_too_few_matrix_rows(data_dir: tempfile::TempDir) {
        let config = VplotConfig {
            max_fraglen: 400,
            ..VplotConfig::default()
        };
        let mut extractor = VplotExtractor::new(prefix(&data_dir), config).unwrap();
        let result = extractor.extract(&[Interval::new("chr1", 0, 50)], None);
        assert!(matches!(result, Err(FeaturizeError::MatrixShape { .. })));
    }

    #[rstest]
    fn test_config_from_extractor_config() {
        let config = ExtractorConfig {
            blur_slope: Some(0.01),
            blur_order: 2,
            max_fraglen: 150,
            ..ExtractorConfig::default()
        };
        let vplot = VplotConfig::try_from(&config).unwrap();
        assert_eq!(vplot.max_fraglen, 150);
        assert_eq!(vplot.blur.order, BlurOrder::Second);
        assert_eq!(vplot.blur.slope, Some(0.01));
        assert_eq!(vplot.blur.precision, 3);
    }

    #[rstest]
    #[case(ExtractorConfig { max_fraglen: 0, ..ExtractorConfig::default() })]
    #[case(ExtractorConfig { max_fraglen: -5, ..ExtractorConfig::default() })]
    fn test_config_rejects_max_fraglen(#[case] config: ExtractorConfig) {
        assert!(matches!(
            VplotConfig::try_from(&config),
            Err(FeaturizeError::NonPositiveMaxFraglen(_))
        ));
    }

    #[rstest]
    fn test_config_rejects_order_and_precision() {
        let order = ExtractorConfig {
            blur_order: 4,
            ..ExtractorConfig::default()
        };
        assert!(matches!(
            VplotConfig::try_from(&order),
            Err(FeaturizeError::InvalidBlurOrder(4))
        ));

        let precision = ExtractorConfig {
            blur_precision: 0,
            ..ExtractorConfig::default()
        };
        assert!(matches!(
            VplotConfig::try_from(&precision),
            Err(FeaturizeError::InvalidConfig(_))
        ));
    }

    #[rstest]
    fn test_zero_max_fraglen_rejected_by_new() {
        let config = VplotConfig {
            max_fraglen: 0,
            ..VplotConfig::default()
        };
        assert!(matches!(
            VplotExtractor::new("unused", config),
            Err(FeaturizeError::NonPositiveMaxFraglen(0))
        ));
    }
}
