use ndarray::{Array1, ArrayView1};

///
/// One-dimensional correlation of `input` with an odd-length kernel centred on
/// its middle weight. Positions outside `input` read as zero.
///
/// `output[i] = sum_j weights[j] * input[i + j - radius]`
///
pub fn correlate1d(input: &ArrayView1<f64>, weights: &[f64]) -> Array1<f64> {
    let n = input.len();
    let radius = weights.len() / 2;
    let mut output = Array1::<f64>::zeros(n);

    for (i, out) in output.iter_mut().enumerate() {
        // first kernel index whose input position is >= 0
        let j_lo = radius.saturating_sub(i);
        // one past the last kernel index whose input position is < n
        let j_hi = weights.len().min(n + radius - i);

        let mut acc = 0.0;
        for j in j_lo..j_hi {
            acc += weights[j] * input[i + j - radius];
        }
        *out = acc;
    }

    output
}
