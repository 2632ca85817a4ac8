use ndarray::ArrayViewMut2;

/// Channels of a one-hot encoded base, in `A, C, G, T` order.
pub const NUM_SEQ_CHARS: usize = 4;

/// Channel of a base, case-insensitive. `N` and IUPAC codes have none.
pub fn base_channel(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

///
/// One-hot encode `seq` into `out`, a `(NUM_SEQ_CHARS, seq.len())` view.
/// Columns for bases other than `ACGT` are left all zero.
///
pub fn one_hot_encode_sequence(seq: &[u8], mut out: ArrayViewMut2<f32>) {
    out.fill(0.0);
    for (position, base) in seq.iter().enumerate().take(out.ncols()) {
        if let Some(channel) = base_channel(*base) {
            out[[channel, position]] = 1.0;
        }
    }
}
