//! Post-extraction flips. Both operate in place on the interval axis (0).

use ndarray::{Array4, Axis, s};

///
/// Reverse every flagged interval along the position (last) axis.
/// Channel and sub-channel order is untouched.
///
pub fn mirror(data: &mut Array4<f32>, to_mirror: &[bool]) {
    for (index, _) in to_mirror.iter().enumerate().filter(|(_, m)| **m) {
        let mut slot = data.index_axis_mut(Axis(0), index);
        let reversed = slot.slice(s![.., .., ..;-1]).to_owned();
        slot.assign(&reversed);
    }
}

///
/// Reverse every flagged interval along both the sub-channel and the position
/// axis. With one-hot `ACGT` channels this is the reverse complement.
///
pub fn reverse_complement(data: &mut Array4<f32>, to_mirror: &[bool]) {
    for (index, _) in to_mirror.iter().enumerate().filter(|(_, m)| **m) {
        let mut slot = data.index_axis_mut(Axis(0), index);
        let reversed = slot.slice(s![.., ..;-1, ..;-1]).to_owned();
        slot.assign(&reversed);
    }
}
