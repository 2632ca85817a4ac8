//! # bwfeat
//!
//! Fixed-width feature tensors for genomic intervals, ready for machine
//! learning pipelines. Every data source implements
//! [`core::extractor::Extractor`] and produces an
//! `(intervals, channels, sub_channels, width)` array.
//!
//! Each module sits behind a cargo feature of the same name; `full` (the
//! default) enables all of them.

#[cfg(feature = "core")]
#[doc(inline)]
pub use bwfeat_core as core;

#[cfg(feature = "vplot")]
#[doc(inline)]
pub use bwfeat_vplot as vplot;

#[cfg(feature = "signal")]
#[doc(inline)]
pub use bwfeat_signal as signal;

#[cfg(feature = "sequence")]
#[doc(inline)]
pub use bwfeat_sequence as sequence;

#[cfg(feature = "io")]
#[doc(inline)]
pub use bwfeat_io as io;
