use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::{FeaturizeError, Result};
use crate::models::Interval;
use crate::utils::get_dynamic_reader_w_stdin;

/// Strand column of a BED record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Plus,
    Minus,
    Unknown,
}

impl From<&str> for Strand {
    fn from(value: &str) -> Self {
        match value {
            "+" => Strand::Plus,
            "-" => Strand::Minus,
            _ => Strand::Unknown,
        }
    }
}

///
/// IntervalSet struct, the ordered list of intervals read from a bed file.
///
/// Unlike a plain region set, the order of the input file is kept: row `i`
/// of every extracted tensor belongs to interval `i`.
///
#[derive(Clone, Debug)]
pub struct IntervalSet {
    pub intervals: Vec<Interval>,
    pub strands: Vec<Strand>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

impl IntervalSet {
    fn from_reader<R: BufRead>(reader: R, path: Option<PathBuf>) -> Result<Self> {
        let mut intervals: Vec<Interval> = Vec::new();
        let mut strands: Vec<Strand> = Vec::new();
        let mut header: String = String::new();
        let mut first_line: bool = true;

        for line in reader.lines() {
            let string_line = line?;
            if string_line.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = string_line.split('\t').collect();

            if string_line.starts_with("browser")
                | string_line.starts_with("track")
                | string_line.starts_with('#')
            {
                header.push_str(&string_line);
                first_line = false;
                continue;
            }

            // column headers like `chrom start stop` without a leading #
            if first_line {
                first_line = false;
                if parts.len() >= 3 && parts[1].parse::<u32>().is_err() {
                    header.push_str(&string_line);
                    continue;
                }
            }

            if parts.len() < 3 {
                return Err(FeaturizeError::InvalidInterval(format!(
                    "Expected at least 3 columns: {:?}",
                    parts
                )));
            }

            let start = parts[1].parse::<u32>().map_err(|_| {
                FeaturizeError::InvalidInterval(format!(
                    "Error in parsing start position: {:?}",
                    parts
                ))
            })?;
            let stop = parts[2].parse::<u32>().map_err(|_| {
                FeaturizeError::InvalidInterval(format!(
                    "Error in parsing stop position: {:?}",
                    parts
                ))
            })?;

            let mut interval = Interval::new(parts[0], start, stop);
            interval.score = parts.get(4).and_then(|s| s.parse::<f32>().ok());
            interval.validate()?;

            intervals.push(interval);
            strands.push(parts.get(5).map_or(Strand::Unknown, |s| Strand::from(*s)));
        }

        if intervals.is_empty() {
            return Err(FeaturizeError::EmptyIntervals);
        }

        Ok(IntervalSet {
            intervals,
            strands,
            header: match header.is_empty() {
                true => None,
                false => Some(header),
            },
            path,
        })
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    ///
    /// Mirror flags for every interval on the minus strand.
    /// Intervals without a strand column are never mirrored.
    ///
    pub fn minus_strand_flags(&self) -> Vec<bool> {
        self.strands.iter().map(|s| *s == Strand::Minus).collect()
    }

    /// Widest interval in the set. Used to pick a window length for
    /// featurizing intervals of mixed width.
    pub fn max_width(&self) -> u32 {
        self.intervals.iter().map(|i| i.width()).max().unwrap_or(0)
    }
}

impl TryFrom<&Path> for IntervalSet {
    type Error = FeaturizeError;

    ///
    /// Create a new [IntervalSet] from a bed file.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk (`.gz` is decompressed), or `-` for stdin.
    fn try_from(value: &Path) -> Result<Self> {
        let path_str = value.to_string_lossy();
        let reader = get_dynamic_reader_w_stdin(&path_str)?;
        IntervalSet::from_reader(reader, Some(value.to_owned()))
    }
}

impl TryFrom<&str> for IntervalSet {
    type Error = FeaturizeError;

    fn try_from(value: &str) -> Result<Self> {
        IntervalSet::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for IntervalSet {
    type Error = FeaturizeError;

    fn try_from(value: PathBuf) -> Result<Self> {
        IntervalSet::try_from(value.as_path())
    }
}

impl From<Vec<Interval>> for IntervalSet {
    fn from(intervals: Vec<Interval>) -> Self {
        let strands = vec![Strand::Unknown; intervals.len()];
        IntervalSet {
            intervals,
            strands,
            header: None,
            path: None,
        }
    }
}

impl Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalSet with {} intervals.", self.len())
    }
}
