use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

///
/// Get a reader for either a gzip'd or non-gzip'd file, based on the file extension.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Failed to open file {:?}: {}", path, e))
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
///
/// # Returns
///
/// A `BufReader` object for a given file path or stdin.
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> io::Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        let file_path = Path::new(file_path_str);
        get_dynamic_reader(file_path)
    }
}

///
/// Get a reader that sniffs the gzip magic bytes instead of trusting the extension.
///
/// Per-chromosome matrix files are named `<prefix>.<chrom>`, so the extension
/// says nothing about the compression.
///
pub fn get_sniffing_reader(path: &Path) -> io::Result<BufReader<Box<dyn Read>>> {
    let mut reader = BufReader::new(File::open(path)?);
    let is_gzipped = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    let inner: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(reader)),
        false => Box::new(reader),
    };

    Ok(BufReader::new(inner))
}
