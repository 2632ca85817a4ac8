use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use bigtools::BigWigWrite;
use bigtools::beddata::BedParserStreamingIterator;
use tokio::runtime;

/// Write a small bigWig. `records` must be sorted by chromosome, then start.
pub fn write_bigwig(path: &Path, chrom_sizes: &[(&str, u32)], records: &[(&str, u32, u32, f32)]) {
    let bedgraph = path.with_extension("bedGraph");
    let text: String = records
        .iter()
        .map(|(chrom, start, end, value)| format!("{}\t{}\t{}\t{}\n", chrom, start, end, value))
        .collect();
    std::fs::write(&bedgraph, text).unwrap();

    let chrom_map: HashMap<String, u32> = chrom_sizes
        .iter()
        .map(|(chrom, size)| (chrom.to_string(), *size))
        .collect();

    let mut outb = BigWigWrite::create_file(path.to_str().unwrap().to_string(), chrom_map).unwrap();
    outb.options.channel_size = 0;
    let runtime = runtime::Builder::new_current_thread().build().unwrap();

    let vals = BedParserStreamingIterator::from_bedgraph_file(File::open(&bedgraph).unwrap(), false);
    if let Err(err) = outb.write(vals, runtime) {
        panic!("Error writing to BigWig file: {}", err);
    }
}
