//! Command-line batch segmenter.
//!
//! Reads one record per line from `--input`, segments every record on a
//! rayon worker pool, and emits one JSON list of segment strings per record,
//! to `--output` or stdout. Dictionary problems degrade (the engine falls
//! back to unknown-cost segmentation); an unusable input file is fatal.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;

use khmercut::{Dictionary, Segmenter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Segment Khmer text, one JSON list per input line")]
struct Args {
    /// Path to the word list, one word per line
    #[arg(short, long, default_value = "data/khmer_dictionary_words.txt")]
    dict: PathBuf,

    /// Path to the word-frequency table, a JSON object of counts
    #[arg(short, long, default_value = "data/khmer_word_frequencies.json")]
    freq: PathBuf,

    /// Input text file, one record per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process at most this many records
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of worker threads; rayon picks when omitted
    #[arg(short, long)]
    threads: Option<usize>,
}

fn read_records(path: &Path, limit: Option<usize>) -> anyhow::Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("could not open input file {}", path.display()))?;
    let mut reader = BufReader::new(file);

    // Lossy decoding: a malformed byte degrades one record instead of
    // aborting the batch.
    let mut records = Vec::new();
    let mut buf = Vec::new();
    loop {
        if limit.is_some_and(|limit| records.len() >= limit) {
            break;
        }
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("could not read input file {}", path.display()))?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if !line.is_empty() {
            records.push(line.to_string());
        }
    }
    Ok(records)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let input = args.input.context("--input is required")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("could not configure the thread pool")?;
    }

    let load_start = Instant::now();
    let dictionary = Dictionary::load(&args.dict, &args.freq);
    let segmenter = Segmenter::new(dictionary);
    eprintln!(
        "[INFO] model ready in {:.2}s",
        load_start.elapsed().as_secs_f64()
    );

    let records = read_records(&input, args.limit)?;
    eprintln!("[INFO] processing {} records", records.len());

    let start = Instant::now();
    let results: Vec<String> = records
        .par_iter()
        .map(|line| serde_json::to_string(&segmenter.segment(line)))
        .collect::<Result<_, _>>()
        .context("could not serialize segments")?;
    let elapsed = start.elapsed().as_secs_f64();

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            for record in &results {
                writeln!(writer, "{record}")?;
            }
            writer.flush()?;
            eprintln!("[INFO] wrote {} records to {}", results.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            for record in &results {
                writeln!(writer, "{record}")?;
            }
            writer.flush()?;
        }
    }

    eprintln!(
        "[INFO] {} records in {:.2}s ({:.0} records/sec)",
        results.len(),
        elapsed,
        results.len() as f64 / elapsed.max(f64::EPSILON)
    );

    Ok(())
}
