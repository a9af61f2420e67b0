//! Lyric Index Benchmarking Tool
//!
//! Loads a stanza file, indexes it, and measures how long import and keyword
//! search take. Useful for sizing the table capacities against a real corpus.
//!
//! ## Input Format
//!
//! One record per four non-blank lines:
//!
//! ```text
//! Hello
//! 2015
//! 25
//! Hello, it's me, I was wondering if after all these years you'd like to meet
//! ```
//!
//! Title, year, album, lyrics. An album of `N/A` means the record has no
//! album.
//!
//! ## Usage
//!
//! ```bash
//! # Import the corpus and search for the default words
//! ./target/release/lyric_bench /path/to/songs.txt
//!
//! # Search for specific words
//! ./target/release/lyric_bench /path/to/songs.txt love rain fire
//!
//! # Also write the export dump to stdout
//! ./target/release/lyric_bench /path/to/songs.txt --dump
//!
//! # Show per-record indexing events
//! RUST_LOG=refrain_core=debug ./target/release/lyric_bench /path/to/songs.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Import ===
//! --------------------------------
//! Mode        : Import
//! Elapsed     : 0.004 s
//! Records     : 1_204
//! Records/sec : 301_000
//! --------------------------------
//! ```

use std::env;
use std::fs;
use std::io::{self, BufWriter};
use std::time::{Duration, Instant};

use refrain_core::{IndexEngine, Record};
use tracing::{info, warn};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

const DEFAULT_QUERIES: &[&str] = &["love", "heart", "rain", "fire", "night"];

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: lyric_bench <path> [word...] [--dump]");
        std::process::exit(1);
    }

    let path = &args[1];
    let dump = args.iter().any(|a| a == "--dump");
    let mut queries: Vec<&str> = args[2..]
        .iter()
        .map(String::as_str)
        .filter(|a| *a != "--dump")
        .collect();
    if queries.is_empty() {
        queries = DEFAULT_QUERIES.to_vec();
    }

    println!("Loading file...");
    let text = fs::read_to_string(path)?;
    let records = parse_stanzas(&text)?;

    println!("File size: {}", fmt_bytes(text.len() as u64));
    println!("Records:   {}\n", fmt_count(records.len() as u64));

    let engine = bench_import(&records);
    bench_search(&engine, &queries);

    println!("=== Index ===");
    println!("{}", engine.stats());
    match engine.average_year() {
        Ok(year) => println!("Average year: {year}\n"),
        Err(e) => println!("Average year: {e}\n"),
    }

    if dump {
        let stdout = io::stdout();
        engine.export_to(&mut BufWriter::new(stdout.lock()))?;
    }

    Ok(())
}

/// Parses title/year/album/lyrics groups, skipping blank lines.
fn parse_stanzas(text: &str) -> io::Result<Vec<Record>> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let chunks = lines.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        warn!(
            lines = chunks.remainder().len(),
            "ignoring incomplete record at end of file"
        );
    }

    chunks
        .map(|chunk| {
            let [title, year, album, lyrics] = [chunk[0], chunk[1], chunk[2], chunk[3]];
            let year: i32 = year.parse().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("bad year {year:?} for {title:?}: {e}"),
                )
            })?;
            let album = match album {
                "N/A" => None,
                name => Some(name.to_owned()),
            };
            Ok(Record::new(title, year, album, lyrics))
        })
        .collect()
}

fn bench_import(records: &[Record]) -> IndexEngine {
    println!("=== Import ===");

    warmup(|| {
        let mut engine = IndexEngine::new();
        std::hint::black_box(engine.import_from_source(records.iter().cloned()));
    });

    let elapsed = measure(|| {
        let mut engine = IndexEngine::new();
        std::hint::black_box(engine.import_from_source(records.iter().cloned()));
    });

    let mut engine = IndexEngine::new();
    let imported = engine.import_from_source(records.iter().cloned());
    info!(imported, skipped = records.len() - imported, "corpus loaded");

    print_perf("Import", "Records", elapsed, imported as u64);
    engine
}

fn bench_search(engine: &IndexEngine, queries: &[&str]) {
    println!("=== Keyword Search ===");

    for query in queries {
        let hits = engine.keyword_search(query).map_or(0, |found| found.len());
        println!("{query:<12}: {hits} records");
    }

    warmup(|| {
        for query in queries {
            std::hint::black_box(engine.keyword_search(query));
        }
    });

    let elapsed = measure(|| {
        for query in queries {
            std::hint::black_box(engine.keyword_search(query));
        }
    });

    print_perf("Search", "Queries", elapsed, queries.len() as u64);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, unit: &str, elapsed: Duration, items: u64) {
    let secs = elapsed.as_secs_f64();

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.6} s", secs);

    if items > 0 && secs > 0.0 {
        println!("{:<12}: {}", unit, fmt_count(items));
        println!(
            "{:<12}: {}",
            format!("{unit}/sec"),
            fmt_count((items as f64 / secs) as u64)
        );
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
