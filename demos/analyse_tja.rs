//! Parse a TJA file and print statistics and note density of one course
//!
//! Usage:
//!   cargo run --example `analyse_tja` -- <`file_path`> [--course oni] [--bin-width 1.0]
//!
//! Example:
//!   cargo run --example `analyse_tja` -- `tests/tja/files/simple.tja` --course easy

use std::{borrow::Cow, path::PathBuf};

use clap::Parser;
use encoding_rs::{SHIFT_JIS, UTF_8};
use strict_num_extended::PositiveF64;
use tja_rs::{
    analysis::prelude::*,
    diagnostics::{emit_parse_error, emit_parse_warnings},
    tja::prelude::*,
};

const BAR_WIDTH: usize = 40;

#[derive(Debug, Parser)]
#[command(about = "Show statistics and note density of a TJA course")]
struct Args {
    /// Path to the TJA file.
    path: PathBuf,
    /// Course to analyse, by name or number.
    #[arg(short, long, default_value = "oni")]
    course: String,
    /// Width of a density bin in seconds.
    #[arg(short, long, default_value_t = 1.0)]
    bin_width: f64,
}

/// Most TJA files are either UTF-8 or Shift_JIS.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes),
    ) {
        return text;
    }
    SHIFT_JIS.decode(bytes).0
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let name = args.path.display().to_string();
    let bytes = std::fs::read(&args.path)?;
    let source = decode(&bytes);

    let difficulty = Difficulty::try_from(args.course.as_str())
        .map_err(|course| format!("unknown course: {course}"))?;
    let bin_width = PositiveF64::try_from(args.bin_width)
        .map_err(|_| format!("bin width must be positive: {}", args.bin_width))?;

    let output = match parse_tja(&source, default_config()) {
        Ok(output) => output,
        Err(error) => {
            emit_parse_error(&name, &source, &error);
            return Err("failed to parse the TJA file".into());
        }
    };
    emit_parse_warnings(&name, &source, &output.warnings);

    let song = output.song;
    if let Some(title) = &song.metadata.title {
        println!("{title}");
    }
    let AnalysisOutput {
        statistics,
        density,
    } = analyse(&song, difficulty, AnalysisConfig::default().bin_width(bin_width))?;

    println!("course:       {difficulty}");
    println!("length:       {:.3}s", statistics.length);
    println!(
        "notes:        {} (don {} + {} big, ka {} + {} big)",
        statistics.notes(),
        statistics.don,
        statistics.don_big,
        statistics.ka,
        statistics.ka_big,
    );
    println!("total combo:  {}", statistics.total_combo);
    println!("roll ticks:   {}", statistics.ticks);
    println!("balloon hits: {}", statistics.balloon_hits);
    println!("max score:    {}", statistics.max_score);
    if let Some(nps) = statistics.notes_per_second() {
        println!("notes/sec:    {nps:.2}");
    }
    for balloon in &statistics.balloons {
        println!(
            "balloon at {:.3}s: {} hits in {:.3}s",
            balloon.start, balloon.hits, balloon.duration
        );
    }

    println!();
    for (start, bin) in density.iter() {
        let len = if density.max == 0 {
            0
        } else {
            bin.total() * BAR_WIDTH / density.max
        };
        println!("{start:>8.2}s {:>3} {}", bin.total(), "#".repeat(len));
    }

    Ok(())
}
