// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `probe`: a command-line front-end that reads a file, runs every registered codec against it
//! (or a byte range of it), and prints the resulting report as JSON or a human-readable summary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use log::{error, info};
use probe_core::{CodecRegistry, ProbeOptions, Report};

#[derive(Parser, Debug)]
#[command(name = "probe", about = "Probe a binary payload against every known decoder")]
struct Args {
    /// File to analyze.
    path: PathBuf,

    /// Emit the report as JSON instead of a human-readable summary.
    #[arg(long)]
    json: bool,

    /// Write each successful decode's payload to DIR/<stem>.<tag>.decompressed.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Overrides the file stem used when naming output files.
    #[arg(long, value_name = "NAME")]
    original_filename: Option<String>,

    /// Analyze starting at this byte offset instead of the start of the file.
    #[arg(long, value_name = "N")]
    start_offset: Option<u64>,

    /// Analyze at most this many bytes.
    #[arg(long, value_name = "N")]
    length: Option<u64>,

    /// Raise logging verbosity; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the registered codec tags, in registry order, and exit.
    #[arg(long)]
    list_codecs: bool,
}

fn main() -> ExitCode {
    // clap's own exit codes use 2 for usage errors; §6 requires exit code 1 for any argument
    // error, so parse manually and remap rather than letting `Args::parse()` exit on our behalf.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    init_logger(args.verbose);

    let mut registry = CodecRegistry::new();
    probe_codecs::register_all(&mut registry);

    if args.list_codecs {
        for descriptor in registry.iter() {
            println!("{}", descriptor.tag);
        }
        return ExitCode::SUCCESS;
    }

    match run(&args, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run(args: &Args, registry: &CodecRegistry) -> Result<(), String> {
    let bytes = fs::read(&args.path).map_err(|e| format!("cannot read '{}': {}", args.path.display(), e))?;

    let start = args.start_offset.unwrap_or(0) as usize;
    if start > bytes.len() {
        return Err(format!("--start-offset {} is past end of file ({} bytes)", start, bytes.len()));
    }
    let end = match args.length {
        Some(len) => (start + len as usize).min(bytes.len()),
        None => bytes.len(),
    };
    let blob = &bytes[start..end];

    let mut input_id = args.path.display().to_string();
    if args.start_offset.is_some() || args.length.is_some() {
        input_id = format!("{} (offset: {}, length: {})", input_id, start, blob.len());
    }

    info!("probing {} ({} bytes) against {} codecs", input_id, blob.len(), registry.len());
    let report = probe_core::probe(registry, blob, input_id, ProbeOptions::default());

    if let Some(dir) = &args.output_dir {
        persist_payloads(&report, dir, stem_for(args))?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| format!("failed to serialize report: {}", e))?;
        println!("{}", json);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn stem_for(args: &Args) -> String {
    if let Some(name) = &args.original_filename {
        return name.clone();
    }
    Path::new(&args.path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

fn persist_payloads(report: &Report, dir: &Path, stem: String) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("cannot create output directory '{}': {}", dir.display(), e))?;

    for outcome in &report.results {
        let Some(payload) = &outcome.payload else { continue };
        let file_path = dir.join(format!("{}.{}.decompressed", stem, outcome.method));
        if let Err(e) = fs::write(&file_path, payload) {
            error!("failed to write '{}': {}", file_path.display(), e);
        }
    }

    Ok(())
}

fn print_summary(report: &Report) {
    println!("file: {}", report.input_id);
    println!("size: {} bytes", report.file_size);
    println!("tested {} codecs: {} succeeded, {} failed", report.total_tests, report.success_count, report.failed_count);

    if let Some(best) = report.best_method {
        println!("best candidate: {} (ratio {:.2}, confidence {:.2})", best, report.best_ratio, report.best_confidence);
    } else {
        println!("no candidate passed validation");
    }

    println!();
    println!("{:<20} {:>8} {:>12} {:>8} {:>10} {}", "method", "success", "ratio", "conf", "valid", "note");
    for outcome in &report.results {
        let note = outcome.error.as_deref().unwrap_or(outcome.validation_msg);
        println!(
            "{:<20} {:>8} {:>12.2} {:>8.2} {:>10} {}",
            outcome.method, outcome.success, outcome.ratio, outcome.confidence, outcome.validation_ok, note
        );
    }
}
