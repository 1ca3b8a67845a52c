/*
 * ==========================================================================
 * VERBOSE - Say What You Mean!
 * ==========================================================================
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the VERBOSE programming language project.
 * 
 * VERBOSE is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */


/*!
 * The `verbose` command line.
 *
 * ```text
 * verbose -f program.vrb
 * verbose -i 'CALL Print WITH "hi" NOW;' -o out.txt -e err.txt
 * ```
 *
 * Exit status: 0 on success or `Quit`, 1 when the program failed to
 * build or run, 2 when the command line itself could not be served.
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use verbose::config::Limits;
use verbose::diagnostics::{ConsoleSink, LogKind, Sink};
use verbose::error::ErrorKind;
use verbose::interpreter::Interpreter;
use verbose::locale::Catalog;
use verbose::span::Span;

/// Runs a Verbose program.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program text to run.
    #[arg(short, long, conflicts_with = "file")]
    input: Option<String>,

    /// File holding the program to run.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON locale used for messages.
    #[arg(short, long)]
    locale: Option<PathBuf>,

    /// Writes program output here instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Writes diagnostics here instead of stderr.
    #[arg(short, long)]
    err: Option<PathBuf>,

    /// JSON file overriding interpreter limits.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

type Writer = Box<dyn Write>;

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(message) => {
            eprintln!("verbose: {}", message);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("VERBOSE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether the program ran without a reported error.
fn run(args: Args) -> Result<bool, String> {
    let catalog = match &args.locale {
        Some(path) => Catalog::from_file(path).map_err(|e| e.to_string())?,
        None => Catalog::english(),
    };
    let limits = match &args.config {
        Some(path) => Limits::from_file(path).map_err(|e| e.to_string())?,
        None => Limits::default(),
    };

    let out = open_writer(args.out.as_ref(), || Box::new(io::stdout()))?;
    let err = open_writer(args.err.as_ref(), || Box::new(io::stderr()))?;
    let mut sink = ConsoleSink::new(out, err, catalog);

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    sink.emit_log(LogKind::Initialized, Span::default(), &[timestamp.into()]);

    let source = match (&args.input, &args.file) {
        (Some(input), _) => input.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?,
        (None, None) => {
            sink.emit_error(ErrorKind::NoSource, Span::default(), "", &[]);
            return Ok(false);
        }
    };
    debug!(bytes = source.len(), "source loaded");

    let sink = sink.with_source(source.as_str());
    let mut interpreter = Interpreter::new(sink, limits);
    if interpreter.build(&source).is_err() {
        return Ok(false);
    }
    Ok(interpreter.run().is_ok())
}

fn open_writer(path: Option<&PathBuf>, default: impl FnOnce() -> Writer) -> Result<Writer, String> {
    match path {
        Some(path) => File::create(path)
            .map(|file| Box::new(file) as Writer)
            .map_err(|e| format!("cannot create {}: {}", path.display(), e)),
        None => Ok(default()),
    }
}
