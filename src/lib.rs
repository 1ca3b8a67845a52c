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
 * Verbose: a small imperative language that says what it means.
 *
 * The pipeline is source → [`lexer`] → [`parser`] → [`interpreter`].
 * Everything a program prints, and every diagnostic, goes to a
 * [`diagnostics::Sink`].
 *
 * ```
 * use verbose::diagnostics::CaptureSink;
 *
 * let sink = verbose::run_source("CALL Print WITH 1 + 2 NOW;", CaptureSink::new());
 * assert_eq!(sink.output(), "3");
 * ```
 */

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod globals;
pub mod interpreter;
pub mod lexer;
pub mod locale;
pub mod parser;
pub mod span;
pub mod value;

use config::Limits;
use diagnostics::Sink;
use interpreter::Interpreter;

/// Builds and runs `source` with default limits and gives the sink back.
///
/// Build and runtime errors have been reported to the sink by the time
/// this returns.
pub fn run_source<S: Sink>(source: &str, sink: S) -> S {
    let mut interpreter = Interpreter::new(sink, Limits::default());
    if interpreter.build(source).is_ok() {
        // reported through the sink already
        let _ = interpreter.run();
    }
    interpreter.into_sink()
}
