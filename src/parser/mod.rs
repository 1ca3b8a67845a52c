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
 * Root module for the Verbose recursive-descent parser.
 *
 * Wires together:
 *   - Core parser control logic and the token stream
 *   - Statement and declaration parsing
 *   - Expression parsing
 *   - Shared helper utilities
 */

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the main `parse(source, limits)` entry point
pub mod parser;

/// Statement-level parsing:
/// - blocks, if / while / for / jumps / match
/// - variable, function and pattern declarations
pub mod statements;

/// Expression-level parsing:
/// - assignment → pipe → ternary → or → and → equality → relational
///   → additive → multiplicative → unary → none-test → primary
pub mod expressions;

/// Shared parser helpers:
/// - token matching
/// - required rules and tokens
/// - error construction
pub mod helpers;

pub use parser::{parse, Parser};
