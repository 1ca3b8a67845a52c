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

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Tolerance used by every numeric equality in the language.
pub const EPSILON: f64 = 1e-9;

/// Tunable limits of the lexer and interpreter.
///
/// Every field has a default, so a limits file only needs to mention what
/// it changes:
///
/// ```json
/// { "max_text": 1000, "max_depth": 4000 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_identifier: usize,
    pub max_text: usize,
    pub max_comment: usize,

    /// Largest magnitude a numeric literal may reach.
    pub max_number: f64,

    /// Deepest AST nesting the interpreter walks before StackOverflow.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_identifier: 100,
            max_text: 100,
            max_comment: 100,
            max_number: f64::MAX,
            max_depth: 1600,
        }
    }
}

/// Why a limits file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed limits in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Limits {
    /// Loads limits from a JSON file, defaulting every missing field.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: display,
            source,
        })
    }
}
