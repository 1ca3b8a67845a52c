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

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verbose runtime value representation.
///
/// This is the only datum that flows through the interpreter. Every
/// expression ultimately evaluates to one of these. Values are small and
/// cloned freely; there is no shared heap graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Fact(bool),
    Nothing,
}

impl Value {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Nothing
    }
}

impl fmt::Display for Value {
    /// Formats a value the way `Print` shows it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Fact(true) => write!(f, "TRUE"),
            Value::Fact(false) => write!(f, "FALSE"),
            Value::Nothing => Ok(()),
        }
    }
}

/// Declared type of a binding or the return type of a callable.
///
/// `Any` is never written by users. It only shows up for bindings whose
/// type is taken from a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Number,
    Text,
    Fact,
    Nothing,
    Any,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "NUMBER",
            ValueType::Text => "TEXT",
            ValueType::Fact => "FACT",
            ValueType::Nothing => "NOTHING",
            ValueType::Any => "",
        };
        write!(f, "{}", name)
    }
}
