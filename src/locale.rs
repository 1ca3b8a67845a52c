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
 * Message catalogs.
 *
 * A catalog maps every log, warning and error kind to a message template,
 * plus display names for grammar symbols and value types. Catalogs are
 * plain JSON; `en-us` is compiled into the binary.
 *
 * Templates use numbered placeholders:
 * - `{0}` position of the event
 * - `{1}` buffered source text (lexical errors) or the offending token
 * - `{2}`, `{3}`, ... the event's format arguments, in order
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::error::MessageArg;
use crate::span::Span;

const EN_US: &str = include_str!("../locales/en-us.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    pub name: String,

    /// Used for any entry the catalog lacks.
    pub unknown: String,

    #[serde(default)]
    logs: HashMap<String, String>,
    #[serde(default)]
    warnings: HashMap<String, String>,
    #[serde(default)]
    errors: HashMap<String, String>,
    #[serde(default)]
    symbols: HashMap<String, String>,
    #[serde(default)]
    types: HashMap<String, String>,
}

/// Why a locale file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("cannot read locale {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed locale {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn placeholder() -> Option<&'static Regex> {
    static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{(\d+)\}").ok())
        .as_ref()
}

impl Catalog {
    /// The built-in English catalog.
    pub fn english() -> Self {
        serde_json::from_str(EN_US).unwrap_or_default()
    }

    /// Loads a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, LocaleError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LocaleError::Json {
            path: display,
            source,
        })
    }

    pub fn log(&self, key: &str) -> &str {
        self.lookup(&self.logs, key)
    }

    pub fn warning(&self, key: &str) -> &str {
        self.lookup(&self.warnings, key)
    }

    pub fn error(&self, key: &str) -> &str {
        self.lookup(&self.errors, key)
    }

    fn lookup<'a>(&'a self, table: &'a HashMap<String, String>, key: &str) -> &'a str {
        table.get(key).map(String::as_str).unwrap_or(&self.unknown)
    }

    /// Renders one format argument, localizing symbols and types.
    pub fn arg(&self, arg: &MessageArg) -> String {
        match arg {
            MessageArg::Symbols(symbols) => symbols
                .iter()
                .map(|s| {
                    self.symbols
                        .get(&s.key())
                        .cloned()
                        .unwrap_or_else(|| s.to_string())
                })
                .collect::<Vec<_>>()
                .join(", "),
            MessageArg::Type(ty) => self.type_name(&format!("{:?}", ty), &ty.to_string()),
            MessageArg::Param { mutable, ty, name } => {
                let mut parts = Vec::new();
                if *mutable {
                    parts.push(self.symbols.get("Mutable").cloned().unwrap_or_else(|| "MUTABLE".into()));
                }
                let ty = self.type_name(&format!("{:?}", ty), &ty.to_string());
                if !ty.is_empty() {
                    parts.push(ty);
                }
                parts.push(name.clone());
                parts.join(" ")
            }
            other => other.to_string(),
        }
    }

    fn type_name(&self, key: &str, fallback: &str) -> String {
        self.types.get(key).cloned().unwrap_or_else(|| fallback.to_string())
    }

    /// Fills a template's placeholders. Unknown indices render empty.
    pub fn render(&self, template: &str, span: Span, buffered: &str, args: &[MessageArg]) -> String {
        let Some(re) = placeholder() else {
            return template.to_string();
        };
        re.replace_all(template, |caps: &Captures| {
            match caps[1].parse::<usize>() {
                Ok(0) => span.to_string(),
                Ok(1) => buffered.to_string(),
                Ok(n) => args.get(n - 2).map(|a| self.arg(a)).unwrap_or_default(),
                Err(_) => String::new(),
            }
        })
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Symbol;
    use crate::lexer::TokenKind;
    use crate::value::ValueType;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::english();
        assert_eq!(catalog.name, "en-us");
        assert_eq!(catalog.error("DivisionByZero"), "[VE13] @ {0}: Division by zero!");
        assert_eq!(catalog.error("NoSuchError"), "Unknown locale entry!!!");
    }

    #[test]
    fn placeholders_are_filled_in_order() {
        let catalog = Catalog::english();
        let text = catalog.render(
            catalog.error("VariableRedefinition"),
            Span::new(3, 7),
            "",
            &[MessageArg::from("a"), MessageArg::from(Span::new(1, 1))],
        );
        assert_eq!(text, "[VE18] @ (3, 7): Redefinition of variable 'a' defined at (1, 1)!");
    }

    #[test]
    fn symbols_and_params_are_localized() {
        let catalog = Catalog::english();
        let symbols = MessageArg::Symbols(vec![Symbol::Token(TokenKind::Dot), Symbol::Expression]);
        assert_eq!(catalog.arg(&symbols), ";, expression");

        let param = MessageArg::Param {
            mutable: true,
            ty: ValueType::Text,
            name: "head".to_string(),
        };
        assert_eq!(catalog.arg(&param), "MUTABLE TEXT head");
    }

    #[test]
    fn partial_catalogs_fall_back_to_unknown() {
        let catalog: Catalog =
            serde_json::from_str(r#"{ "name": "xx", "unknown": "???", "errors": {} }"#).unwrap();
        assert_eq!(catalog.error("DivisionByZero"), "???");
    }
}
