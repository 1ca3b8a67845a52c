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

use crate::error::{BuildError, ErrorKind, MessageArg, Symbol, SyntaxError};
use crate::lexer::token::{TokenKind, TokenValue};
use crate::parser::parser::Parser;
use crate::span::Span;

/// Result of a grammar rule that may simply not apply.
pub type ParseResult<T> = Result<Option<T>, BuildError>;

impl Parser {
    /// Checks the current token kind without consuming it.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it has the given kind.
    pub fn match_token(&mut self, kind: TokenKind) -> Result<bool, BuildError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the current token if it has any of the given kinds and
    /// reports which one it was.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> Result<Option<TokenKind>, BuildError> {
        let kind = self.current.kind;
        if kinds.contains(&kind) {
            self.advance()?;
            Ok(Some(kind))
        } else {
            Ok(None)
        }
    }

    /// Consumes a required token or fails with ExpectedToken.
    pub fn expect(&mut self, kind: TokenKind) -> Result<(), BuildError> {
        self.expect_any(&[kind]).map(|_| ())
    }

    /// Consumes one of the required tokens or fails with ExpectedToken
    /// listing all of them.
    pub fn expect_any(&mut self, kinds: &[TokenKind]) -> Result<TokenKind, BuildError> {
        match self.match_any(kinds)? {
            Some(kind) => Ok(kind),
            None => {
                let symbols = kinds.iter().map(|k| Symbol::Token(*k)).collect();
                Err(self
                    .error(ErrorKind::ExpectedToken)
                    .with_arg(MessageArg::Symbols(symbols))
                    .into())
            }
        }
    }

    /// Unwraps the result of a rule that must apply here.
    pub fn require<T>(&self, rule: Option<T>, symbol: Symbol) -> Result<T, BuildError> {
        rule.ok_or_else(|| {
            self.error(ErrorKind::ExpectedSymbol)
                .with_arg(MessageArg::Symbols(vec![symbol]))
                .into()
        })
    }

    /// Consumes and returns an identifier.
    pub fn identifier(&mut self) -> Result<(String, Span), BuildError> {
        let span = self.current.span;
        if let (TokenKind::Identifier, Some(TokenValue::Text(name))) =
            (self.current.kind, &self.current.value)
        {
            let name = name.clone();
            self.advance()?;
            return Ok((name, span));
        }
        Err(self
            .error(ErrorKind::ExpectedSymbol)
            .with_arg(MessageArg::Symbols(vec![Symbol::Identifier]))
            .into())
    }

    /// A syntax error located at the current token.
    pub fn error(&self, kind: ErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.current.span, self.current.to_string())
    }
}
