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

use tracing::debug;

use crate::ast::Program;
use crate::config::Limits;
use crate::error::BuildError;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::Lexer;

/// The core Verbose recursive-descent parser.
///
/// This structure maintains:
/// - The lexer, pulled one token at a time
/// - The current (not yet consumed) token
///
/// Line breaks and comments never reach the grammar: the token stream
/// adapter in [`Parser::advance`] drops them.
///
/// The actual grammar logic is implemented through extension modules
/// (`statements`, `expressions`, `helpers`) via additional `impl Parser` blocks.
pub struct Parser {
    lexer: Lexer,

    /// Current lookahead token.
    pub current: Token,
}

/// Public entry point for the Verbose parsing phase.
///
/// This function:
/// 1. Creates a lexer over `source`
/// 2. Executes the full recursive-descent parsing process
/// 3. Returns the program as one compound statement
///
/// # Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → AST → Interpreter
/// ```
///
/// # Errors
/// The first lexical or syntax error aborts the build.
pub fn parse(source: &str, limits: &Limits) -> Result<Program, BuildError> {
    let mut parser = Parser::new(source, limits)?;
    let program = parser.parse_program()?;
    debug!("parsed program");
    Ok(program)
}

impl Parser {
    pub fn new(source: &str, limits: &Limits) -> Result<Self, BuildError> {
        let mut lexer = Lexer::new(source, limits);
        let current = Self::next_significant(&mut lexer)?;
        Ok(Self { lexer, current })
    }

    /// Parses the whole source.
    ///
    /// # Behavior
    /// - The top level is a bare sequence of declarations and statements
    /// - Everything up to the end of source must be consumed
    pub fn parse_program(&mut self) -> Result<Program, BuildError> {
        let program = self.compound_naked()?;
        self.expect(TokenKind::Etx)?;
        Ok(program)
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> Result<Token, BuildError> {
        let next = Self::next_significant(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn next_significant(lexer: &mut Lexer) -> Result<Token, BuildError> {
        loop {
            let token = lexer.next_token()?;
            if !matches!(token.kind, TokenKind::Eol | TokenKind::Comment) {
                return Ok(token);
            }
        }
    }
}
