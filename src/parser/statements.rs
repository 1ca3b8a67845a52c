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
 * Statement-Level Parsing Logic
 *
 * Grammar rules for Verbose **declarations and statements**:
 * - Variables (`[MUTABLE] TYPE name [IS expr];`)
 * - Functions and patterns, including forward declarations
 * - Blocks (`BEGIN ... END`) and the bare top-level sequence
 * - Control flow (`IF`, `WHILE`, `FOR`, `SKIP`, `STOP`, `RETURN`)
 * - Anonymous `MATCH` blocks, lowered into chains of `IF` nodes
 * - Expression statements
 */

use std::rc::Rc;

use crate::ast::{
    Declarator, Expr, FunctionDecl, JumpKind, PatternDecl, Stmt, StmtKind,
};
use crate::error::{BuildError, ErrorKind, MessageArg, Symbol};
use crate::lexer::token::TokenKind;
use crate::parser::helpers::ParseResult;
use crate::parser::parser::Parser;
use crate::value::{Value, ValueType};

impl Parser {
    /* ==========================================================================
     * BLOCKS
     * ========================================================================== */

    /// compound_naked → ( declaration | statement )*
    ///
    /// Used for the program itself and for `BEGIN ... END` bodies.
    pub fn compound_naked(&mut self) -> Result<Stmt, BuildError> {
        let span = self.current.span;
        let mut body = Vec::new();

        loop {
            if let Some(decl) = self.declaration()? {
                body.push(decl);
            } else if let Some(stmt) = self.statement()? {
                body.push(stmt);
            } else {
                break;
            }
        }

        Ok(Stmt::new(StmtKind::Compound(body), span))
    }

    /// compound → "BEGIN" compound_naked "END"
    fn compound(&mut self) -> ParseResult<Stmt> {
        if !self.match_token(TokenKind::Begin)? {
            return Ok(None);
        }
        let body = self.compound_naked()?;
        self.expect(TokenKind::End)?;
        Ok(Some(body))
    }

    /* ==========================================================================
     * STATEMENTS
     * ========================================================================== */

    /// Parses a single statement.
    ///
    /// Alternatives are tried in a fixed order; the first one whose leading
    /// token matches wins. Returns `Ok(None)` when nothing applies.
    pub fn statement(&mut self) -> ParseResult<Stmt> {
        if let Some(stmt) = self.compound()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.expression_statement()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.if_statement()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.for_statement()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.while_statement()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.jump_statement()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.match_statement()? {
            return Ok(Some(stmt));
        }
        self.empty_statement()
    }

    fn expect_statement(&mut self) -> Result<Stmt, BuildError> {
        let stmt = self.statement()?;
        self.require(stmt, Symbol::Statement)
    }

    /// expression_statement → expression ";"
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let Some(expr) = self.expression()? else {
            return Ok(None);
        };
        self.expect(TokenKind::Dot)?;

        let span = expr.span;
        Ok(Some(Stmt::new(StmtKind::Expression(expr), span)))
    }

    /// if → "IF" expression "DO" statement [ "ELSE" statement ]
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        if !self.match_token(TokenKind::If)? {
            return Ok(None);
        }

        let condition = self.expect_expression()?;
        self.expect(TokenKind::Do)?;
        let then_branch = Box::new(self.expect_statement()?);

        let else_branch = if self.match_token(TokenKind::Else)? {
            Some(Box::new(self.expect_statement()?))
        } else {
            None
        };

        Ok(Some(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        )))
    }

    /// for → "FOR" variable_declaration while
    ///
    /// Desugars into `BEGIN declaration; WHILE ... END`, so the loop
    /// variable lives in a scope of its own.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        if !self.match_token(TokenKind::For)? {
            return Ok(None);
        }

        let decl = self.variable_declaration()?;
        let decl = self.require(decl, Symbol::VariableDeclaration)?;

        let looped = self.while_statement()?;
        let looped = self.require(looped, Symbol::WhileStatement)?;

        Ok(Some(Stmt::new(StmtKind::Compound(vec![decl, looped]), span)))
    }

    /// while → "WHILE" expression "DO" statement
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        if !self.match_token(TokenKind::While)? {
            return Ok(None);
        }

        let condition = self.expect_expression()?;
        self.expect(TokenKind::Do)?;
        let body = Box::new(self.expect_statement()?);

        Ok(Some(Stmt::new(StmtKind::While { condition, body }, span)))
    }

    /// jump → ( "SKIP" | "STOP" | "RETURN" [ expression ] ) ";"
    fn jump_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        let kind = match self.match_any(&[TokenKind::Skip, TokenKind::Stop, TokenKind::Return])? {
            Some(TokenKind::Skip) => JumpKind::Skip,
            Some(TokenKind::Stop) => JumpKind::Stop,
            Some(_) => JumpKind::Return,
            None => return Ok(None),
        };

        let value = match kind {
            JumpKind::Return => self.expression()?,
            _ => None,
        };
        self.expect(TokenKind::Dot)?;

        Ok(Some(Stmt::new(StmtKind::Jump { kind, value }, span)))
    }

    /// match → "MATCH" "WITH" expression match_block
    fn match_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        if !self.match_token(TokenKind::Match)? {
            return Ok(None);
        }

        self.expect(TokenKind::With)?;
        let subject = self.expect_expression()?;

        let body = self.match_block()?;
        let body = Box::new(self.require(body, Symbol::MatchBlock)?);

        Ok(Some(Stmt::new(StmtKind::Match { subject, body }, span)))
    }

    /// empty → ";"
    fn empty_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        if !self.match_token(TokenKind::Dot)? {
            return Ok(None);
        }
        Ok(Some(Stmt::empty(span)))
    }

    /* ==========================================================================
     * MATCH BLOCKS
     * ========================================================================== */

    /// match_block → "BEGIN" match_branch* "DEFAULT" statement "," "END"
    ///
    /// Every branch becomes an `IF` without `ELSE`; the `DEFAULT` branch is
    /// an `IF` on a literal `TRUE`. Short-circuiting between branches is done
    /// at run time through the last-condition scope flag.
    fn match_block(&mut self) -> ParseResult<Stmt> {
        if !self.match_token(TokenKind::Begin)? {
            return Ok(None);
        }
        let span = self.current.span;

        let mut branches = Vec::new();
        while let Some(branch) = self.match_branch()? {
            branches.push(branch);
        }

        self.expect(TokenKind::Default)?;

        let default_span = self.current.span;
        let statement = self.expect_statement()?;
        branches.push(Stmt::new(
            StmtKind::If {
                condition: Expr::literal(Value::Fact(true), default_span),
                then_branch: Box::new(statement),
                else_branch: None,
            },
            default_span,
        ));

        self.expect(TokenKind::Comma)?;
        self.expect(TokenKind::End)?;

        Ok(Some(Stmt::new(StmtKind::Compound(branches), span)))
    }

    /// match_branch → expression "DO" statement ","
    fn match_branch(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        let Some(condition) = self.expression()? else {
            return Ok(None);
        };

        self.expect(TokenKind::Do)?;
        let statement = self.expect_statement()?;
        self.expect(TokenKind::Comma)?;

        Ok(Some(Stmt::new(
            StmtKind::If {
                condition,
                then_branch: Box::new(statement),
                else_branch: None,
            },
            span,
        )))
    }

    /* ==========================================================================
     * DECLARATIONS
     * ========================================================================== */

    /// declaration → variable_declaration ";" | function | pattern
    fn declaration(&mut self) -> ParseResult<Stmt> {
        if let Some(decl) = self.variable_declaration()? {
            self.expect(TokenKind::Dot)?;
            return Ok(Some(decl));
        }
        if let Some(decl) = self.function_declaration()? {
            return Ok(Some(decl));
        }
        self.pattern_declaration()
    }

    /// variable_declaration → declarator [ "IS" expression ]
    fn variable_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        let Some(declarator) = self.declarator()? else {
            return Ok(None);
        };

        let init = if self.match_token(TokenKind::Is)? {
            Some(self.expect_expression()?)
        } else {
            None
        };

        Ok(Some(Stmt::new(StmtKind::Variable { declarator, init }, span)))
    }

    /// function → "FUNCTION" [ "OVERRIDE" ] identifier
    ///            [ "WITH" declarator ( "," declarator )* ]
    ///            "RETURNS" return_type statement
    ///
    /// A body of a lone `;` makes this a forward declaration.
    fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        if !self.match_token(TokenKind::Function)? {
            return Ok(None);
        }

        let overrides = self.match_token(TokenKind::Override)?;
        let (name, _) = self.identifier()?;

        let mut params: Vec<Declarator> = Vec::new();
        if self.match_token(TokenKind::With)? {
            loop {
                let param = self.declarator()?;
                let param = self.require(param, Symbol::Declarator)?;

                if params.iter().any(|p| p.name == param.name) {
                    return Err(self
                        .error(ErrorKind::DuplicateParam)
                        .with_arg(param.name.as_str())
                        .with_arg(name.as_str())
                        .into());
                }
                params.push(param);

                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenKind::Returns)?;
        let returns = self.return_type()?;
        let body = self.expect_statement()?;

        Ok(Some(Stmt::new(
            StmtKind::Function(Rc::new(FunctionDecl {
                span,
                name,
                overrides,
                params,
                returns,
                body,
            })),
            span,
        )))
    }

    /// pattern → "PATTERN" [ "OVERRIDE" ] identifier "WITH" declarator
    ///           ( match_block | ";" )
    fn pattern_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.current.span;
        if !self.match_token(TokenKind::Pattern)? {
            return Ok(None);
        }

        let overrides = self.match_token(TokenKind::Override)?;
        let (name, _) = self.identifier()?;

        self.expect(TokenKind::With)?;
        let param = self.declarator()?;
        let param = self.require(param, Symbol::Declarator)?;

        let body = match self.match_block()? {
            Some(block) => block,
            None => {
                let end = self.current.span;
                self.expect(TokenKind::Dot)?;
                Stmt::empty(end)
            }
        };

        Ok(Some(Stmt::new(
            StmtKind::Pattern(Rc::new(PatternDecl {
                span,
                name,
                overrides,
                param,
                body,
            })),
            span,
        )))
    }

    /// declarator → [ "MUTABLE" ] type identifier
    ///
    /// `MUTABLE` commits to a declarator; a missing type after it is an error.
    fn declarator(&mut self) -> ParseResult<Declarator> {
        let span = self.current.span;
        let mutable = self.match_token(TokenKind::Mutable)?;

        let ty = match self.value_type()? {
            Some(ty) => ty,
            None if mutable => {
                let expected = [TokenKind::NumberType, TokenKind::TextType, TokenKind::FactType]
                    .into_iter()
                    .map(Symbol::Token)
                    .collect();
                return Err(self
                    .error(ErrorKind::ExpectedToken)
                    .with_arg(MessageArg::Symbols(expected))
                    .into());
            }
            None => return Ok(None),
        };

        let (name, _) = self.identifier()?;
        Ok(Some(Declarator::new(span, mutable, ty, name)))
    }

    /// type → "NUMBER" | "TEXT" | "FACT"
    fn value_type(&mut self) -> ParseResult<ValueType> {
        let ty = match self.current.kind {
            TokenKind::NumberType => ValueType::Number,
            TokenKind::TextType => ValueType::Text,
            TokenKind::FactType => ValueType::Fact,
            _ => return Ok(None),
        };
        self.advance()?;
        Ok(Some(ty))
    }

    /// return_type → type | "NOTHING"
    fn return_type(&mut self) -> Result<ValueType, BuildError> {
        if self.match_token(TokenKind::NothingType)? {
            return Ok(ValueType::Nothing);
        }
        let ty = self.value_type()?;
        self.require(ty, Symbol::ReturnType)
    }
}
