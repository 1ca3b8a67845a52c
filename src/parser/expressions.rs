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

/*
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * This module contains the **entire Verbose expression grammar**.
 *
 * Parsing order follows strict precedence, loosest first:
 *
 *   assignment → pipe → ternary → or → and → equality → relational
 *   → additive → multiplicative → unary → none-test → primary / call
 *
 * Every rule returns `Ok(None)` when the current token cannot start an
 * expression, so statement rules can probe for an expression statement.
 *
 * ==========================================================================
 */

use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::error::{BuildError, Symbol};
use crate::lexer::token::{TokenKind, TokenValue};
use crate::parser::helpers::ParseResult;
use crate::parser::parser::Parser;
use crate::value::Value;

impl Parser {
    /// expression → assignment
    pub fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// Parses an expression that must be present.
    pub fn expect_expression(&mut self) -> Result<Expr, BuildError> {
        let expr = self.expression()?;
        self.require(expr, Symbol::Expression)
    }

    /// assignment → pipe ( "IS" pipe )*
    ///
    /// Scanned left to right, reduced right to left: `a IS b IS 1` becomes
    /// `a IS (b IS 1)`. Targets are validated by the interpreter.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let Some(first) = self.pipe()? else {
            return Ok(None);
        };

        let mut exprs = vec![first];
        while self.match_token(TokenKind::Is)? {
            let next = self.pipe()?;
            exprs.push(self.require(next, Symbol::Expression)?);
        }

        let mut value = match exprs.pop() {
            Some(last) => last,
            None => return Ok(None),
        };
        let mut span = value.span;
        while let Some(target) = exprs.pop() {
            let target_span = target.span;
            value = Expr::new(
                ExprKind::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                span,
            );
            span = target_span;
        }

        Ok(Some(value))
    }

    /// pipe → ternary ( "THEN" ternary [ "OTHERWISE" ternary ] | "OTHERWISE" ternary )*
    fn pipe(&mut self) -> ParseResult<Expr> {
        let Some(mut first) = self.ternary()? else {
            return Ok(None);
        };

        while let Some(kind) = self.match_any(&[TokenKind::Then, TokenKind::Otherwise])? {
            let mut then = None;
            let mut otherwise = None;

            if kind == TokenKind::Then {
                let expr = self.ternary()?;
                then = Some(Box::new(self.require(expr, Symbol::Expression)?));
            }
            if kind == TokenKind::Otherwise || self.match_token(TokenKind::Otherwise)? {
                let expr = self.ternary()?;
                otherwise = Some(Box::new(self.require(expr, Symbol::Expression)?));
            }

            let span = first.span;
            first = Expr::new(
                ExprKind::Pipe {
                    first: Box::new(first),
                    then,
                    otherwise,
                },
                span,
            );
        }

        Ok(Some(first))
    }

    /// ternary → or ( "?" or [ ":" or ] )*
    fn ternary(&mut self) -> ParseResult<Expr> {
        let Some(mut first) = self.logical_or()? else {
            return Ok(None);
        };

        while self.match_token(TokenKind::TernaryYes)? {
            let yes = self.logical_or()?;
            let yes = self.require(yes, Symbol::Expression)?;

            let mut no = None;
            if self.match_token(TokenKind::TernaryNo)? {
                let expr = self.logical_or()?;
                no = Some(Box::new(self.require(expr, Symbol::Expression)?));
            }

            let span = first.span;
            first = Expr::new(
                ExprKind::Ternary {
                    condition: Box::new(first),
                    yes: Box::new(yes),
                    no,
                },
                span,
            );
        }

        Ok(Some(first))
    }

    /// Left-associative binary level: `operand ( op operand )*`.
    fn binary_level(
        &mut self,
        operand: fn(&mut Parser) -> ParseResult<Expr>,
        ops: &[(TokenKind, BinaryOp)],
    ) -> ParseResult<Expr> {
        let Some(mut left) = operand(self)? else {
            return Ok(None);
        };

        let kinds: Vec<TokenKind> = ops.iter().map(|(kind, _)| *kind).collect();
        while let Some(kind) = self.match_any(&kinds)? {
            let Some(op) = ops.iter().find(|(k, _)| *k == kind).map(|(_, op)| *op) else {
                break;
            };
            let right = operand(self)?;
            let right = self.require(right, Symbol::Expression)?;

            let span = left.span;
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(Some(left))
    }

    /// or → and ( "OR" and )*
    fn logical_or(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::logical_and, &[(TokenKind::Or, BinaryOp::Or)])
    }

    /// and → equality ( "AND" equality )*
    fn logical_and(&mut self) -> ParseResult<Expr> {
        self.binary_level(Parser::equality, &[(TokenKind::And, BinaryOp::And)])
    }

    /// equality → relational ( ( "==" | "!=" | "===" | "!==" ) relational )*
    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            Parser::relational,
            &[
                (TokenKind::Equal, BinaryOp::Equal),
                (TokenKind::NotEqual, BinaryOp::NotEqual),
                (TokenKind::EqualText, BinaryOp::EqualText),
                (TokenKind::NotEqualText, BinaryOp::NotEqualText),
            ],
        )
    }

    /// relational → additive ( ( ">" | ">=" | "<" | "<=" ) additive )*
    fn relational(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            Parser::additive,
            &[
                (TokenKind::Greater, BinaryOp::Greater),
                (TokenKind::GreaterEqual, BinaryOp::GreaterEqual),
                (TokenKind::Less, BinaryOp::Less),
                (TokenKind::LessEqual, BinaryOp::LessEqual),
            ],
        )
    }

    /// additive → multiplicative ( ( "+" | "-" | "++" ) multiplicative )*
    fn additive(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            Parser::multiplicative,
            &[
                (TokenKind::Add, BinaryOp::Add),
                (TokenKind::Sub, BinaryOp::Sub),
                (TokenKind::Concatenate, BinaryOp::Concat),
            ],
        )
    }

    /// multiplicative → unary ( ( "*" | "/" | "%" ) unary )*
    fn multiplicative(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            Parser::unary,
            &[
                (TokenKind::Mul, BinaryOp::Mul),
                (TokenKind::Div, BinaryOp::Div),
                (TokenKind::Mod, BinaryOp::Mod),
            ],
        )
    }

    /// unary → [ "-" | "NOT" ] none_test
    ///
    /// A single prefix operator at most; `- -1` is a syntax error.
    fn unary(&mut self) -> ParseResult<Expr> {
        let span = self.current.span;
        let op = match self.match_any(&[TokenKind::Sub, TokenKind::Not])? {
            Some(TokenKind::Sub) => Some(UnaryOp::Negate),
            Some(_) => Some(UnaryOp::Not),
            None => None,
        };

        let operand = self.none_test()?;
        match op {
            None => Ok(operand),
            Some(op) => {
                let operand = self.require(operand, Symbol::Expression)?;
                Ok(Some(Expr::new(
                    ExprKind::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    span,
                )))
            }
        }
    }

    /// none_test → ( literal | identifier | "(" expression ")" | call ) [ "??" ]
    fn none_test(&mut self) -> ParseResult<Expr> {
        let span = self.current.span;

        let expr = if let Some(literal) = self.literal()? {
            literal
        } else if self.check(TokenKind::Identifier) {
            let (name, span) = self.identifier()?;
            Expr::identifier(name, span)
        } else if self.match_token(TokenKind::ParenOpen)? {
            let inner = self.expect_expression()?;
            self.expect(TokenKind::ParenClose)?;
            inner
        } else if let Some(call) = self.call()? {
            call
        } else {
            return Ok(None);
        };

        if self.match_token(TokenKind::NoneTest)? {
            return Ok(Some(Expr::new(ExprKind::NoneTest(Box::new(expr)), span)));
        }
        Ok(Some(expr))
    }

    /// call → "CALL" identifier [ "WITH" expression ( "," expression )* ] "NOW"
    fn call(&mut self) -> ParseResult<Expr> {
        let span = self.current.span;
        if !self.match_token(TokenKind::Call)? {
            return Ok(None);
        }

        let (name, _) = self.identifier()?;

        let mut args = Vec::new();
        if self.match_token(TokenKind::With)? {
            args.push(self.expect_expression()?);
            while self.match_token(TokenKind::Comma)? {
                args.push(self.expect_expression()?);
            }
        }

        self.expect(TokenKind::Now)?;

        Ok(Some(Expr::new(ExprKind::Call { name, args }, span)))
    }

    /// literal → number | text | fact | "NONE"
    fn literal(&mut self) -> ParseResult<Expr> {
        let span = self.current.span;
        let value = match (&self.current.kind, &self.current.value) {
            (TokenKind::Number, Some(TokenValue::Number(n))) => Value::Number(*n),
            (TokenKind::Text, Some(TokenValue::Text(s))) => Value::Text(s.clone()),
            (TokenKind::Fact, Some(TokenValue::Fact(b))) => Value::Fact(*b),
            (TokenKind::None, _) => Value::Nothing,
            _ => return Ok(None),
        };
        self.advance()?;
        Ok(Some(Expr::literal(value, span)))
    }
}
