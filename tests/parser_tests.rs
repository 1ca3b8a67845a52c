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


use pretty_assertions::assert_eq;

use verbose::ast::{BinaryOp, Expr, ExprKind, JumpKind, Stmt, StmtKind, UnaryOp};
use verbose::config::Limits;
use verbose::error::ErrorKind;
use verbose::parser::parse;
use verbose::value::{Value, ValueType};

fn program(source: &str) -> Vec<Stmt> {
    match parse(source, &Limits::default()) {
        Ok(Stmt {
            kind: StmtKind::Compound(body),
            ..
        }) => body,
        other => panic!("unexpected parse result: {:?}", other),
    }
}

fn expression(source: &str) -> Expr {
    match program(source).remove(0).kind {
        StmtKind::Expression(expr) => expr,
        other => panic!("not an expression statement: {:?}", other),
    }
}

fn fails(source: &str) -> ErrorKind {
    parse(source, &Limits::default()).unwrap_err().kind()
}

fn binary_op(expr: &Expr) -> BinaryOp {
    match &expr.kind {
        ExprKind::Binary { op, .. } => *op,
        other => panic!("not binary: {:?}", other),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = expression("1 + 2 * 3;");
    assert_eq!(binary_op(&expr), BinaryOp::Add);
    match expr.kind {
        ExprKind::Binary { left, right, .. } => {
            assert_eq!(left.kind, ExprKind::Literal(Value::Number(1.0)));
            assert_eq!(binary_op(&right), BinaryOp::Mul);
        }
        _ => unreachable!(),
    }
}

#[test]
fn binary_levels_are_left_associative() {
    match expression("8 - 4 - 2;").kind {
        ExprKind::Binary { op, left, .. } => {
            assert_eq!(op, BinaryOp::Sub);
            assert_eq!(binary_op(&left), BinaryOp::Sub);
        }
        other => panic!("not binary: {:?}", other),
    }
}

#[test]
fn logical_operators_are_lowest_among_binaries() {
    assert_eq!(binary_op(&expression("1 < 2 AND 2 == 2 OR FALSE;")), BinaryOp::Or);
    assert_eq!(binary_op(&expression("a ++ b === c;")), BinaryOp::EqualText);
}

#[test]
fn assignment_reduces_right_to_left() {
    match expression("a IS b IS 1;").kind {
        ExprKind::Assign { target, value } => {
            assert_eq!(target.as_identifier(), Some("a"));
            match value.kind {
                ExprKind::Assign { target, value } => {
                    assert_eq!(target.as_identifier(), Some("b"));
                    assert_eq!(value.kind, ExprKind::Literal(Value::Number(1.0)));
                }
                other => panic!("not an assignment: {:?}", other),
            }
        }
        other => panic!("not an assignment: {:?}", other),
    }
}

#[test]
fn pipes_and_ternaries() {
    match expression("x THEN PIPE + 1 OTHERWISE 0;").kind {
        ExprKind::Pipe {
            then, otherwise, ..
        } => {
            assert!(then.is_some());
            assert!(otherwise.is_some());
        }
        other => panic!("not a pipe: {:?}", other),
    }

    match expression("c ? 1;").kind {
        ExprKind::Ternary { no, .. } => assert!(no.is_none()),
        other => panic!("not a ternary: {:?}", other),
    }
}

#[test]
fn prefix_and_postfix_operators() {
    match expression("NOT a ??;").kind {
        ExprKind::Unary { op, operand } => {
            assert_eq!(op, UnaryOp::Not);
            assert!(matches!(operand.kind, ExprKind::NoneTest(_)));
        }
        other => panic!("not unary: {:?}", other),
    }
}

#[test]
fn calls_take_arguments_until_now() {
    match expression("CALL f WITH 1, x, \"t\" NOW;").kind {
        ExprKind::Call { name, args } => {
            assert_eq!(name, "f");
            assert_eq!(args.len(), 3);
        }
        other => panic!("not a call: {:?}", other),
    }
}

#[test]
fn none_literal_is_nothing() {
    assert_eq!(expression("NONE;").kind, ExprKind::Literal(Value::Nothing));
}

#[test]
fn for_loops_desugar_into_a_block() {
    let body = program("FOR MUTABLE NUMBER i IS 0 WHILE i < 3 DO i IS i + 1;");
    match &body[0].kind {
        StmtKind::Compound(inner) => {
            assert!(matches!(inner[0].kind, StmtKind::Variable { .. }));
            assert!(matches!(inner[1].kind, StmtKind::While { .. }));
        }
        other => panic!("not a block: {:?}", other),
    }
}

#[test]
fn match_blocks_lower_to_if_chains() {
    let body = program("MATCH WITH 1 BEGIN VALUE == 1 DO ;, DEFAULT ;, END");
    let StmtKind::Match { body, .. } = &body[0].kind else {
        panic!("not a match");
    };
    let StmtKind::Compound(branches) = &body.kind else {
        panic!("not a block");
    };
    assert_eq!(branches.len(), 2);
    match &branches[1].kind {
        StmtKind::If { condition, .. } => {
            assert_eq!(condition.kind, ExprKind::Literal(Value::Fact(true)));
        }
        other => panic!("not an if: {:?}", other),
    }
}

#[test]
fn declarations() {
    let body = program(
        "MUTABLE TEXT t;
         FUNCTION OVERRIDE f WITH NUMBER a, MUTABLE FACT b RETURNS NOTHING;
         PATTERN p WITH TEXT s;",
    );

    match &body[0].kind {
        StmtKind::Variable { declarator, init } => {
            assert!(declarator.mutable);
            assert_eq!(declarator.ty, ValueType::Text);
            assert!(init.is_none());
        }
        other => panic!("not a variable: {:?}", other),
    }
    match &body[1].kind {
        StmtKind::Function(decl) => {
            assert!(decl.overrides);
            assert_eq!(decl.params.len(), 2);
            assert!(decl.params[1].mutable);
            assert_eq!(decl.returns, ValueType::Nothing);
            assert!(!decl.has_body());
        }
        other => panic!("not a function: {:?}", other),
    }
    match &body[2].kind {
        StmtKind::Pattern(decl) => {
            assert_eq!(decl.param.name, "s");
            assert!(!decl.has_body());
        }
        other => panic!("not a pattern: {:?}", other),
    }
}

#[test]
fn jumps() {
    let body = program("SKIP; STOP; RETURN; RETURN 1;");
    let kinds: Vec<_> = body
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Jump { kind, value } => (*kind, value.is_some()),
            other => panic!("not a jump: {:?}", other),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            (JumpKind::Skip, false),
            (JumpKind::Stop, false),
            (JumpKind::Return, false),
            (JumpKind::Return, true),
        ]
    );
}

#[test]
fn syntax_errors() {
    assert_eq!(fails("1 + ;"), ErrorKind::ExpectedSymbol);
    assert_eq!(fails("- ;"), ErrorKind::ExpectedSymbol);
    assert_eq!(fails("1 + 2"), ErrorKind::ExpectedToken);
    assert_eq!(fails("MUTABLE a IS 1;"), ErrorKind::ExpectedToken);
    assert_eq!(fails("CALL f WITH 1;"), ErrorKind::ExpectedToken);
    assert_eq!(fails("IF TRUE DO"), ErrorKind::ExpectedSymbol);
    assert_eq!(fails("BEGIN 1;"), ErrorKind::ExpectedToken);
    assert_eq!(fails("END"), ErrorKind::ExpectedToken);
    assert_eq!(
        fails("FUNCTION f WITH NUMBER a, TEXT a RETURNS NOTHING;"),
        ErrorKind::DuplicateParam
    );
    assert_eq!(fails("MATCH WITH 1 BEGIN END"), ErrorKind::ExpectedToken);
}

#[test]
fn lexical_errors_abort_the_build() {
    assert_eq!(fails("a IS \"open;"), ErrorKind::TextSuddenEnd);
}
