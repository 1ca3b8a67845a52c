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
 * Expression evaluation.
 *
 * Every expression produces a [`Value`]. Operators never fail on values
 * they cannot coerce; they produce `Nothing` instead. The only operator
 * errors are DivisionByZero and ExpectedNotNone.
 */

use crate::ast::{BinaryOp, Declarator, Expr, ExprKind, UnaryOp};
use crate::config::EPSILON;
use crate::diagnostics::Sink;
use crate::error::{ErrorKind, InterpreterError};
use crate::interpreter::casting::{as_fact, as_number, as_text, as_type};
use crate::interpreter::helpers::{is_reserved, undefined, PIPE};
use crate::interpreter::scope::{Scope, Variable};
use crate::interpreter::{Eval, Interpreter, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::value::{Value, ValueType};

impl<S: Sink> Interpreter<S> {
    pub fn eval_expr(&mut self, expr: &Expr) -> Eval<Value> {
        self.enter(expr.span)?;
        self.mark(expr.span);

        let value =
            stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_kind(expr))?;

        self.leave();
        self.last_value = value.clone();
        Ok(value)
    }

    fn eval_kind(&mut self, expr: &Expr) -> Eval<Value> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(value.clone()),

            ExprKind::Identifier(name) => Ok(self.read_variable(name)?),

            ExprKind::Unary { op, operand } => {
                let value = self.eval_value(operand)?;
                Ok(unary(*op, &value))
            }

            ExprKind::Binary { op, left, right } => {
                let left = self.eval_value(left)?;
                let right = self.eval_value(right)?;
                Ok(binary(*op, &left, &right)?)
            }

            ExprKind::Ternary { condition, yes, no } => {
                let condition = self.eval_value(condition)?;
                match as_fact(&condition) {
                    None => Err(InterpreterError::new(ErrorKind::ExpectedNotNone).into()),
                    Some(true) => self.eval_expr(yes),
                    Some(false) => match no {
                        Some(no) => self.eval_expr(no),
                        None => Ok(Value::Nothing),
                    },
                }
            }

            ExprKind::Pipe {
                first,
                then,
                otherwise,
            } => self.eval_pipe(first, then.as_deref(), otherwise.as_deref()),

            ExprKind::NoneTest(operand) => {
                let value = self.eval_value(operand)?;
                Ok(Value::Fact(value.is_nothing()))
            }

            ExprKind::Assign { target, value } => self.eval_assign(target, value),

            ExprKind::Call { name, args } => self.eval_call(name, args, expr.span),
        }
    }

    /// `first THEN then OTHERWISE otherwise`
    ///
    /// `PIPE` is bound to `first` in a scope of its own while the branches
    /// run. A `THEN` result that is Nothing falls through to `OTHERWISE`.
    fn eval_pipe(
        &mut self,
        first: &Expr,
        then: Option<&Expr>,
        otherwise: Option<&Expr>,
    ) -> Eval<Value> {
        let mut carried = self.eval_value(first)?;

        let pipe = Declarator::new(first.span, true, ValueType::Number, PIPE);
        let context = self.current_mut();
        context.push_scope(Scope::new());
        context.insert_variable(Variable::new(pipe, carried.clone()));

        let result = self.eval_pipe_branches(&mut carried, then, otherwise);

        self.current_mut().pop_scope();
        result
    }

    fn eval_pipe_branches(
        &mut self,
        carried: &mut Value,
        then: Option<&Expr>,
        otherwise: Option<&Expr>,
    ) -> Eval<Value> {
        let mut result = Value::Nothing;

        if !carried.is_nothing() {
            if let Some(then) = then {
                *carried = self.eval_expr(then)?;
                result = carried.clone();
            }
        }

        if carried.is_nothing() {
            if let Some(otherwise) = otherwise {
                result = self.eval_expr(otherwise)?;
            }
        }

        Ok(result)
    }

    /// `target IS value`
    ///
    /// The value is cast to the declared type of the variable that owns
    /// the storage, then written there.
    fn eval_assign(&mut self, target: &Expr, value: &Expr) -> Eval<Value> {
        let Some(name) = target.as_identifier() else {
            return Err(InterpreterError::new(ErrorKind::AssignmentToNotVariable).into());
        };
        if is_reserved(name) {
            return Err(InterpreterError::new(ErrorKind::VariableReservedAssignment).into());
        }

        let site = self.find_site(name).ok_or_else(|| undefined(name))?;
        let owner = self.owner_site(site);
        let declarator = self
            .variable_at(&owner)
            .map(|v| v.declarator.clone())
            .ok_or_else(|| undefined(name))?;

        if !declarator.mutable {
            return Err(InterpreterError::new(ErrorKind::VariableImmutable)
                .with_arg(name)
                .into());
        }

        let value = self.eval_value(value)?;
        let value = as_type(&value, declarator.ty);
        self.write_variable(&owner, value.clone())?;
        Ok(value)
    }
}

fn unary(op: UnaryOp, value: &Value) -> Value {
    match op {
        UnaryOp::Negate => as_number(value).map_or(Value::Nothing, |n| Value::Number(-n)),
        UnaryOp::Not => as_fact(value).map_or(Value::Nothing, |b| Value::Fact(!b)),
    }
}

/// Applies a binary operator to two evaluated operands.
fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
    use BinaryOp::*;

    match op {
        Add | Sub | Mul | Div | Mod => arithmetic(op, left, right),

        And | Or => Ok(match (as_fact(left), as_fact(right)) {
            (Some(l), Some(r)) => Value::Fact(if op == And { l && r } else { l || r }),
            _ => Value::Nothing,
        }),

        Concat => Ok(match (as_text(left), as_text(right)) {
            (Some(l), Some(r)) => Value::Text(l + &r),
            _ => Value::Nothing,
        }),

        EqualText | NotEqualText => Ok(match (as_text(left), as_text(right)) {
            (Some(l), Some(r)) => Value::Fact((l == r) == (op == EqualText)),
            _ => Value::Nothing,
        }),

        Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
            Ok(compare(op, left, right).map_or(Value::Nothing, Value::Fact))
        }
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
    let (Some(l), Some(r)) = (as_number(left), as_number(right)) else {
        return Ok(Value::Nothing);
    };

    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        _ => l % r,
    };

    // x / 0 is infinite, x % 0 is NaN
    if !result.is_finite() {
        return Err(InterpreterError::new(ErrorKind::DivisionByZero));
    }
    Ok(Value::Number(result))
}

/// Comparison dispatches on the type of the left operand. Texts compare
/// by length; for facts TRUE is greater than FALSE. Equality of numbers
/// allows an error of [`EPSILON`].
fn compare(op: BinaryOp, left: &Value, right: &Value) -> Option<bool> {
    match left {
        Value::Number(l) => compare_numbers(op, *l, as_number(right)?),
        Value::Text(l) => {
            let r = as_text(right)?;
            compare_numbers(op, l.chars().count() as f64, r.chars().count() as f64)
        }
        Value::Fact(l) => {
            let (l, r) = (*l, as_fact(right)?);
            Some(match op {
                BinaryOp::Equal => l == r,
                BinaryOp::NotEqual => l != r,
                BinaryOp::Greater => l && !r,
                BinaryOp::Less => !l && r,
                BinaryOp::GreaterEqual => l == r || (l && !r),
                BinaryOp::LessEqual => l == r || (!l && r),
                _ => return None,
            })
        }
        Value::Nothing => None,
    }
}

fn compare_numbers(op: BinaryOp, l: f64, r: f64) -> Option<bool> {
    let equal = (l - r).abs() <= EPSILON;
    Some(match op {
        BinaryOp::Equal => equal,
        BinaryOp::NotEqual => !equal,
        BinaryOp::Greater => l > r,
        BinaryOp::Less => l < r,
        BinaryOp::GreaterEqual => l > r || equal,
        BinaryOp::LessEqual => l < r || equal,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn arithmetic_coerces_operands() {
        assert_eq!(binary(BinaryOp::Add, &text("2"), &num(3.0)), Ok(num(5.0)));
        assert_eq!(
            binary(BinaryOp::Mul, &Value::Fact(true), &num(7.0)),
            Ok(num(7.0))
        );
        assert_eq!(
            binary(BinaryOp::Sub, &Value::Nothing, &num(1.0)),
            Ok(Value::Nothing)
        );
    }

    #[test]
    fn division_and_remainder_by_zero_fail() {
        for op in [BinaryOp::Div, BinaryOp::Mod] {
            let err = binary(op, &num(1.0), &num(0.0)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::DivisionByZero);
        }
    }

    #[test]
    fn texts_compare_by_length() {
        assert_eq!(
            binary(BinaryOp::Greater, &text("aa"), &text("b")),
            Ok(Value::Fact(true))
        );
        assert_eq!(
            binary(BinaryOp::Equal, &text("ab"), &text("cd")),
            Ok(Value::Fact(true))
        );
        assert_eq!(
            binary(BinaryOp::EqualText, &text("ab"), &text("cd")),
            Ok(Value::Fact(false))
        );
    }

    #[test]
    fn numbers_compare_within_epsilon() {
        assert_eq!(
            binary(BinaryOp::Equal, &num(0.1 + 0.2), &num(0.3)),
            Ok(Value::Fact(true))
        );
        assert_eq!(
            binary(BinaryOp::GreaterEqual, &num(1.0), &num(1.0 + 1e-12)),
            Ok(Value::Fact(true))
        );
        assert_eq!(
            binary(BinaryOp::NotEqual, &num(1.0), &num(1.0 + 1e-12)),
            Ok(Value::Fact(false))
        );
    }

    #[test]
    fn facts_order_true_above_false() {
        let t = Value::Fact(true);
        let f = Value::Fact(false);
        assert_eq!(binary(BinaryOp::Greater, &t, &f), Ok(Value::Fact(true)));
        assert_eq!(binary(BinaryOp::Less, &t, &f), Ok(Value::Fact(false)));
        assert_eq!(binary(BinaryOp::LessEqual, &f, &f), Ok(Value::Fact(true)));
    }

    #[test]
    fn comparing_from_nothing_is_nothing() {
        assert_eq!(
            binary(BinaryOp::Equal, &Value::Nothing, &num(1.0)),
            Ok(Value::Nothing)
        );
    }

    #[test]
    fn unary_operators() {
        assert_eq!(unary(UnaryOp::Negate, &text("0x10")), num(-16.0));
        assert_eq!(unary(UnaryOp::Not, &num(0.0)), Value::Fact(true));
        assert_eq!(unary(UnaryOp::Not, &Value::Nothing), Value::Nothing);
    }
}
