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
 * Value coercions.
 *
 * Every operator and every typed binding funnels its operands through
 * these functions. They are total: an unsupported conversion produces
 * `None` (or `Value::Nothing`), never an error.
 */

use crate::lexer::Lexer;
use crate::value::{Value, ValueType};

/// Coerces a value to a number.
///
/// # Behavior
/// - `Number` → itself
/// - `Text` → parsed with the lexer's numeric literal grammar (bases,
///   digit separators), an optional leading `-` is honored, trailing
///   garbage is ignored
/// - `Fact` → `1` / `0`
/// - `Nothing` → `None`
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Text(s) => parse_number(s),
        Value::Fact(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Nothing => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    match text.strip_prefix('-') {
        Some(rest) => Lexer::number_prefix(rest).map(|n| -n),
        None => Lexer::number_prefix(text),
    }
}

/// Coerces a value to text. Facts render as `TRUE` / `FALSE`.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::Text(s) => Some(s.clone()),
        Value::Fact(true) => Some("TRUE".to_string()),
        Value::Fact(false) => Some("FALSE".to_string()),
        Value::Nothing => None,
    }
}

/// Coerces a value to a fact: non-zero numbers and non-empty texts are true.
pub fn as_fact(value: &Value) -> Option<bool> {
    match value {
        Value::Number(n) => Some(*n != 0.0),
        Value::Text(s) => Some(!s.is_empty()),
        Value::Fact(b) => Some(*b),
        Value::Nothing => None,
    }
}

/// Coerces a value to the given declared type.
///
/// `Nothing` and `Any` targets always produce `Value::Nothing`.
pub fn as_type(value: &Value, ty: ValueType) -> Value {
    let cast = match ty {
        ValueType::Number => as_number(value).map(Value::Number),
        ValueType::Text => as_text(value).map(Value::Text),
        ValueType::Fact => as_fact(value).map(Value::Fact),
        ValueType::Nothing | ValueType::Any => None,
    };
    cast.unwrap_or(Value::Nothing)
}

/// Runtime type tag of a value.
pub fn type_of(value: &Value) -> ValueType {
    match value {
        Value::Number(_) => ValueType::Number,
        Value::Text(_) => ValueType::Text,
        Value::Fact(_) => ValueType::Fact,
        Value::Nothing => ValueType::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn text_to_number_uses_literal_grammar() {
        assert_eq!(as_number(&text("42")), Some(42.0));
        assert_eq!(as_number(&text("-2.5")), Some(-2.5));
        assert_eq!(as_number(&text("0x1F")), Some(31.0));
        assert_eq!(as_number(&text("1_000")), Some(1000.0));
        assert_eq!(as_number(&text("7 apples")), Some(7.0));
        assert_eq!(as_number(&text("apples")), None);
        assert_eq!(as_number(&text("")), None);
        assert_eq!(as_number(&text("-")), None);
    }

    #[test]
    fn facts_and_nothing() {
        assert_eq!(as_number(&Value::Fact(true)), Some(1.0));
        assert_eq!(as_text(&Value::Fact(false)), Some("FALSE".to_string()));
        assert_eq!(as_fact(&Value::Number(0.0)), Some(false));
        assert_eq!(as_fact(&text("")), Some(false));
        assert_eq!(as_fact(&text("x")), Some(true));
        assert_eq!(as_fact(&Value::Nothing), None);
        assert_eq!(as_text(&Value::Nothing), None);
    }

    #[test]
    fn numbers_render_with_a_dot() {
        assert_eq!(as_text(&Value::Number(1.5)), Some("1.5".to_string()));
        assert_eq!(as_text(&Value::Number(3.0)), Some("3".to_string()));
        assert_eq!(as_text(&Value::Number(-0.25)), Some("-0.25".to_string()));
    }

    #[test]
    fn casting_to_own_type_is_identity() {
        for value in [Value::Number(12.75), text("hello"), Value::Fact(true)] {
            assert_eq!(as_type(&value, type_of(&value)), value);
        }
    }

    #[test]
    fn nothing_targets_drop_the_value() {
        assert_eq!(as_type(&Value::Number(1.0), ValueType::Nothing), Value::Nothing);
        assert_eq!(as_type(&Value::Number(1.0), ValueType::Any), Value::Nothing);
        assert_eq!(as_type(&Value::Nothing, ValueType::Text), Value::Nothing);
    }

    #[test]
    fn numbers_survive_a_text_round_trip() {
        for literal in ["0x1F", "0o17", "0b101", "1_234.5", "0.125"] {
            let n = as_number(&text(literal)).unwrap();
            let back = as_number(&Value::Text(as_text(&Value::Number(n)).unwrap())).unwrap();
            assert!((n - back).abs() < crate::config::EPSILON);
        }
    }
}
