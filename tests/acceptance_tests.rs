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


//! Whole programs, checked by everything they print.

use pretty_assertions::assert_eq;

use verbose::diagnostics::CaptureSink;
use verbose::error::ErrorKind;

fn assert_prints(program: &str, expected: &str) {
    let sink = verbose::run_source(program, CaptureSink::new());
    assert_eq!(sink.errors(), Vec::<ErrorKind>::new());
    assert_eq!(sink.output(), expected);
}

#[test]
fn references_and_text_builtins() {
    let program = r#"
        FUNCTION add WITH MUTABLE TEXT t RETURNS NOTHING
        BEGIN
            t IS t ++ " ano lot";
            CALL Print WITH {CALL First WITH t NOW} NOW;
            CALL Print WITH {CALL Last WITH t NOW} NOW;
            CALL Print WITH {CALL Body WITH t NOW} NOW;
            CALL Print WITH {CALL Tail WITH t NOW} NOW;
            MUTABLE TEXT a IS NONE;
            MUTABLE TEXT b IS NONE;
            CALL Split WITH t, a, b NOW;
            CALL Print WITH a NOW;
            CALL Print WITH b NOW;
            CALL BackSplit WITH t, a, b NOW;
            CALL Print WITH a NOW;
            CALL Print WITH b NOW;
        END

        MUTABLE TEXT t IS "ban";
        CALL add WITH t NOW;
        CALL Print WITH t NOW;
    "#;

    let expected = [
        "ban", "lot", "ban ano", "ano lot", "ban", "ano lot", "ban ano", "lot", "ban ano lot",
    ]
    .concat();

    assert_prints(program, &expected);
}

#[test]
fn builtin_fizz_buzz_pattern() {
    let program = "
        CALL FizzBuzz WITH 3 NOW;
        CALL FizzBuzz WITH 5 NOW;
        CALL FizzBuzz WITH 15 NOW;
        CALL FizzBuzz WITH 22 NOW;
    ";
    assert_prints(program, "FizzBuzzFizzBuzz22");
}

#[test]
fn simple_while() {
    let program = "
        MUTABLE NUMBER i IS 5;

        WHILE i > 0 DO
        BEGIN
            CALL Print WITH i NOW;
            i IS i - 1;
        END
    ";
    assert_prints(program, "54321");
}

#[test]
fn while_with_stop() {
    let program = "
        MUTABLE NUMBER i IS 0;

        WHILE i >= 0 DO
        BEGIN
            IF i == 3 DO STOP;  # leaves the loop at once #
            i IS i + 1;
            CALL Print WITH i NOW;
        END;
    ";
    assert_prints(program, "123");
}

#[test]
fn while_with_skip() {
    let program = "
        MUTABLE NUMBER i IS 10;

        WHILE i > 0 DO
        BEGIN
            i IS i - 1;
            IF i <= 3 DO SKIP;  # skips the rest of the body #
            i IS i - 1;
            CALL Print WITH i NOW;
        END;
        CALL Print WITH i NOW;
    ";
    assert_prints(program, "8640");
}

#[test]
fn for_loop() {
    let program = "
        FOR MUTABLE NUMBER i IS 5 WHILE i > 0 DO
        BEGIN
            i IS i - 1;
            CALL Print WITH i NOW;
        END;
    ";
    assert_prints(program, "43210");
}

#[test]
fn anonymous_match() {
    let program = r#"
        MATCH WITH 1
        BEGIN
            FALSE DO CALL Print WITH "false" NOW;,         # never taken #
            (VALUE + 1) >= 2 DO CALL Print WITH VALUE NOW;,
            DEFAULT;,
        END
    "#;
    assert_prints(program, "1");
}

#[test]
fn nested_match_shadows_value() {
    let program = "
        MATCH WITH 1
        BEGIN
            TRUE DO MATCH WITH VALUE * 2
                BEGIN
                    DEFAULT CALL Print WITH VALUE NOW;,
                END,
            DEFAULT;,
        END
    ";
    assert_prints(program, "2");
}

#[test]
fn user_pattern_with_unicode_names() {
    let program = r#"
        MUTABLE NUMBER a IS 0;

        PATTERN testGąska WITH TEXT gąska
        BEGIN
            VALUE ?? DO a IS NONE;,
            VALUE == "balbinka" OR VALUE == "barbara" DO a IS 1;,
            VALUE == "kasia" DO a IS 2;,
            VALUE == CALL getSavedGoose NOW DO a IS 3;,
            DEFAULT a IS 0;,
        END

        CALL testGąska WITH "balbinka" NOW;  # sets a to 1 #
        CALL Print WITH a NOW;
    "#;
    assert_prints(program, "1");
}
