//! Piping tests
//!
//! Substitution of answers and computed values into question text

mod common;

use common::TestSurvey;

#[test]
fn test_pipe_variable() {
    let engine = TestSurvey::new().answer("Q1", "Bob").engine();
    assert_eq!(engine.pipe("Hello {Q1}"), "Hello Bob");
    assert_eq!(engine.pipe("{Q1}, {Q1}!"), "Bob, Bob!");
}

#[test]
fn test_pipe_suffixes_and_conventions() {
    let engine = TestSurvey::new()
        .answer("Q2_SQ001", "Paris")
        .answer("Q3", 4)
        .engine();
    assert_eq!(engine.pipe("You chose {Q2_SQ001.SelectedValue}"), "You chose Paris");
    assert_eq!(engine.pipe("{Q2.SQ001}"), "Paris");
    assert_eq!(engine.pipe("{Q3.ChosenValue} items"), "4 items");
}

#[test]
fn test_pipe_expressions() {
    let engine = TestSurvey::new()
        .answer("PRICE", 19.99)
        .answer("QTY", "3")
        .answer("NAME", "ann lee")
        .engine();
    assert_eq!(engine.pipe("Total: {number_format(PRICE * QTY, 2)}"), "Total: 59.97");
    assert_eq!(engine.pipe("Hi {ucwords(NAME)}"), "Hi Ann Lee");
    assert_eq!(engine.pipe("{QTY + 1}"), "31");
    assert_eq!(engine.pipe("{QTY * 1 + 1}"), "4");
    assert_eq!(engine.pipe("{QTY >= 3}"), "3");
    assert_eq!(engine.pipe("{(QTY >= 3)}"), "true");
}

#[test]
fn test_pipe_rand_with_fixed_bounds() {
    let engine = TestSurvey::new().engine();
    assert_eq!(engine.pipe("{rand(1,1)}"), "1");
}

#[test]
fn test_pipe_leaves_unresolved_spans() {
    let engine = TestSurvey::new().answer("Q1", "Bob").engine();
    assert_eq!(engine.pipe("Hello {Q9}"), "Hello {Q9}");
    assert_eq!(engine.pipe("{unknown(Q1)} and {Q1}"), "{unknown(Q1)} and Bob");
    assert_eq!(engine.pipe("{number_format(1, 1000)}"), "{number_format(1, 1000)}");
}

#[test]
fn test_pipe_empty_and_plain_text() {
    let engine = TestSurvey::new().engine();
    assert_eq!(engine.pipe(""), "");
    assert_eq!(engine.pipe("Plain text"), "Plain text");
    assert_eq!(engine.pipe("{}"), "{}");
}

#[test]
fn test_pipe_numbers_print_plainly() {
    let engine = TestSurvey::new().answer("Q1", 10).engine();
    assert_eq!(engine.pipe("{Q1 / 4}"), "2.5");
    assert_eq!(engine.pipe("{Q1 / 2}"), "5");
    assert_eq!(engine.pipe("{Q1 / 0}"), "NaN");
}
