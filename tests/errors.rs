//! Error-path coverage for each pipeline stage, exercised through the
//! public API rather than by constructing internal types directly.

#[test]
fn unknown_character_is_a_lexer_error() {
    let err = erio::run_to_string("x = @").unwrap_err();
    assert!(matches!(err, erio::ErioError::LexerError(_)));
}

#[test]
fn unexpected_token_is_a_syntax_error() {
    let err = erio::run_to_string("if then end-if").unwrap_err();
    assert!(matches!(err, erio::ErioError::SyntaxError(_)));
}

#[test]
fn undefined_variable_is_a_runtime_error() {
    let err = erio::run_to_string("print(missing)").unwrap_err();
    assert!(matches!(err, erio::ErioError::RuntimeError(_)));
}

#[test]
fn calling_a_non_function_value_is_a_runtime_error() {
    let source = r#"
x = 1
x()
"#;
    let err = erio::run_to_string(source).unwrap_err();
    assert!(matches!(err, erio::ErioError::RuntimeError(_)));
}

#[test]
fn type_mismatch_in_arithmetic_primitive_is_a_runtime_error() {
    let err = erio::run_to_string(r#"print(add(1, "two"))"#).unwrap_err();
    assert!(matches!(err, erio::ErioError::RuntimeError(_)));
}

#[test]
fn out_of_range_index_is_a_runtime_error() {
    let source = r#"
a = [1, 2]
print(geti(a, 5))
"#;
    let err = erio::run_to_string(source).unwrap_err();
    assert!(matches!(err, erio::ErioError::RuntimeError(_)));
}

#[test]
fn errors_implement_display_with_a_phase_prefix() {
    let err = erio::run_to_string("x = @").unwrap_err();
    assert!(err.to_string().starts_with("lexer error"));
}

#[test]
fn string_ordering_comparison_works_lexicographically() {
    let output = erio::run_to_string(r#"print("apple" < "banana")"#).unwrap();
    assert_eq!(output, "true");
}

#[test]
fn ordering_comparison_across_mixed_kinds_is_a_runtime_error() {
    let err = erio::run_to_string(r#"print(1 < "a")"#).unwrap_err();
    assert!(matches!(err, erio::ErioError::RuntimeError(_)));
}

#[test]
fn void_call_used_as_an_expression_is_a_runtime_error() {
    let source = r#"
a = [1]
x = insert(a, 0, 2)
"#;
    let err = erio::run_to_string(source).unwrap_err();
    assert!(matches!(err, erio::ErioError::RuntimeError(_)));
}
