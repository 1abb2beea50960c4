//! End-to-end scenarios exercising the full lex/parse/evaluate pipeline
//! through the public `run_to_string` entry point.

#[test]
fn hello_world() {
    let output = erio::run_to_string(r#"print("hello world")"#).unwrap();
    assert_eq!(output, "hello world");
}

#[test]
fn conditional_loop_and_sequence_mutation() {
    let source = r#"
test = true
if test then
    total = add(4, 3)
else
    total = 3
end-if
count = 0
a = ["this", "was", "a"]
insert(a, len(a), "triumph")
print(geti(a, 3))
while lt(count, total) do
    print("!")
    count = add(count, 1)
end-while
"#;
    let output = erio::run_to_string(source).unwrap();
    assert_eq!(output, "triumph!!!!!!!");
}

#[test]
fn user_defined_function() {
    let source = r#"
def mul(x, y)
    c = 0
    a = 0
    while lt(c, y) do
        a = add(a, x)
        c = add(c, 1)
    end-while
    return a
end-def
print(mul(6, 7))
"#;
    let output = erio::run_to_string(source).unwrap();
    assert_eq!(output, "42");
}

#[test]
fn parenthesized_precedence() {
    let output = erio::run_to_string("print((1 + 2) * 3)").unwrap();
    assert_eq!(output, "9");
}

#[test]
fn long_boolean_expression_across_every_operator() {
    let source = "x = 7==1 and 10/5 <= 11 or 8*2-4 > -15 or not 5 != 9 % 6\nprint(x)";
    let output = erio::run_to_string(source).unwrap();
    assert_eq!(output, "true");
}

#[test]
fn top_level_return_is_rejected_before_any_output() {
    let err = erio::run_to_string("print(\"should not print\")\nreturn 1").unwrap_err();
    assert!(matches!(err, erio::ErioError::SyntaxError(_)));
}

#[test]
fn negative_integer_literals_via_unary_minus() {
    let output = erio::run_to_string("print(-5)").unwrap();
    assert_eq!(output, "-5");
}

#[test]
fn nested_function_calls_and_enclosure() {
    let source = r#"
def square(x)
    return add(x, x)
end-def
print(square(square(2)))
"#;
    assert_eq!(erio::run_to_string(source).unwrap(), "8");
}
