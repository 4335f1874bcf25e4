//! Function, closure and call scoping tests

use dlang::*;
use pretty_assertions::assert_eq;

fn output(src: &str) -> Vec<String> {
    run(src).expect("run failed").printed_lines
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src) {
        Err(InterpreterError::Runtime(err)) => err,
        other => panic!("expected runtime error, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Calls and Returns
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_sum_returns_value() {
    let src = r#"
function sum(a, b) {
    dede a + b
}
print sum(5, 10)
"#;
    assert_eq!(output(src), vec!["15"]);
}

#[test]
fn test_calls_do_not_share_state() {
    let src = r#"
function sum(a, b) {
    let result = a + b
    dede result
}
print sum(5, 10)
print sum(1, 2)
"#;
    let result = run(src).unwrap();
    assert_eq!(result.printed_lines, vec!["15", "3"]);
    assert!(!result.final_bindings.contains_key("a"));
    assert!(!result.final_bindings.contains_key("result"));
}

#[test]
fn test_call_for_side_effect() {
    let src = r#"
function greet(name) {
    print "Hello, " + name
}
greet("Bob")
greet("Eve")
"#;
    assert_eq!(output(src), vec!["Hello, Bob", "Hello, Eve"]);
}

#[test]
fn test_missing_dede_yields_unit() {
    assert_eq!(output("function noop() { }\nprint noop()"), vec!["()"]);
}

#[test]
fn test_bare_dede_yields_unit() {
    let src = r#"
function early(x) {
    if x { dede }
    print "not reached"
}
print early(1)
"#;
    assert_eq!(output(src), vec!["()"]);
}

#[test]
fn test_dede_escapes_loop() {
    let src = r#"
function first_over(limit) {
    let i = 0
    while 1 {
        i = i + 1
        if i > limit { dede i }
    }
}
print first_over(3)
"#;
    assert_eq!(output(src), vec!["4"]);
}

#[test]
fn test_arguments_evaluated_in_caller_scope() {
    let src = r#"
let x = 10
function show(x) { print x }
show(x + 1)
print x
"#;
    assert_eq!(output(src), vec!["11", "10"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Recursion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_recursive_factorial() {
    let src = r#"
function fact(n) {
    if n <= 1 { dede 1 }
    dede n * fact(n - 1)
}
print fact(5)
print fact(10)
"#;
    assert_eq!(output(src), vec!["120", "3628800"]);
}

#[test]
fn test_recursive_fibonacci() {
    let src = r#"
function fib(n) {
    if n < 2 { dede n }
    dede fib(n - 1) + fib(n - 2)
}
print fib(15)
"#;
    assert_eq!(output(src), vec!["610"]);
}

#[test]
fn test_default_depth_limit_fails_cleanly() {
    let err = run("function f(n) { dede f(n + 1) }\nprint f(0)").unwrap_err();
    assert_eq!(
        err,
        InterpreterError::Runtime(RuntimeError::StackOverflow {
            depth: 1001,
            max: 1000
        })
    );
}

#[test]
fn test_deep_recursion_within_default_limit() {
    let src = r#"
function down(n) {
    if n == 0 { dede "bottom" }
    dede down(n - 1)
}
print down(990)
"#;
    assert_eq!(output(src), vec!["bottom"]);
}

#[test]
fn test_runaway_recursion_hits_depth_limit() {
    let mut interp = Interpreter::with_context(EvalContext::with_max_call_depth(50));
    let err = interp
        .eval_source("function down(n) { dede down(n + 1) }\ndown(0)")
        .unwrap_err();
    assert_eq!(
        err,
        InterpreterError::Runtime(RuntimeError::StackOverflow { depth: 51, max: 50 })
    );

    // The session is still usable afterwards
    assert_eq!(interp.eval_source("print 1").unwrap(), vec!["1"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Closures
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_function_sees_defining_scope() {
    let src = r#"
let greeting = "Hi"
function greet(name) { dede greeting + " " + name }
greeting = "Hello"
print greet("Ann")
"#;
    assert_eq!(output(src), vec!["Hello Ann"]);
}

#[test]
fn test_function_writes_through_to_global() {
    let src = r#"
let count = 0
function bump() { count = count + 1 }
bump()
bump()
print count
"#;
    assert_eq!(output(src), vec!["2"]);
}

#[test]
fn test_callee_does_not_see_caller_locals() {
    let src = r#"
function inner() { dede secret }
function outer() {
    let secret = 42
    dede inner()
}
outer()
"#;
    assert_eq!(
        runtime_error(src),
        RuntimeError::UndefinedVariable {
            name: "secret".to_string()
        }
    );
}

#[test]
fn test_counter_closure_keeps_state() {
    let src = r#"
function make_counter() {
    let count = 0
    function next() {
        count = count + 1
        dede count
    }
    dede next
}
let a = make_counter()
let b = make_counter()
print a()
print a()
print b()
"#;
    assert_eq!(output(src), vec!["1", "2", "1"]);
}

#[test]
fn test_function_bound_to_new_name() {
    let src = r#"
function double(n) { dede n * 2 }
let twice = double
print twice(21)
"#;
    assert_eq!(output(src), vec!["42"]);
}

#[test]
fn test_local_shadows_global() {
    let src = r#"
let x = "global"
function f() {
    let x = "local"
    dede x
}
print f()
print x
"#;
    assert_eq!(output(src), vec!["local", "global"]);
}

#[test]
fn test_closure_escaping_through_assignment_survives_call() {
    let src = r#"
let saved = 0
function setup() {
    let secret = 7
    function reveal() { dede secret }
    saved = reveal
}
setup()
print saved()
"#;
    assert_eq!(output(src), vec!["7"]);
}

#[test]
fn test_nested_helper_reused_across_calls() {
    let src = r#"
function total(n) {
    function square(x) { dede x * x }
    let sum = 0
    let i = 1
    while i <= n {
        sum = sum + square(i)
        i = i + 1
    }
    dede sum
}
let k = 0
while k < 3 {
    k = k + 1
    print total(k)
}
"#;
    assert_eq!(output(src), vec!["1", "5", "14"]);
}
