//! End-to-end tests: read a term, execute it, inspect the execution.

use funcon::builder::read_term;
use funcon::catalog::YIELDED;
use funcon::config::InterpreterConfig;
use funcon::interpreter::{Execution, Interpreter, Outcome};
use funcon::term::Term;

fn execute_with(source: &str, inputs: &[&str]) -> (Execution, Interpreter) {
    let term = read_term(source).expect("term should read");
    let inputs: Vec<Term> = inputs
        .iter()
        .map(|input| read_term(input).expect("input should read"))
        .collect();
    let mut interpreter = Interpreter::new(InterpreterConfig::default()).unwrap();
    let execution = interpreter.execute(term, inputs).expect("execution failed");
    (execution, interpreter)
}

fn value_of(source: &str) -> Term {
    let (execution, _) = execute_with(source, &[]);
    match execution.outcome {
        Outcome::Value(value) => value,
        Outcome::Stuck { stuck, .. } => panic!("expected a value, got {stuck}"),
    }
}

#[test]
fn e2e_boolean_and() {
    assert_eq!(value_of("and(true, false)"), Term::Bool(false));
    assert_eq!(value_of("and()"), Term::Bool(true));
    assert_eq!(value_of("and(true, true, false, true)"), Term::Bool(false));
    assert_eq!(value_of("and(true, true, true)"), Term::Bool(true));
    assert_eq!(value_of("or(false, not(false))"), Term::Bool(true));
}

#[test]
fn e2e_integer_add() {
    assert_eq!(value_of("integer-add(1, 2, 3)"), Term::Int(6));
    assert_eq!(value_of("int-add(1, int-mul(2, 3))"), Term::Int(7));
}

#[test]
fn e2e_division_by_zero_has_no_result() {
    assert_eq!(value_of("integer-divide(1, 0)"), Term::empty());
}

#[test]
fn e2e_map_lookup() {
    assert_eq!(value_of(r#"map-lookup({1 |-> "a"}, 1)"#), Term::string("a"));
    assert_eq!(value_of(r#"map-lookup({1 |-> "a"}, 2)"#), Term::empty());
}

#[test]
fn e2e_give_and_given() {
    assert_eq!(value_of("give(3, integer-add(given, 4))"), Term::Int(7));
}

#[test]
fn e2e_given_without_give_is_stuck() {
    let (execution, _) = execute_with("integer-add(given, 1)", &[]);
    assert!(matches!(execution.outcome, Outcome::Stuck { .. }));
}

#[test]
fn e2e_print_collects_output() {
    let (execution, _) = execute_with("sequential(print(1), print(2, 3), 4)", &[]);
    assert_eq!(execution.value(), Some(&Term::Int(4)));
    assert_eq!(
        execution.standard_out,
        vec![Term::Int(1), Term::Int(2), Term::Int(3)]
    );
}

#[test]
fn e2e_read_consumes_input() {
    let (execution, _) = execute_with("integer-add(read, read)", &["5", "6"]);
    assert_eq!(execution.value(), Some(&Term::Int(11)));
}

#[test]
fn e2e_read_past_end_is_stuck() {
    let (execution, _) = execute_with("read", &[]);
    let Outcome::Stuck { term, stuck } = execution.outcome else {
        panic!("expected stuck");
    };
    assert_eq!(term, read_term("read").unwrap());
    assert_eq!(stuck.operator, "read");
}

#[test]
fn e2e_atomic_consumes_yield() {
    let (execution, interpreter) =
        execute_with("atomic(sequential(print(1), yield, print(2), 3))", &[]);
    assert_eq!(execution.value(), Some(&Term::Int(3)));
    assert_eq!(execution.standard_out, vec![Term::Int(1), Term::Int(2)]);
    assert!(!interpreter.entities().contains(YIELDED));
}

#[test]
fn e2e_variables() {
    let source = "give(allocate-variable(integers), \
                  sequential(assign(given, 42), assigned(given)))";
    let (execution, _) = execute_with(source, &[]);
    assert_eq!(execution.value(), Some(&Term::Int(42)));
    assert!(matches!(execution.store, Term::Map(_)));
}

#[test]
fn e2e_assign_wrong_type_is_stuck() {
    let source = "give(allocate-variable(booleans), assign(given, 1))";
    let (execution, _) = execute_with(source, &[]);
    assert!(matches!(execution.outcome, Outcome::Stuck { .. }));
}

#[test]
fn e2e_type_membership() {
    assert_eq!(value_of("is-in-type(3, integers | booleans)"), Term::Bool(true));
    assert_eq!(value_of("is-in-type(-3, natural-numbers)"), Term::Bool(false));
    assert_eq!(value_of("is-in-type(true, ~integers)"), Term::Bool(true));
}

#[test]
fn e2e_sets_and_lists() {
    assert_eq!(value_of("set-size({1, 2, 2, 3})"), Term::Int(3));
    assert_eq!(
        value_of("list-append([1], [2, 3])"),
        Term::list([Term::Int(1), Term::Int(2), Term::Int(3)])
    );
    assert_eq!(
        value_of("reverse(1, 2, 3)"),
        read_term("(3, 2, 1)").unwrap()
    );
}

#[test]
fn e2e_multiple_values_result() {
    assert_eq!(
        value_of("tuple-elements(tuple(1, 2))"),
        read_term("(1, 2)").unwrap()
    );
}

#[test]
fn e2e_stuck_display() {
    let (execution, _) = execute_with("fail", &[]);
    let Outcome::Stuck { stuck, .. } = execution.outcome else {
        panic!("expected stuck");
    };
    assert_eq!(stuck.to_string(), "fail is stuck: failed");
}
