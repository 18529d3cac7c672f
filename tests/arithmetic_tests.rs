use misnomer::memory::value::Value;
use misnomer::{run_file, Config, Error, Terminal};

fn run_demo(path: &str) -> (Value, Vec<String>) {
    let outcome =
        run_file(path, &Config::default(), Terminal::new()).expect("Execution failed");
    let output = outcome.terminal.get_output();
    println!("Interpreter output:\n{}", output.join("\n"));
    (outcome.value, output)
}

#[test]
fn test_arithmetic_and_coercion() {
    let (value, output) = run_demo("demos/arithmetic.mn");
    let joined_output = output.join("\n");

    // main returns nothing
    assert_eq!(value, Value::Int(0));

    assert!(joined_output.contains("Int + Int: 29"));
    assert!(joined_output.contains("Int / Int: 0.25"));
    assert!(joined_output.contains("Int * Float: 1.5"));
    assert!(joined_output.contains("Subtraction chain: 3"));
    assert!(joined_output.contains("Average: 3.5"));
    assert!(joined_output.contains("Widened: 2.0"));
    assert!(joined_output.contains("Sign: negative zero positive"));
    assert!(joined_output.contains("Max: 9.5 Min: apple"));
    assert!(joined_output.contains("Conversions: -155 0.25 2.0"));
}

#[test]
fn test_fibonacci_demo() {
    let (value, output) = run_demo("demos/fibonacci.mn");

    assert_eq!(value, Value::Int(233));
    assert_eq!(output.len(), 10);
    assert_eq!(output[0], "fibonacci( 0 ) = 0");
    assert_eq!(output[9], "fibonacci( 9 ) = 34");
}

#[test]
fn test_loops_demo() {
    let (value, output) = run_demo("demos/loops.mn");

    assert_eq!(value, Value::Int(25));
    assert_eq!(output, vec!["sum of odd numbers up to 10: 25"]);
}

#[test]
fn test_missing_file() {
    let err = run_file("demos/does_not_exist.mn", &Config::default(), Terminal::new())
        .unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert_eq!(err.position(), None);
}
