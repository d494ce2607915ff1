use tsukuyomi::{
    error::StaticError,
    interpreter::Interpreter,
    parser::Parser,
    printer::AstPrinter,
    run,
    scanner::scan_tokens,
    Emit, RunError, Value,
};

fn value(source: &str) -> String {
    run(source, Emit::Value).unwrap_or_else(|e| panic!("{source:?} failed: {e:?}"))
}

fn static_messages(source: &str) -> Vec<String> {
    match run(source, Emit::Value) {
        Err(RunError::Static(errors)) => errors.iter().map(|e| e.to_string()).collect(),
        other => panic!("{source:?} should fail statically, got {other:?}"),
    }
}

#[test]
fn evaluates_the_documented_examples() {
    let cases = [
        ("1 + 2 * 3", "7"),
        ("8 - 4 - 2", "2"),
        ("true ? 1 : (1/0)", "1"),
        ("6 / 2", "3"),
        ("1 / 3", "0.3333333333333333"),
        ("\"con\" + \"cat\"", "concat"),
        ("!(1 == 1) ? \"no\" : \"yes\"", "yes"),
        ("nil == nil", "true"),
        ("1, 2, 3", "3"),
        ("-(-4.5)", "4.5"),
        ("1 / 0", "inf"),
    ];

    for (source, expected) in cases {
        assert_eq!(value(source), format!("{expected}\n"), "{source}");
    }
}

#[test]
fn ternaries_chain_to_the_right() {
    assert_eq!(value("false ? 1 : false ? 2 : 3"), "3\n");
    assert_eq!(
        run("true ? 1 : false ? 2 : 3", Emit::Ast).unwrap(),
        "( ?: true 1 ( ?: false 2 3))\n"
    );
}

#[test]
fn runtime_errors_render_message_then_line() {
    let Err(RunError::Runtime(err)) = run("1 +\n\"a\" - 1", Emit::Value) else {
        panic!("expected a runtime error");
    };

    // reported at the operator, which sits on line 2
    assert_eq!(err.to_string(), "Operands must be numbers.\n[line 2]");
}

#[test]
fn mismatched_plus_is_a_runtime_error() {
    let Err(RunError::Runtime(err)) = run("\"a\" + 1", Emit::Value) else {
        panic!("expected a runtime error");
    };
    assert_eq!(err.message, "Operands must be two numbers or 2 strings.");
}

#[test]
fn syntax_error_locations() {
    assert_eq!(
        static_messages("(1 + 2"),
        vec!["[line 1] Error at end: Expect ')' after expression."]
    );
    assert_eq!(
        static_messages("1 +\n* 2"),
        vec!["[line 2] Error at '*': Missing left-hand operand."]
    );
}

#[test]
fn scanner_recovers_after_bad_character() {
    let scanned = scan_tokens("@ 1");

    assert_eq!(scanned.errors.len(), 1);
    assert_eq!(scanned.errors[0].to_string(), "[line 1] Error: Unexpected character.");
    assert_eq!(scanned.tokens.len(), 2);
    assert_eq!(scanned.tokens[0].lexeme, "1");
}

#[test]
fn every_problem_in_a_file_is_reported() {
    let messages = static_messages("1 $ 2;\n(3;\n/* open");

    assert_eq!(
        messages,
        vec![
            "[line 1] Error: Unexpected character.",
            "[line 1] Error at '2': Expect ';' between expressions.",
            "[line 2] Error at ';': Expect ')' after expression.",
            "[line 3] Error: Unterminated block comment.",
        ]
    );
}

#[test]
fn deep_nesting_is_a_static_error() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));

    assert_eq!(
        static_messages(&source),
        vec!["[line 1] Error at '(': Expression nested too deeply."]
    );
}

#[test]
fn long_sums_still_evaluate() {
    let source = format!("0{}", " + 1".repeat(500));
    assert_eq!(value(&source), "500\n");
}

#[test]
fn static_error_kinds_are_kept() {
    let Err(RunError::Static(errors)) = run("\"open", Emit::Value) else {
        panic!("expected static errors");
    };
    assert!(matches!(errors.as_slice(), [StaticError::Lex(_)]));
}

#[test]
fn stages_compose_by_hand() {
    let scanned = scan_tokens("(1 + 2) * 3 >= 9");
    assert!(!scanned.had_error());

    let parsed = Parser::new(&scanned.tokens).parse();
    let expr = parsed.expr.expect("expression parses");

    assert_eq!(AstPrinter.print(&expr), "( >= ( * ( group ( + 1 2)) 3) 9)");
    assert_eq!(Interpreter::new().evaluate(&expr), Ok(Value::Bool(true)));
}
