use std::{cell::RefCell, fs, io::Cursor, time::Duration};

use pretty_assertions::assert_eq;
use relief::{
    Outcome,
    config::{BlockMatching, Config},
    error::ParseError,
    interpreter::{evaluator::core::Interpreter, value::environment::Environment},
    run_program,
};
use walkdir::WalkDir;

thread_local! {
    static SLEPT: RefCell<Vec<Duration>> = const { RefCell::new(Vec::new()) };
}

fn record_sleep(duration: Duration) {
    SLEPT.with_borrow_mut(|slept| slept.push(duration));
}

struct Run {
    outcome:     Result<Outcome, ParseError>,
    output:      String,
    diagnostics: String,
    slept:       Vec<Duration>,
    environment: Environment,
}

fn run_with(source: &str, input: &str, config: Config) -> Run {
    let mut output = Vec::new();
    let mut input = Cursor::new(input.as_bytes());
    let mut diagnostics = Vec::new();
    SLEPT.with_borrow_mut(Vec::clear);

    let (outcome, environment) = {
        let mut interpreter =
            Interpreter::new(config, &mut output, &mut input, &mut diagnostics).with_sleeper(record_sleep);
        let outcome = run_program(source, &mut interpreter);
        (outcome, interpreter.environment)
    };

    Run { outcome,
          output: String::from_utf8(output).expect("output is UTF-8"),
          diagnostics: String::from_utf8(diagnostics).expect("diagnostics are UTF-8"),
          slept: SLEPT.with_borrow(Clone::clone),
          environment }
}

fn execute(source: &str) -> Run {
    run_with(source, "", Config::default())
}

fn run_nested(source: &str) -> Run {
    run_with(source, "", Config::default().with_block_matching(BlockMatching::Nested))
}

/// Wraps `body` in an entry-point block. The first body line is line 2.
fn program(body: &str) -> String {
    format!("when project start {{\n{body}\n}}\n")
}

fn assert_output(body: &str, expected: &str) {
    let run = execute(&program(body));
    assert_eq!(run.diagnostics, "", "unexpected diagnostics for:\n{body}");
    assert_eq!(run.output, expected, "output of:\n{body}");
}

#[test]
fn script_fixtures_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "relief"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read {expected_path:?}: {e}")
                                                          });

        let matching = if path.components().any(|c| c.as_os_str() == "nested") {
            BlockMatching::Nested
        } else {
            BlockMatching::Shallow
        };

        let run = run_with(&source, "", Config::default().with_block_matching(matching));
        assert!(run.outcome.is_ok(), "{path:?} failed: {:?}", run.outcome);
        assert_eq!(run.diagnostics, "", "diagnostics of {path:?}");
        assert_eq!(run.output, expected, "output of {path:?}");

        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn assignment_then_output() {
    let run = execute("when project start { x = 2 + 3 \n out(x) }");
    assert_eq!(run.outcome, Ok(Outcome::Completed));
    assert_eq!(run.output, "5\n");
}

#[test]
fn defined_block_runs_on_every_call() {
    let run = execute("when project start { defy(greet) { out(\"hi\") } \n greet() \n greet() }");
    assert_eq!(run.output, "hi\nhi\n");
    assert_eq!(run.diagnostics, "");
}

#[test]
fn inline_repeat_block() {
    let run = execute("when project start { rep 3 { out(\"go\") } }");
    assert_eq!(run.output, "go\ngo\ngo\n");
}

#[test]
fn missing_entry_point_runs_nothing() {
    let run = execute("out(\"hello\")\nwhen project begins { out(1) }");
    assert_eq!(run.outcome, Err(ParseError::EntryPointNotFound));
    assert_eq!(run.output, "");
    assert!(run.environment.is_empty());

    let run = execute("when project start out(1)");
    assert_eq!(run.outcome, Err(ParseError::EntryPointNotFound));
}

#[test]
fn text_outside_the_entry_point_is_ignored() {
    let run = execute("out(\"before\")\nwhen project start {\nout(\"inside\")\n}\nout(\"after\")");
    assert_eq!(run.output, "inside\n");
}

#[test]
fn division_by_zero_is_reported_and_execution_continues() {
    let run = execute(&program("out(1/0)\nout(\"after\")"));
    assert_eq!(run.outcome, Ok(Outcome::Completed));
    assert_eq!(run.output, "after\n");
    assert_eq!(run.diagnostics, "Error on line 2: Division by zero.\n");
}

#[test]
fn arithmetic_follows_integer_and_real_rules() {
    assert_output("out(7 / 2)\nout(4 / 2)\nout(7 // 2)\nout(-7 // 2)\nout(7.5 // 2)",
                  "3.5\n2.0\n3\n-4\n3.0\n");
    assert_output("out(-7 % 3)\nout(7 % -3)\nout(5.5 % 2)", "2\n-2\n1.5\n");
    assert_output("out(2 ** 3 ** 2)\nout(-2 ** 2)\nout(2 ** -1)", "512\n-4\n0.5\n");
    assert_output("out(1 + 2 * 3)\nout((1 + 2) * 3)\nout(1 + 2.5)", "7\n9\n3.5\n");
    assert_output("out(0.1 + 0.2)\nout(10 / 4)", "0.30000000000000004\n2.5\n");
}

#[test]
fn integer_overflow_becomes_real() {
    assert_output("out(9223372036854775807 + 1)", "9.223372036854776e+18\n");
}

#[test]
fn strings_concatenate_but_do_not_mix_with_numbers() {
    let run = execute(&program("greeting = \"hello, \" + 'world'\nout(greeting)\nout(\"n\" + 1)"));
    assert_eq!(run.output, "hello, world\n");
    assert!(run.diagnostics.starts_with("Error on line 4: Type error:"),
            "{}",
            run.diagnostics);
}

#[test]
fn comparisons_and_logic() {
    assert_output("out(1 < 2 < 3)\nout(3 > 2 > 2)\nout(2 == 2.0)\nout(1 == \"1\")",
                  "True\nFalse\nTrue\nFalse\n");
    assert_output("out(\"apple\" < \"banana\")\nout(1 != 2)", "True\nTrue\n");
    assert_output("out(0 or \"fallback\")\nout(1 and 2)\nout(not 0)\nout(not \"x\")",
                  "fallback\n2\nTrue\nFalse\n");
    assert_output("out(True)\nout(false)", "True\nFalse\n");
}

#[test]
fn logic_short_circuits() {
    assert_output("out(false and missing)\nout(true or 1 / 0)", "False\nTrue\n");
}

#[test]
fn ordering_mixed_kinds_is_an_error() {
    let run = execute(&program("out(1 < \"2\")"));
    assert_eq!(run.output, "");
    assert!(run.diagnostics.contains("Type error"), "{}", run.diagnostics);
}

#[test]
fn undefined_variable_is_reported() {
    let run = execute(&program("out(missing)\nout(\"still running\")"));
    assert_eq!(run.output, "still running\n");
    assert_eq!(run.diagnostics, "Error on line 2: Undefined variable 'missing'.\n");
}

#[test]
fn invalid_variable_name_is_reported() {
    let run = execute(&program("2x = 5\nmy-var = 1\nout(\"done\")"));
    assert_eq!(run.output, "done\n");
    assert_eq!(run.diagnostics,
               "Error on line 2: Invalid variable name '2x'.\nError on line 3: Invalid variable name 'my-var'.\n");
}

#[test]
fn failed_assignment_leaves_the_environment_unchanged() {
    let run = execute(&program("x = 1\nx = 1 / 0\nx = y + 1\nout(x)"));
    assert_eq!(run.output, "1\n");
    assert_eq!(run.diagnostics.lines().count(), 2);
}

#[test]
fn comparison_in_output_is_not_an_assignment() {
    assert_output("a = 3\nb = 3\nout(a == b)\nflag = a != b\nout(flag)", "True\nFalse\n");
    assert_output("out(\"a=b\")", "a=b\n");
}

#[test]
fn repeat_zero_times_changes_nothing() {
    assert_output("x = 1\nrep 0 {\nx = 2\nout(\"never\")\n}\nout(x)", "1\n");

    let run = execute(&program("x = 1\nrep 0 {\ny = 2\n}"));
    assert_eq!(run.environment.len(), 1);
    assert!(!run.environment.contains("y"));
}

#[test]
fn repeat_mutations_persist_after_the_loop() {
    assert_output("total = 0\nrep 4 {\ntotal = total + 2\n}\nout(total)", "8\n");
}

#[test]
fn repeat_count_may_be_an_expression() {
    assert_output("n = 2\nrep n + 1 {\nout(\"x\")\n}", "x\nx\nx\n");
}

#[test]
fn malformed_repeat_skips_its_block() {
    let run = execute(&program("rep many times {\nout(\"x\")\n}\nout(\"after\")"));
    assert_eq!(run.output, "after\n");
    assert_eq!(run.diagnostics,
               "Error on line 2: Invalid 'rep' syntax: the count is not a valid expression.\n");

    let run = execute(&program("rep 3\nout(\"once\")"));
    assert_eq!(run.output, "once\n");
    assert!(run.diagnostics.contains("Invalid 'rep' syntax"));
}

#[test]
fn negative_or_fractional_repeat_count_is_reported() {
    let run = execute(&program("rep -1 {\nout(\"x\")\n}\nrep 1.5 {\nout(\"y\")\n}"));
    assert_eq!(run.output, "");
    assert_eq!(run.diagnostics.lines().count(), 2);
}

#[test]
fn only_the_first_true_branch_runs() {
    let body = "if (false) {\nout(\"A\")\n} else if (true) {\nout(\"B\")\n} else {\nout(\"C\")\n}\nout(\"done\")";
    assert_output(body, "B\ndone\n");
}

#[test]
fn else_branch_runs_when_nothing_matches() {
    let body = "x = 3\nif (x > 5) {\nout(\"big\")\n}\nelse if (x > 4) {\nout(\"medium\")\n}\nelse {\nout(\"small\")\n}";
    assert_output(body, "small\n");
}

#[test]
fn conditional_truthiness() {
    assert_output("if (\"\") { out(\"yes\") } else { out(\"no\") }", "no\n");
    assert_output("if (0.0) { out(\"yes\") } else { out(\"no\") }", "no\n");
    assert_output("if (\"text\") { out(\"yes\") } else { out(\"no\") }", "yes\n");
    assert_output("if (-1) { out(\"yes\") }", "yes\n");
}

#[test]
fn failing_condition_runs_no_branch() {
    let run = execute(&program("if (missing > 1) {\nout(\"A\")\n} else {\nout(\"B\")\n}\nout(\"after\")"));
    assert_eq!(run.output, "after\n");
    assert_eq!(run.diagnostics, "Error on line 2: Undefined variable 'missing'.\n");
}

#[test]
fn malformed_conditional_is_a_syntax_error() {
    let run = execute(&program("if x > 1 {\nout(\"A\")\n}\nout(\"after\")"));
    assert_eq!(run.output, "after\n");
    assert_eq!(run.diagnostics,
               "Error on line 2: Invalid 'if' syntax: the condition must be in parentheses.\n");
}

#[test]
fn malformed_else_clause_ends_the_chain() {
    let run = execute(&program("if (false) {\nout(\"A\")\n}\nelse maybe {\nout(\"B\")\n}\nout(\"after\")"));
    assert_eq!(run.output, "after\n");
    assert_eq!(run.diagnostics,
               "Error on line 5: Invalid 'else' syntax: expected '{' or 'if' after 'else'.\n");
}

#[test]
fn blank_lines_do_not_break_an_if_chain() {
    assert_output("if (false) { out(1) }\n\nelse { out(2) }\nout(3)", "2\n3\n");
    assert_output("if (false) {\nout(1)\n}\n\n\nelse if (true) {\nout(2)\n}\n\nelse {\nout(3)\n}", "2\n");
}

#[test]
fn orphan_else_is_reported_and_skipped() {
    let run = execute(&program("else {\nout(\"x\")\n}\nout(\"y\")"));
    assert_eq!(run.output, "y\n");
    assert_eq!(run.diagnostics,
               "Error on line 2: Invalid 'else' syntax: 'else' without a preceding 'if'.\n");
}

#[test]
fn defined_blocks_share_the_environment() {
    assert_output("count = 0\ndefy(bump) {\ncount = count + 1\n}\nbump()\nbump()\nout(count)",
                  "2\n");
}

#[test]
fn definition_does_not_run_the_block() {
    assert_output("defy(noisy) {\nout(\"called\")\n}\nout(\"defined\")", "defined\n");
}

#[test]
fn callable_blocks_display_their_name() {
    assert_output("defy(f) {\n}\nout(f)", "<defy f>\n");
}

#[test]
fn calling_an_unknown_name_is_reported() {
    let run = execute(&program("nope()\nx = 1\nx()"));
    assert_eq!(run.diagnostics,
               "Error on line 2: Undefined function 'nope'.\nError on line 4: Undefined function 'x'.\n");
}

#[test]
fn callables_and_data_share_one_namespace() {
    let run = execute(&program("x = 1\ndefy(x) {\nout(\"called\")\n}\nx()\nx = 2\nx()\nout(x)"));
    assert_eq!(run.output, "called\n2\n");
    assert_eq!(run.diagnostics, "Error on line 8: Undefined function 'x'.\n");
    assert_eq!(run.environment.len(), 1);
}

#[test]
fn invalid_definition_name_skips_the_block() {
    let run = execute(&program("defy(2bad) {\nout(\"x\")\n}\nout(\"after\")"));
    assert_eq!(run.output, "after\n");
    assert!(run.diagnostics.contains("Invalid 'defy' syntax"), "{}", run.diagnostics);
}

#[test]
fn errors_inside_a_called_block_name_the_body_line() {
    let run = execute(&program("defy(broken) {\nout(1 / 0)\n}\nbroken()"));
    assert_eq!(run.diagnostics, "Error on line 3: Division by zero.\n");
}

#[test]
fn unbounded_recursion_is_reported() {
    let run = execute(&program("defy(forever) {\nforever()\n}\nforever()\nout(\"survived\")"));
    assert_eq!(run.output, "survived\n");
    assert_eq!(run.diagnostics.lines().count(), 1);
    assert!(run.diagnostics.contains("maximum call depth"), "{}", run.diagnostics);
}

#[test]
fn stop_ends_the_run_without_error() {
    let run = execute(&program("out(\"before\")\nstop()\nout(\"after\")"));
    assert_eq!(run.outcome, Ok(Outcome::Stopped { line: 3 }));
    assert_eq!(run.output, "before\n");
    assert_eq!(run.diagnostics, "");
}

#[test]
fn stop_unwinds_loops_and_calls() {
    let body = "defy(halt) {\nout(\"halting\")\nstop()\n}\nrep 3 {\nhalt()\n}\nout(\"never\")";
    let run = execute(&program(body));
    assert_eq!(run.outcome, Ok(Outcome::Stopped { line: 4 }));
    assert_eq!(run.output, "halting\n");
}

#[test]
fn wait_uses_the_sleeper() {
    let run = execute(&program("wait.sec(2)\nwait.milsec(5)\nwait.min(1)\nwait.hrs(1)"));
    assert_eq!(run.slept,
               vec![Duration::from_secs(2),
                    Duration::from_millis(5),
                    Duration::from_secs(60),
                    Duration::from_secs(3600)]);
}

#[test]
fn unknown_wait_unit_does_not_sleep() {
    let run = execute(&program("wait.days(1)\nout(\"awake\")"));
    assert_eq!(run.slept, Vec::<Duration>::new());
    assert_eq!(run.output, "awake\n");
    assert_eq!(run.diagnostics,
               "Error on line 2: Unknown wait unit 'days'. Expected milsec, sec, min or hrs.\n");
}

#[test]
fn malformed_wait_is_a_syntax_error() {
    let run = execute(&program("wait.sec(x)\nwait.sec"));
    assert_eq!(run.slept, Vec::<Duration>::new());
    assert_eq!(run.diagnostics.lines().count(), 2);
    assert!(run.diagnostics.contains("Invalid 'wait' syntax"));
}

#[test]
fn input_statement_binds_last_input() {
    let run = run_with(&program("in(\"Name?\")\nout(\"Hi \" + _last_input)"),
                       "Ada\n",
                       Config::default());
    assert_eq!(run.output, "Name? Hi Ada\n");
}

#[test]
fn input_expression_returns_the_line() {
    let run = run_with(&program("age = in(\"Age?\")\nout(age + \" years\")"),
                       "42\r\n",
                       Config::default());
    assert_eq!(run.output, "Age? 42 years\n");
}

#[test]
fn closed_input_is_reported() {
    let run = execute(&program("in(\"Anyone?\")\nout(\"continued\")"));
    assert_eq!(run.output, "Anyone? continued\n");
    assert_eq!(run.diagnostics, "Error on line 2: Standard input is closed.\n");
}

#[test]
fn trailing_text_after_output_is_a_syntax_error() {
    let run = execute(&program("out(1) junk\nout(\"after\")"));
    assert_eq!(run.output, "after\n");
    assert_eq!(run.diagnostics,
               "Error on line 2: Invalid 'out' syntax: expected ')' at the end of the line.\n");

    let run = execute(&program("out(2"));
    assert_eq!(run.output, "");
    assert!(run.diagnostics.contains("Invalid 'out' syntax"), "{}", run.diagnostics);
}

#[test]
fn unrecognized_lines_are_ignored() {
    assert_output("this is not a statement\n# nor is this\nout(\"ok\")", "ok\n");
}

#[test]
fn shallow_matching_closes_at_the_first_brace() {
    let body = "rep 2 {\nif (true) {\nout(\"inner\")\n}\nout(\"outer\")\n}";
    assert_eq!(execute(&program(body)).output, "inner\ninner\nouter\n");
}

#[test]
fn nested_matching_counts_braces() {
    let body = "rep 2 {\nif (true) {\nout(\"inner\")\n}\nout(\"outer\")\n}";
    assert_eq!(run_nested(&program(body)).output, "inner\nouter\ninner\nouter\n");
}

#[test]
fn nested_matching_ignores_braces_in_strings() {
    let run = run_nested(&program("rep 1 {\nout(\"}\")\n}"));
    assert_eq!(run.output, "}\n");
    assert_eq!(run.diagnostics, "");
}

#[test]
fn evaluating_a_pure_expression_twice_gives_the_same_value() {
    let mut output = Vec::new();
    let mut input = Cursor::new(&b""[..]);
    let mut diagnostics = Vec::new();
    let mut interpreter =
        Interpreter::new(Config::default(), &mut output, &mut input, &mut diagnostics);
    interpreter.environment.bind("x", 4.into());

    let first = interpreter.evaluate("x * 2 + 0.5 > 8 or x // 3", 1).unwrap();
    let second = interpreter.evaluate("x * 2 + 0.5 > 8 or x // 3", 1).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), "True");
}
