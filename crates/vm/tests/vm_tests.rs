//! Integration tests for the bytetape VM.
//!
//! Organized by instruction, then by failure mode and session behavior.

use bytetape_common::{Program, Tape};
use bytetape_vm::{run, run_with, EofPolicy, RunConfig, RuntimeError, MAX_START_POINTER, VM};
use proptest::prelude::*;

// ============================================================
// Helper functions
// ============================================================

/// Parse and run `source` on a fresh tape with no input.
fn run_program(source: &str) -> Result<String, RuntimeError> {
    let program = Program::parse(source).unwrap();
    let mut tape = Tape::new();
    run(&program, &mut tape, std::io::empty())
}

/// Parse and run `source` on a fresh tape with the given input and policy.
fn run_with_input(source: &str, input: &[u8], eof: EofPolicy) -> Result<String, RuntimeError> {
    let program = Program::parse(source).unwrap();
    let mut tape = Tape::new();
    let config = RunConfig {
        eof,
        ..RunConfig::default()
    };
    run_with(&program, &mut tape, input, config)
}

/// Run `source` and return the failure together with the partial output.
fn run_failing(source: &str) -> (RuntimeError, String) {
    let program = Program::parse(source).unwrap();
    let mut tape = Tape::new();
    let mut vm = VM::new(&program, &mut tape);
    let err = vm.execute().unwrap_err();
    (err, vm.into_output())
}

// ============================================================
// Arithmetic and output
// ============================================================

#[test]
fn three_increments_then_output() {
    assert_eq!(run_program("+++."), Ok("\u{3}".to_string()));
}

#[test]
fn empty_program_produces_nothing() {
    assert_eq!(run_program(""), Ok(String::new()));
}

#[test]
fn comments_only_produce_nothing() {
    assert_eq!(run_program("this is a comment"), Ok(String::new()));
}

#[test]
fn hello_world() {
    let source = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    assert_eq!(run_program(source), Ok("Hello World!\n".to_string()));
}

#[test]
fn output_above_ascii_is_latin1() {
    let source = "++++++++++++++++[>++++++++++++++<-]>.";
    // 16 * 14 = 224
    assert_eq!(run_program(source), Ok("\u{e0}".to_string()));
}

#[test]
fn cell_reaches_255() {
    let program = Program::parse("+++++++++++++++[>+++++++++++++++++<-]").unwrap();
    let mut tape = Tape::new();
    run(&program, &mut tape, std::io::empty()).unwrap();
    assert_eq!(tape.get(1), 255);
}

// ============================================================
// Loops
// ============================================================

#[test]
fn single_pass_clear_loop() {
    let program = Program::parse("+[-]").unwrap();
    let mut tape = Tape::new();
    let mut vm = VM::new(&program, &mut tape);
    assert_eq!(vm.execute(), Ok(String::new()));
    assert_eq!(vm.pointer(), 0);
    drop(vm);
    assert_eq!(tape.get(0), 0);
}

#[test]
fn brackets_only_halt_with_pointer_unchanged() {
    for source in ["[]", "[][]", "[[]]", "[[][[]]]"] {
        let program = Program::parse(source).unwrap();
        let mut tape = Tape::new();
        let mut vm = VM::new(&program, &mut tape);
        assert_eq!(vm.execute(), Ok(String::new()), "{source}");
        assert_eq!(vm.pointer(), 0, "{source}");
    }
}

#[test]
fn nested_loop_multiplies() {
    // cell2 = 4 * 5
    let program = Program::parse("++++[>+++++[>+<-]<-]").unwrap();
    let mut tape = Tape::new();
    run(&program, &mut tape, std::io::empty()).unwrap();
    assert_eq!(tape.cells(), &[0, 0, 20]);
}

#[test]
fn skipped_loop_body_is_never_executed() {
    // The body would underflow if it ran.
    assert_eq!(run_program("[-]+."), Ok("\u{1}".to_string()));
}

// ============================================================
// Input
// ============================================================

#[test]
fn cat_copies_input_until_eof_zero() {
    let result = run_with_input(",[.,]", b"AB", EofPolicy::Zero);
    assert_eq!(result, Ok("AB".to_string()));
}

#[test]
fn cat_halts_at_eof_with_default_config() {
    let program = Program::parse(",[.,]").unwrap();
    let mut tape = Tape::new();
    let result = run_with(&program, &mut tape, &b"A"[..], RunConfig::default());
    assert_eq!(result, Ok("A".to_string()));
}

#[test]
fn eof_unchanged_leaves_cell() {
    let result = run_with_input("+++++,.", b"", EofPolicy::Unchanged);
    assert_eq!(result, Ok("\u{5}".to_string()));
}

#[test]
fn eof_zero_clears_cell() {
    let result = run_with_input("+++++,.", b"", EofPolicy::Zero);
    assert_eq!(result, Ok("\u{0}".to_string()));
}

#[test]
fn eof_error_stops_run() {
    let err = run_with_input(",.,", b"A", EofPolicy::Error).unwrap_err();
    match err {
        RuntimeError::EndOfInput { at, excerpt } => {
            assert_eq!(at, 2);
            assert_eq!(excerpt.to_string(), ",., ** ");
        }
        other => panic!("expected EndOfInput, got {other:?}"),
    }
}

#[test]
fn input_overwrites_cell() {
    let result = run_with_input("+++,.", b"z", EofPolicy::Unchanged);
    assert_eq!(result, Ok("z".to_string()));
}

#[test]
fn input_failure_is_reported() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    let program = Program::parse("+,").unwrap();
    let mut tape = Tape::new();
    let err = run(&program, &mut tape, Broken).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Input { at: 1, kind: std::io::ErrorKind::BrokenPipe, .. }
    ));
}

// ============================================================
// Failures
// ============================================================

#[test]
fn decrement_on_zero_underflows() {
    let (err, output) = run_failing("-");
    assert!(matches!(err, RuntimeError::CellUnderflow { at: 0, .. }));
    assert_eq!(output, "");
}

#[test]
fn increment_past_255_overflows() {
    let source = format!("{}+", "+".repeat(255));
    let (err, _) = run_failing(&source);
    assert_eq!(err.at(), 255);
    assert!(matches!(err, RuntimeError::CellOverflow { .. }));
    assert_eq!(err.excerpt().remaining, "");
}

#[test]
fn left_of_origin_is_negative_pointer() {
    let (err, _) = run_failing("<");
    match err {
        RuntimeError::NegativePointer { at, excerpt } => {
            assert_eq!(at, 0);
            assert_eq!(excerpt.consumed, "<");
            assert_eq!(excerpt.remaining, "");
        }
        other => panic!("expected NegativePointer, got {other:?}"),
    }
}

#[test]
fn negative_pointer_reported_at_move() {
    let (err, _) = run_failing("><<+++");
    assert_eq!(err.at(), 2);
    assert_eq!(err.excerpt().to_string(), "><< ** +++");
}

#[test]
fn partial_output_survives_failure() {
    let (err, output) = run_failing("+.+.<");
    assert!(matches!(err, RuntimeError::NegativePointer { at: 4, .. }));
    assert_eq!(output, "\u{1}\u{2}");
}

#[test]
fn error_message_shows_split_program() {
    let (err, _) = run_failing("+>-<");
    assert_eq!(err.to_string(), "cell underflow at instruction 2: +>- ** <");
}

#[test]
fn tape_is_not_rolled_back_after_failure() {
    let program = Program::parse("+++>++<<").unwrap();
    let mut tape = Tape::new();
    assert!(run(&program, &mut tape, std::io::empty()).is_err());
    assert_eq!(tape.cells(), &[3, 2]);
}

// ============================================================
// Sessions: tape reuse and resume pointer
// ============================================================

#[test]
fn tape_persists_across_runs() {
    let mut tape = Tape::new();
    let first = Program::parse("+++>++").unwrap();
    let second = Program::parse(".>.").unwrap();
    run(&first, &mut tape, std::io::empty()).unwrap();
    assert_eq!(
        run(&second, &mut tape, std::io::empty()),
        Ok("\u{3}\u{2}".to_string())
    );
}

#[test]
fn start_pointer_resumes_position() {
    let mut tape = Tape::from(vec![0, 0, 65]);
    let program = Program::parse(".").unwrap();
    let config = RunConfig {
        start_pointer: 2,
        ..RunConfig::default()
    };
    assert_eq!(
        run_with(&program, &mut tape, std::io::empty(), config),
        Ok("A".to_string())
    );
}

#[test]
fn start_pointer_allows_moving_left() {
    let mut tape = Tape::new();
    let program = Program::parse("<+").unwrap();
    let config = RunConfig {
        start_pointer: 1,
        ..RunConfig::default()
    };
    run_with(&program, &mut tape, std::io::empty(), config).unwrap();
    assert_eq!(tape.get(0), 1);
}

#[test]
fn oversized_start_pointer_is_rejected() {
    let program = Program::parse(".").unwrap();
    let mut tape = Tape::new();
    for start_pointer in [MAX_START_POINTER + 1, usize::MAX] {
        let config = RunConfig {
            start_pointer,
            ..RunConfig::default()
        };
        let err = run_with(&program, &mut tape, std::io::empty(), config).unwrap_err();
        assert!(matches!(err, RuntimeError::StartOutOfRange { at: 0, .. }));
        assert_eq!(err.excerpt().to_string(), " ** .");
    }
    assert!(tape.is_empty());
}

// ============================================================
// Properties
// ============================================================

/// Programs built only from nested brackets.
fn arb_brackets() -> impl Strategy<Value = String> {
    Just(String::new()).prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|parts| format!("[{}]", parts.concat()))
    })
}

proptest! {
    /// Pure bracket programs never touch the pointer or emit output.
    #[test]
    fn bracket_programs_are_inert(parts in prop::collection::vec(arb_brackets(), 0..6)) {
        let program = Program::parse(&parts.concat()).unwrap();
        let mut tape = Tape::new();
        let mut vm = VM::new(&program, &mut tape);
        prop_assert_eq!(vm.execute(), Ok(String::new()));
        prop_assert_eq!(vm.pointer(), 0);
    }

    /// `n` increments then `.` emits code point `n`.
    #[test]
    fn increments_then_output(n in 0usize..=255) {
        let source = format!("{}.", "+".repeat(n));
        let expected = char::from(u8::try_from(n).unwrap()).to_string();
        prop_assert_eq!(run_program(&source), Ok(expected));
    }

    /// Straight-line programs either halt or fail inside the program.
    #[test]
    fn straight_line_programs(source in "[+\\-<>.]{0,64}") {
        let program = Program::parse(&source).unwrap();
        let mut tape = Tape::new();
        match run(&program, &mut tape, std::io::empty()) {
            Ok(_) => {}
            Err(e) => prop_assert!(e.at() < program.len()),
        }
    }
}
