use color_eyre::eyre::{Context, Result};
use proptest::prelude::*;
use std::{
    fs::{read, read_dir, read_to_string},
    path::Path,
};

use lisplite::parser::{
    formatter::{
        BasicParserFormatter, ParserFormatter, ProgramFormatter, SExpressionFormatter,
        TreeFormatter,
    },
    parse, NodeKind, Operator, ParserErrorKind, MAX_NESTING_DEPTH, OPERATOR_HASHMAP,
};
use lisplite::source::SourceFile;

fn check(source: &SourceFile, expected: &str, test_name: &str) {
    let output = match parse(source.text()) {
        Ok(program) => TreeFormatter::new(false).format(&program),
        Err(error) => {
            let formatter = BasicParserFormatter::new(source.display_text());
            format!("{}\n", formatter.format_error(&error))
        }
    };
    assert_eq!(output, expected, "Failed the test {test_name}");
}

#[test]
fn test_all() -> Result<()> {
    let input_dir = Path::new("./test_data/parser/in");
    let output_dir = Path::new("./test_data/parser/out");

    let mut succeeded = true;
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let entry = entry?;
        let path = entry.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "lisp" {
            continue;
        }

        let test_name = AsRef::<Path>::as_ref(
            path.file_name()
                .expect("File name can't be none as the path is to a real file."),
        );

        let bytes = read(&path).context("Failed to open input test data file")?;
        let source = SourceFile::from_bytes(&path, bytes);

        let expected = {
            let output_file_name = test_name.with_extension("txt");
            let output_path = output_dir.join(output_file_name);
            read_to_string(output_path).context("Failed to open output test data file")?
        };

        let res = std::panic::catch_unwind(|| {
            check(&source, &expected, &test_name.to_string_lossy());
        });
        if res.is_err() {
            println!("\tFails test case {}", test_name.display());
            succeeded = false;
        }
    }

    assert!(succeeded);

    Ok(())
}

#[test]
fn top_level_forms_are_wrapped_in_sequence() {
    let program = parse("(print 1) (print 2)").expect("Valid program.");
    let root = program.get_root();
    assert!(matches!(
        root.kind,
        NodeKind::Operator {
            operator: Operator::Sequence,
            ..
        }
    ));
    assert_eq!(program.forms().len(), 2);
    assert_eq!(program.forms()[1].span.range(), 10..19);
}

#[test]
fn empty_program_is_empty_sequence() {
    let program = parse("   ").expect("Whitespace is a valid program.");
    assert!(program.forms().is_empty());
    assert_eq!(SExpressionFormatter.format(&program), "");
}

#[test]
fn arity_is_not_checked_while_parsing() {
    assert!(parse("(if 1)").is_ok());
    assert!(parse("(not 1 2 3)").is_ok());
}

#[test]
fn unknown_operator_points_at_head() {
    let error = parse("(print (foo 1 2))").expect_err("`foo` is not an operator.");
    assert_eq!(error.kind, ParserErrorKind::UnknownOperator("foo".into()));
    assert_eq!(error.span.range(), 8..11);
    assert_eq!(error.code(), "PA002");
}

#[test]
fn lexical_errors_surface_through_parser() {
    let error = parse("(print \"abc").expect_err("Unterminated string.");
    assert!(matches!(error.kind, ParserErrorKind::LexicalError(_)));
    assert_eq!(error.code(), "LX001");
}

fn nested_nots(depth: usize) -> String {
    format!("{}1{}", "(not ".repeat(depth), ")".repeat(depth))
}

#[test]
fn nesting_up_to_the_limit_is_accepted() {
    let program = parse(&nested_nots(MAX_NESTING_DEPTH)).expect("Nesting is within the limit.");
    assert_eq!(program.forms().len(), 1);
}

#[test]
fn nesting_past_the_limit_is_an_error() {
    let error = parse(&nested_nots(MAX_NESTING_DEPTH + 1)).expect_err("Nesting exceeds the limit.");
    assert_eq!(
        error.kind,
        ParserErrorKind::NestingTooDeep(MAX_NESTING_DEPTH)
    );
    assert_eq!(error.code(), "PA005");
    let offset = "(not ".len() * MAX_NESTING_DEPTH;
    assert_eq!(error.span.range(), offset..offset + 1);
}

#[test]
fn very_deep_nesting_does_not_overflow_the_stack() {
    let error = parse(&nested_nots(20_000)).expect_err("Nesting exceeds the limit.");
    assert!(matches!(error.kind, ParserErrorKind::NestingTooDeep(_)));
}

#[test]
fn every_operator_symbol_is_recognised() {
    for (symbol, operator) in OPERATOR_HASHMAP.iter() {
        assert_eq!(Operator::from_symbol(symbol), Some(*operator));
        assert_eq!(operator.symbol(), *symbol);
    }
    assert_eq!(OPERATOR_HASHMAP.len(), 17);
}

#[test]
fn sexpr_is_canonical() {
    let program = parse("(  print\n(+ 1   x \"a b\")  )").expect("Valid program.");
    assert_eq!(
        SExpressionFormatter.format(&program),
        "(print (+ 1 x \"a b\"))\n"
    );
}

// Property-based tests

fn operator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(OPERATOR_HASHMAP.keys().copied().collect::<Vec<_>>())
}

fn form(operator: &str, arguments: &[String]) -> String {
    let mut text = format!("({operator}");
    for argument in arguments {
        text.push(' ');
        text.push_str(argument);
    }
    text.push(')');
    text
}

fn argument_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i64..1_000_000).prop_map(|v| v.to_string()),
        "[a-z][a-z0-9_]{0,6}",
        "[a-zA-Z0-9 ]{0,8}".prop_map(|s: String| format!("\"{s}\"")),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (operator_strategy(), prop::collection::vec(inner, 0..4))
            .prop_map(|(operator, arguments)| form(operator, &arguments))
    })
}

fn program_strategy() -> impl Strategy<Value = String> {
    let top_level = (
        operator_strategy(),
        prop::collection::vec(argument_strategy(), 0..4),
    )
        .prop_map(|(operator, arguments)| form(operator, &arguments));
    prop::collection::vec(top_level, 0..5).prop_map(|forms| forms.join("\n"))
}

proptest! {
    #[test]
    fn parsing_is_deterministic(input in program_strategy()) {
        let first = parse(&input);
        let second = parse(&input);
        prop_assert!(first.is_ok());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sexpr_output_reparses_to_same_shape(input in program_strategy()) {
        let program = parse(&input).expect("Generated programs are well formed.");
        let canonical = SExpressionFormatter.format(&program);
        let reparsed = parse(&canonical).expect("Canonical output is well formed.");
        prop_assert_eq!(SExpressionFormatter.format(&reparsed), canonical);
    }
}
