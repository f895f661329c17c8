use color_eyre::eyre::{Context, Result};
use proptest::prelude::*;
use std::{
    fs::{read, read_dir, read_to_string},
    path::Path,
};

use lisplite::lexer::{
    formatter::{BasicFormatter, TokenFormatter},
    tokenize, Lexer, LexicalErrorKind, TokenKind,
};
use lisplite::source::SourceFile;

fn check(source: &SourceFile, expected: &str, test_name: &str) {
    let formatter = BasicFormatter::new(source.display_text());
    let mut buffer = String::new();
    for result in Lexer::new(source.text()) {
        match result {
            Ok(token) => buffer.push_str(&formatter.format(&token)),
            Err(error) => {
                buffer.push_str(&formatter.format_error(&error));
                buffer.push('\n');
                break;
            }
        }
        buffer.push('\n');
    }

    assert_eq!(buffer, expected, "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    let source = SourceFile::from_bytes("smoke.lisp", Vec::new());
    check(&source, "", "smoke");
}

#[test]
fn test_all() -> Result<()> {
    let input_dir = Path::new("./test_data/lexer/in");
    let output_dir = Path::new("./test_data/lexer/out");

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
fn string_token_text_excludes_quotes() {
    let tokens = tokenize("\"\" \"a b\"").expect("Both strings are terminated.");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "");
    assert_eq!(tokens[0].span.range(), 0..2);
    assert_eq!(tokens[1].text, "a b");
    assert_eq!(tokens[1].span.range(), 3..8);
}

#[test]
fn atom_stops_at_parenthesis() {
    let tokens = tokenize("(x)").expect("Valid input.");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LeftParenthesis,
            TokenKind::Identifier,
            TokenKind::RightParenthesis
        ]
    );
    assert_eq!(tokens[1].span.range(), 1..2);
}

#[test]
fn unterminated_string_spans_to_end_of_input() {
    let error = tokenize("(print \"abc").expect_err("The string is never closed.");
    assert_eq!(error.kind, LexicalErrorKind::UnterminatedString);
    assert_eq!(error.span.range(), 7..11);
    assert_eq!(error.code(), "LX001");
}

#[test]
fn lexer_is_exhausted_after_last_token() {
    let mut lexer = Lexer::new("  1  ");
    let token = lexer.next_token().expect("Valid input.");
    assert!(matches!(token, Some(ref t) if t.kind == TokenKind::Number));
    assert!(matches!(lexer.next_token(), Ok(None)));
    assert!(matches!(lexer.next_token(), Ok(None)));
}

// Property-based tests

fn parenthesis_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("(".to_string()), Just(")".to_string())]
}

fn numeric_literal_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,12}".prop_map(|s| s)
}

fn string_literal_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 ()]{0,8}".prop_map(|s: String| format!("\"{}\"", s))
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z+*/<>=!?-][a-zA-Z0-9+*/<>=!?_-]{0,8}".prop_map(|s: String| s)
}

fn token_sequence_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            parenthesis_strategy(),
            numeric_literal_strategy(),
            string_literal_strategy(),
            identifier_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
}

proptest! {
    #[test]
    fn lexer_emits_one_token_per_lexeme(input in token_sequence_strategy()) {
        let expected_num_tokens = input.len();
        let input = input.join(" ");
        let tokens = tokenize(&input);
        prop_assert!(tokens.is_ok());
        prop_assert_eq!(tokens.map(|t| t.len()).unwrap_or_default(), expected_num_tokens);
    }

    #[test]
    fn lexer_terminates_on_printable_input(input in "[ -~]{0,64}") {
        let mut lexer = Lexer::new(&input);
        let mut steps = 0;
        while let Some(result) = lexer.next() {
            steps += 1;
            if result.is_err() {
                break;
            }
        }
        prop_assert!(steps <= input.len());
    }
}
