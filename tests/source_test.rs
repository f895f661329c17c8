use proptest::prelude::*;

use lisplite::source::{sanitize, SourceFile};

#[test]
fn control_bytes_become_spaces() {
    assert_eq!(sanitize(b"(print\t\"a\")\r\n"), "(print \"a\")  ");
    assert_eq!(sanitize(&[0, 31, 127, 200]), "    ");
}

#[test]
fn printable_ascii_is_untouched() {
    let text = "(seq (def x 1) (print \"~!@#\"))";
    assert_eq!(sanitize(text.as_bytes()), text);
}

#[test]
fn diagnostics_use_original_text_when_ascii() {
    let source = SourceFile::from_bytes("a.lisp", b"(print 1)\n(x)\n".to_vec());
    assert_eq!(source.text(), "(print 1) (x) ");
    assert_eq!(source.display_text(), "(print 1)\n(x)\n");
    assert_eq!(source.path().to_string_lossy(), "a.lisp");
}

#[test]
fn diagnostics_fall_back_to_sanitized_text() {
    let source = SourceFile::from_bytes("b.lisp", "(print \"é\")".as_bytes().to_vec());
    assert_eq!(source.text(), "(print \"  \")");
    assert_eq!(source.display_text(), source.text());

    let source = SourceFile::from_bytes("c.lisp", vec![b'(', 0xff, b')']);
    assert_eq!(source.display_text(), "( )");
}

proptest! {
    #[test]
    fn sanitize_preserves_length_and_is_printable(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let text = sanitize(&bytes);
        prop_assert_eq!(text.len(), bytes.len());
        prop_assert!(text.bytes().all(|b| (32..=126).contains(&b)));
    }
}
