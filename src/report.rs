use crate::lexer::Span;
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

/// An error report anchored at a single labelled span.
pub(crate) struct Diagnostic<'a> {
    pub code: &'static str,
    pub message: &'a str,
    pub span: Span,
    pub label: String,
}

impl Diagnostic<'_> {
    pub fn render(&self, path: &str, text: &str) -> String {
        let span = clamp_span(self.span, text);
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, span.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_code(self.code)
            .with_message(self.message)
            .with_label(
                Label::new((path, span))
                    .with_message(&self.label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}

// Spans pointing at the end of input are pulled back onto the last byte.
fn clamp_span(span: Span, text: &str) -> std::ops::Range<usize> {
    let range = span.range();
    if range.start < text.len() {
        return range.start..range.end.min(text.len());
    }
    text.len().saturating_sub(1)..text.len()
}
