use super::cursor::SourceChar;
use super::token::{Span, SpanIndex, SpanLength, Token, TokenKind};
use super::{LexicalError, LexicalErrorKind};
use compact_str::ToCompactString;

#[derive(Debug)]
pub enum LexerStateTransition {
    Stay,
    ChangeState(LexerState),
    ChangeStateAndEmit {
        new_state: LexerState,
        token_or_error: Result<Token, LexicalError>,
    },
    ChangeStateAndEmitAndPutBack {
        new_state: LexerState,
        token_or_error: Result<Token, LexicalError>,
        put_back: SourceChar,
    },
    Finish,
}

trait LexerStateExecutor {
    fn execute(&self, source: &str, next_char: Option<SourceChar>) -> LexerStateTransition;
}

#[derive(Debug, Clone)]
pub enum LexerState {
    Normal(NormalState),
    Atom(AtomState),
    String(StringState),
}

impl LexerState {
    pub fn execute(&self, source: &str, next_char: Option<SourceChar>) -> LexerStateTransition {
        match self {
            LexerState::Normal(s) => s.execute(source, next_char),
            LexerState::Atom(s) => s.execute(source, next_char),
            LexerState::String(s) => s.execute(source, next_char),
        }
    }
}

impl std::default::Default for LexerState {
    fn default() -> Self {
        Self::Normal(NormalState)
    }
}

#[derive(Debug, Clone)]
pub struct NormalState;

impl LexerStateExecutor for NormalState {
    fn execute(&self, source: &str, next_char: Option<SourceChar>) -> LexerStateTransition {
        let _ = source;
        let Some(c) = next_char else {
            return LexerStateTransition::Finish;
        };

        let just = move |kind: TokenKind| LexerStateTransition::ChangeStateAndEmit {
            new_state: LexerState::Normal(NormalState),
            token_or_error: Ok(Token {
                kind,
                text: c.value.to_compact_string(),
                span: Span {
                    start: c.offset,
                    length: SpanLength::new(1),
                },
            }),
        };

        match c.value {
            '(' => just(TokenKind::LeftParenthesis),
            ')' => just(TokenKind::RightParenthesis),
            '"' => LexerStateTransition::ChangeState(LexerState::String(StringState {
                start: c.offset,
            })),
            v if v.is_ascii_whitespace() => LexerStateTransition::Stay,
            _ => LexerStateTransition::ChangeState(LexerState::Atom(AtomState { start: c.offset })),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AtomState {
    start: SpanIndex,
}

impl AtomState {
    fn lex_atom(&self, source: &str, end: SpanIndex) -> Token {
        let span = Span {
            start: self.start,
            length: end - self.start,
        };
        let text = &source[span.range()];
        let kind = if text.bytes().all(|b| b.is_ascii_digit()) {
            TokenKind::Number
        } else {
            TokenKind::Identifier
        };
        Token {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl LexerStateExecutor for AtomState {
    fn execute(&self, source: &str, next_char: Option<SourceChar>) -> LexerStateTransition {
        let Some(c) = next_char else {
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState),
                token_or_error: Ok(self.lex_atom(source, source.len().into())),
            };
        };

        if !c.is_separator() {
            return LexerStateTransition::Stay;
        }

        let token = self.lex_atom(source, c.offset);
        if c.value.is_ascii_whitespace() {
            LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState),
                token_or_error: Ok(token),
            }
        } else {
            // The parenthesis is its own token.
            LexerStateTransition::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal(NormalState),
                token_or_error: Ok(token),
                put_back: c,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StringState {
    start: SpanIndex,
}

impl LexerStateExecutor for StringState {
    fn execute(&self, source: &str, next_char: Option<SourceChar>) -> LexerStateTransition {
        let Some(c) = next_char else {
            let end: SpanIndex = source.len().into();
            return LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal(NormalState),
                token_or_error: Err(LexicalError {
                    kind: LexicalErrorKind::UnterminatedString,
                    span: Span {
                        start: self.start,
                        length: end - self.start,
                    },
                }),
            };
        };

        if c.value != '"' {
            return LexerStateTransition::Stay;
        }

        let span = Span {
            start: self.start,
            length: c.next_offset() - self.start,
        };
        let content = (self.start + 1usize).to_usize()..c.offset.to_usize();
        LexerStateTransition::ChangeStateAndEmit {
            new_state: LexerState::Normal(NormalState),
            token_or_error: Ok(Token {
                kind: TokenKind::String,
                text: source[content].into(),
                span,
            }),
        }
    }
}
