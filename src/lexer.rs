use std::fmt;

/// A classified run of SQL source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// SQL text copied verbatim to the output.
    Literal(&'a str),
    /// Name following a `:` marker, without the colon.
    Placeholder(&'a str),
}

/// Kind of quoted literal the lexer can be inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// `'...'`
    String,
    /// `"..."`
    Identifier,
    /// `E'...'`
    EscapeString,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string literal"),
            Self::Identifier => write!(f, "quoted identifier"),
            Self::EscapeString => write!(f, "escape string literal"),
        }
    }
}

/// Non-fatal findings reported alongside the token stream.
///
/// Offsets are byte offsets into the text handed to [`tokenize`]. Through
/// [`build_query`](crate::build_query) that is the trimmed SQL, not the
/// caller's input or the whole source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Input ended inside a quoted literal opened at `offset`. The partial
    /// literal is still emitted as SQL text.
    UnterminatedLiteral { kind: LiteralKind, offset: usize },
    /// A `:` at `offset` is not followed by any identifier character. It is
    /// still treated as a placeholder with an empty name.
    EmptyPlaceholderName { offset: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedLiteral { kind, offset } => {
                write!(f, "unterminated {kind} starting at byte {offset}")
            }
            Self::EmptyPlaceholderName { offset } => {
                write!(f, "placeholder marker at byte {offset} has an empty name")
            }
        }
    }
}

/// Scanning mode. Exactly one is active at any position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Raw,
    SingleQuoted,
    DoubleQuoted,
    EscapedString,
    PlaceholderName,
}

/// Tokens of a scanned statement plus anything worth reporting about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed<'a> {
    pub tokens: Vec<Token<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Splits SQL text into literal snippets and named placeholders.
///
/// Placeholder markers inside `'...'`, `"..."` and `E'...'` literals are left
/// alone, and `::` casts are never treated as markers.
///
/// # Examples
///
/// ```
/// use sqlx_named_sql::lexer::{tokenize, Token};
///
/// let lexed = tokenize("select ':a', x::int from t where id = :id");
/// assert_eq!(
///     lexed.tokens,
///     vec![
///         Token::Literal("select ':a', x::int from t where id = "),
///         Token::Placeholder("id"),
///     ]
/// );
/// ```
pub fn tokenize(sql: &str) -> Lexed<'_> {
    Lexer::new(sql).run()
}

struct Lexer<'a> {
    src: &'a str,
    start: usize,
    pos: usize,
    literal_start: usize,
    lexed: Lexed<'a>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            start: 0,
            pos: 0,
            literal_start: 0,
            lexed: Lexed::default(),
        }
    }

    fn run(mut self) -> Lexed<'a> {
        let mut state = Some(LexState::Raw);
        while let Some(current) = state {
            state = match current {
                LexState::Raw => self.raw(),
                LexState::SingleQuoted => self.quoted(b'\'', LiteralKind::String),
                LexState::DoubleQuoted => self.quoted(b'"', LiteralKind::Identifier),
                LexState::EscapedString => self.quoted(b'\'', LiteralKind::EscapeString),
                LexState::PlaceholderName => self.placeholder_name(),
            };
        }
        self.lexed
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Emits the pending text as a literal snippet ending at `end`.
    fn flush(&mut self, end: usize) {
        if end > self.start {
            self.lexed.tokens.push(Token::Literal(&self.src[self.start..end]));
        }
        self.start = end;
    }

    fn raw(&mut self) -> Option<LexState> {
        while let Some(byte) = self.peek() {
            let at = self.pos;
            self.pos += 1;
            match byte {
                b'e' | b'E' if self.peek() == Some(b'\'') => {
                    self.pos += 1;
                    self.literal_start = at;
                    return Some(LexState::EscapedString);
                }
                b'\'' => {
                    self.literal_start = at;
                    return Some(LexState::SingleQuoted);
                }
                b'"' => {
                    self.literal_start = at;
                    return Some(LexState::DoubleQuoted);
                }
                // type cast
                b':' if self.peek() == Some(b':') => self.pos += 1,
                b':' => {
                    self.flush(at);
                    self.start = self.pos;
                    return Some(LexState::PlaceholderName);
                }
                _ => {}
            }
        }
        self.flush(self.pos);
        None
    }

    /// Scans to the end of a literal closed by `quote`, where a doubled quote
    /// is an escaped quote. Escape strings additionally skip the character
    /// following each backslash.
    fn quoted(&mut self, quote: u8, kind: LiteralKind) -> Option<LexState> {
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\\' && kind == LiteralKind::EscapeString {
                self.pos += self.src[self.pos..].chars().next().map_or(0, char::len_utf8);
            } else if byte == quote {
                if self.peek() != Some(quote) {
                    return Some(LexState::Raw);
                }
                self.pos += 1;
            }
        }
        self.lexed.diagnostics.push(Diagnostic::UnterminatedLiteral {
            kind,
            offset: self.literal_start,
        });
        self.flush(self.pos);
        None
    }

    fn placeholder_name(&mut self) -> Option<LexState> {
        while self.peek().is_some_and(is_placeholder_byte) {
            self.pos += 1;
        }
        if self.pos == self.start {
            self.lexed.diagnostics.push(Diagnostic::EmptyPlaceholderName {
                offset: self.start - 1,
            });
        }
        self.lexed
            .tokens
            .push(Token::Placeholder(&self.src[self.start..self.pos]));
        self.start = self.pos;
        Some(LexState::Raw)
    }
}

const fn is_placeholder_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
