//! Lexical sub-modes of the dialect.
//!
//! The tracker sees every byte of the pattern and decides whether it can carry
//! structure (`(`, `)`, `|`, ...) or is inert text. All syntax characters are
//! ASCII, so a byte-level walk over UTF-8 never splits anything meaningful.
//!
//! Character classes follow the validating engine (`regex-syntax` behind
//! `fancy-regex`): an unescaped `[` inside a class opens a nested class, so
//! `[[a]()]` is a single class and `[[:alpha:]]` closes only at its second
//! `]`. Set operators (`&&`, `--`, `~~`) are plain class members here.

/// Position inside a character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassState {
    /// Right after a `[`: a `]` here is literal, `^` negates.
    Open,
    /// Right after `[^`: a `]` here is still literal.
    Negated,
    /// Past the first member: an unescaped `]` closes the innermost class.
    Members,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Inside `depth` nested classes.
    Class { depth: u32, state: ClassState },
    /// Inside `(?#...)`, up to the first unescaped `)`.
    CommentGroup,
    /// Verbose-mode `#` comment, up to the end of the line.
    LineComment,
    /// The reference of a conditional `(?(ref)...)`, up to its `)`.
    ConditionRef,
}

/// What the driver should do with the byte just fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// Consumed by a lexical mode; carries no structure.
    Inert,
    /// Outside every sub-mode; may open, close or alternate groups.
    Structural,
}

#[derive(Debug, Clone, Default)]
pub struct LexicalMode {
    mode: Mode,
    escaped: bool,
}

impl LexicalMode {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[cfg(test)]
    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Enter `(?#...)`; the driver has already consumed `(?#`.
    pub fn enter_comment_group(&mut self) {
        self.mode = Mode::CommentGroup;
    }

    /// Enter the reference part of `(?(ref)`; the driver has already consumed `(?(`.
    pub fn enter_condition_ref(&mut self) {
        self.mode = Mode::ConditionRef;
    }

    /// Classify one byte, advancing escape, class and comment state.
    pub fn feed(&mut self, byte: u8, verbose: bool) -> Lexeme {
        if self.escaped {
            self.escaped = false;
            return Lexeme::Inert;
        }

        match self.mode {
            Mode::ConditionRef => {
                if byte == b')' {
                    self.mode = Mode::Normal;
                }
                Lexeme::Inert
            }
            Mode::CommentGroup => {
                match byte {
                    b'\\' => self.escaped = true,
                    b')' => self.mode = Mode::Normal,
                    _ => {}
                }
                Lexeme::Inert
            }
            Mode::LineComment => {
                match byte {
                    b'\\' => self.escaped = true,
                    b'\n' => self.mode = Mode::Normal,
                    _ => {}
                }
                Lexeme::Inert
            }
            Mode::Class { depth, state } => {
                self.mode = match (byte, state) {
                    (b'\\', _) => {
                        self.escaped = true;
                        Mode::Class { depth, state: ClassState::Members }
                    }
                    (b'^', ClassState::Open) => Mode::Class { depth, state: ClassState::Negated },
                    (b'[', _) => Mode::Class { depth: depth + 1, state: ClassState::Open },
                    (b']', ClassState::Members) if depth == 1 => Mode::Normal,
                    (b']', ClassState::Members) => Mode::Class { depth: depth - 1, state: ClassState::Members },
                    _ => Mode::Class { depth, state: ClassState::Members },
                };
                Lexeme::Inert
            }
            Mode::Normal => match byte {
                b'\\' => {
                    self.escaped = true;
                    Lexeme::Inert
                }
                b'[' => {
                    self.mode = Mode::Class { depth: 1, state: ClassState::Open };
                    Lexeme::Inert
                }
                b'#' if verbose => {
                    self.mode = Mode::LineComment;
                    Lexeme::Inert
                }
                _ => Lexeme::Structural,
            },
        }
    }
}
