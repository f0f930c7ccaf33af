//! The structural pass: which groups exist, which are mandatory.
//!
//! State is deliberately small: the lexical mode, the frame stack, the
//! shallowest depth at which an unresolved `|` was seen, and the verbose flag
//! (which inline modifiers can switch while scanning).

use regroup_core::GroupDescriptor;

use super::mode::{Lexeme, LexicalMode};
use super::stack::{FrameKind, NestingStack};

/// Letters the validating engine accepts in inline flag groups such as
/// `(?mx)` or `(?i-U:...)`. `u` is accepted and ignored.
const FLAG_LETTERS: &[u8] = b"imsxRUu";

/// Scan `pattern` and classify its capturing groups, in opening order.
///
/// Names are taken from `(?P<name>` and `(?<name>` as they are opened. The
/// pattern is assumed valid; on invalid input the result is unspecified but
/// the scan still terminates without panicking.
pub fn scan(pattern: &str, verbose: bool) -> Vec<GroupDescriptor> {
    let groups = Scanner::new(pattern, verbose).run();
    tracing::trace!(pattern, verbose, groups = groups.len(), "scanned pattern");
    groups
}

/// What an opening `(` turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Opener {
    Group {
        kind: FrameKind,
        name: Option<String>,
        /// Bytes consumed after the `(`.
        skip: usize,
    },
    /// `(?#`: no frame, the body is a comment.
    Comment,
    /// `(?(`: the reference is skipped, the branches are scanned.
    Conditional,
    /// `(?flags)` applying to the rest of the enclosing group.
    GlobalFlags { verbose: Option<bool>, skip: usize },
    /// `(?flags:...)` applying inside the group only.
    ScopedFlags { verbose: Option<bool>, skip: usize },
}

struct Scanner<'p> {
    src: &'p [u8],
    pattern: &'p str,
    pos: usize,
    verbose: bool,
    lexer: LexicalMode,
    stack: NestingStack,
    /// Shallowest depth holding an unresolved `|`.
    alternation: Option<usize>,
    /// Verbose flag to restore when the group at depth `.0` closes.
    scoped_verbose: Vec<(usize, bool)>,
    groups: Vec<GroupDescriptor>,
}

impl<'p> Scanner<'p> {
    fn new(pattern: &'p str, verbose: bool) -> Self {
        Self {
            src: pattern.as_bytes(),
            pattern,
            pos: 0,
            verbose,
            lexer: LexicalMode::new(),
            stack: NestingStack::new(),
            alternation: None,
            scoped_verbose: Vec::new(),
            groups: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<GroupDescriptor> {
        while let Some(&byte) = self.src.get(self.pos) {
            self.pos += 1;
            if self.lexer.feed(byte, self.verbose) == Lexeme::Inert {
                continue;
            }
            match byte {
                b'|' => self.alternate(),
                b'(' => self.open_group(),
                b')' => self.close_group(),
                _ => {}
            }
        }

        // A top-level `|` leaves no group guaranteed across all branches.
        if self.alternation == Some(0) {
            for group in &mut self.groups {
                group.mandatory = false;
            }
        }
        self.groups
    }

    fn alternate(&mut self) {
        let depth = self.stack.depth();
        if self.alternation.is_none_or(|marked| marked > depth) {
            self.alternation = Some(depth);
        }
    }

    fn open_group(&mut self) {
        match self.classify_opener() {
            Opener::Group { kind, name, skip } => {
                self.stack.open(kind, name);
                self.pos += skip;
            }
            Opener::Comment => {
                self.lexer.enter_comment_group();
                self.pos += 2;
            }
            Opener::Conditional => {
                // Either branch may be the one taken, so neither is mandatory.
                self.stack.open(FrameKind::OptionalNonCapturing, None);
                self.lexer.enter_condition_ref();
                self.pos += 2;
            }
            Opener::GlobalFlags { verbose, skip } => {
                let enclosing = self.stack.depth();
                if let Some(verbose) = verbose {
                    if enclosing > 0 {
                        self.scoped_verbose.push((enclosing, self.verbose));
                    }
                    self.verbose = verbose;
                }
                self.stack.open(FrameKind::NonCapturing, None);
                self.pos += skip;
            }
            Opener::ScopedFlags { verbose, skip } => {
                self.stack.open(FrameKind::NonCapturing, None);
                if let Some(verbose) = verbose {
                    self.scoped_verbose.push((self.stack.depth(), self.verbose));
                    self.verbose = verbose;
                }
                self.pos += skip;
            }
        }
    }

    /// Look at the bytes after `(` (at `self.pos`) to decide what opened.
    fn classify_opener(&self) -> Opener {
        let rest = &self.src[self.pos..];
        if rest.first() != Some(&b'?') {
            return Opener::Group {
                kind: FrameKind::MandatoryCapturing,
                name: None,
                skip: 0,
            };
        }

        let non_capturing = |kind, skip| Opener::Group {
            kind,
            name: None,
            skip,
        };
        match &rest[1..] {
            [b'P', b'<', ..] => self.named_group(self.pos + 3),
            [b'<', b'=', ..] => non_capturing(FrameKind::NonCapturing, 3),
            [b'<', b'!', ..] => non_capturing(FrameKind::OptionalNonCapturing, 3),
            [b'<', ..] => self.named_group(self.pos + 2),
            [b'(', ..] => Opener::Conditional,
            [b'#', ..] => Opener::Comment,
            [b'!', ..] => non_capturing(FrameKind::OptionalNonCapturing, 2),
            [b':', ..] => non_capturing(FrameKind::NonCapturing, 2),
            _ => self.flags_group(&rest[1..]),
        }
    }

    /// `(?P<name>` or `(?<name>`; `start` is the first byte of the name.
    fn named_group(&self, start: usize) -> Opener {
        let name = self.src[start..]
            .iter()
            .position(|&b| b == b'>')
            .map(|len| self.pattern[start..start + len].to_string());
        let skip = match &name {
            Some(name) => start + name.len() + 1 - self.pos,
            None => 0,
        };
        Opener::Group {
            kind: FrameKind::MandatoryCapturing,
            name,
            skip,
        }
    }

    /// `(?imx)`, `(?x-i)`, `(?U-x:...)` and friends; anything else is non-capturing.
    fn flags_group(&self, body: &[u8]) -> Opener {
        let on = body
            .iter()
            .take_while(|b| FLAG_LETTERS.contains(b))
            .count();
        let (off, after) = match body.get(on) {
            Some(b'-') => {
                let off = body[on + 1..]
                    .iter()
                    .take_while(|b| FLAG_LETTERS.contains(b))
                    .count();
                (off, on + 1 + off)
            }
            _ => (0, on),
        };
        let sets_x = body[..on].contains(&b'x');
        let clears_x = body[on..after].contains(&b'x');
        let verbose = if sets_x {
            Some(true)
        } else if clears_x {
            Some(false)
        } else {
            None
        };

        // Skip `?` and the letters; the `)` or `:` is left for the main loop.
        let skip = 1 + after;
        match body.get(after) {
            Some(b')') if on + off > 0 => Opener::GlobalFlags { verbose, skip },
            Some(b':') if on + off > 0 => Opener::ScopedFlags {
                verbose,
                skip: skip + 1,
            },
            _ => Opener::Group {
                kind: FrameKind::NonCapturing,
                name: None,
                skip: 1,
            },
        }
    }

    fn close_group(&mut self) {
        let depth_before = self.stack.depth();
        let Some(closed) = self.stack.close() else {
            return;
        };
        let depth = self.stack.depth();

        while let Some(&(scope_depth, previous)) = self.scoped_verbose.last()
            && scope_depth == depth_before
        {
            self.scoped_verbose.pop();
            self.verbose = previous;
        }

        if self.quantifier_allows_zero() {
            self.stack.downgrade_from(closed.index);
        }

        let encloses_alternation = self.alternation == Some(depth + 1);
        if encloses_alternation || closed.kind.forces_optional() {
            self.stack.downgrade_after(closed.index);
        }
        if encloses_alternation {
            self.alternation = None;
        }

        if depth == 0 {
            self.stack.flush_into(&mut self.groups);
        }
    }

    /// Does the text after the `)` just consumed repeat it zero or more times?
    ///
    /// Accepts `*`, `?` and `{m,n}` with `m == 0` (or omitted). In verbose mode
    /// whitespace and line comments may sit between the group and its quantifier.
    fn quantifier_allows_zero(&self) -> bool {
        let mut pos = self.pos;
        if self.verbose {
            pos = skip_verbose_trivia(self.src, pos);
        }
        match self.src.get(pos) {
            Some(b'*' | b'?') => true,
            Some(b'{') => repeat_minimum(&self.src[pos + 1..]) == Some(0),
            _ => false,
        }
    }
}

/// Skip whitespace and `#` comments, returning the next significant position.
fn skip_verbose_trivia(src: &[u8], mut pos: usize) -> usize {
    while let Some(&byte) = src.get(pos) {
        match byte {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c' => pos += 1,
            b'#' => {
                pos += src[pos..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .unwrap_or(src.len() - pos);
            }
            _ => break,
        }
    }
    pos
}

/// Minimum of a `{m}`, `{m,}`, `{,n}` or `{m,n}` repeat; `body` starts after `{`.
///
/// `None` when the braces are not a repeat (the dialect then reads them as
/// literal text).
fn repeat_minimum(body: &[u8]) -> Option<u64> {
    let digits = body.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = digits;
    let comma = body.get(end) == Some(&b',');
    if comma {
        end += 1;
        end += body[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    if body.get(end) != Some(&b'}') || (digits == 0 && !comma) {
        return None;
    }
    if digits == 0 {
        return Some(0);
    }
    // Too large to be zero even if it overflows.
    Some(
        std::str::from_utf8(&body[..digits])
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(u64::MAX),
    )
}
