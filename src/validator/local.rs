use super::charset::{is_quoted_char, is_unquoted_char};
use super::types::{DotSegment, LocalDefect};

pub(crate) const MAX_LOCAL_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Rien en tampon. `after_quote` autorise un `.` séparateur libre.
    SegmentStart { after_quote: bool },
    Unquoted,
    Quoted,
    Escaped { quoted: bool },
}

/// État du scanner : contenu du segment ouvert et ses drapeaux.
struct Scanner {
    segments: Vec<DotSegment>,
    buf: String,
    valid: bool,
    state: State,
}

impl Scanner {
    fn new() -> Self {
        Self {
            segments: Vec::new(),
            buf: String::new(),
            valid: true,
            state: State::SegmentStart { after_quote: false },
        }
    }

    fn close(&mut self, quoted: bool, next: State) {
        let content = std::mem::take(&mut self.buf);
        self.segments.push(DotSegment::new(content, quoted, self.valid));
        self.valid = true;
        self.state = next;
    }

    fn step(&mut self, c: char) {
        match self.state {
            State::SegmentStart { after_quote } => {
                self.valid = true;
                if after_quote && c == '.' {
                    // séparateur libre après un segment quoté : la suite est du texte brut
                    self.state = State::Unquoted;
                    return;
                }
                match c {
                    '"' => self.state = State::Quoted,
                    '.' => {
                        self.valid = false;
                        self.close(false, State::SegmentStart { after_quote: false });
                    }
                    _ => {
                        self.state = State::Unquoted;
                        self.step(c);
                    }
                }
            }
            State::Unquoted => match c {
                '\\' => self.state = State::Escaped { quoted: false },
                '.' => self.close(false, State::SegmentStart { after_quote: false }),
                '"' => {
                    self.valid = false;
                    self.buf.push(c);
                }
                _ => self.buf.push(c),
            },
            State::Quoted => match c {
                '\\' => self.state = State::Escaped { quoted: true },
                '"' => self.close(true, State::SegmentStart { after_quote: true }),
                _ => self.buf.push(c),
            },
            State::Escaped { quoted } => {
                self.buf.push(c);
                self.state = if quoted {
                    State::Quoted
                } else {
                    State::Unquoted
                };
            }
        }
    }

    fn finish(mut self) -> Vec<DotSegment> {
        match self.state {
            State::SegmentStart { .. } => {}
            State::Unquoted => self.close(false, State::Unquoted),
            State::Quoted => {
                // guillemet non fermé
                self.valid = false;
                self.close(true, State::Quoted);
            }
            State::Escaped { quoted } => {
                // antislash final sans caractère à échapper
                self.valid = false;
                self.close(quoted, State::Escaped { quoted });
            }
        }
        self.segments
    }
}

/// Splits a local-part into its dot-segments, left to right.
///
/// Quotes are not stored, escaped characters are stored as-is. Structural
/// problems only flag the segment; character classes are checked by
/// [`check_local`].
///
/// ```
/// let segs = mailshape::parse_local_part(r#""john..doe".x"#);
/// assert_eq!(segs.len(), 2);
/// assert_eq!(segs[0].content, "john..doe");
/// assert!(segs[0].quoted);
/// ```
pub fn parse_local_part(local: &str) -> Vec<DotSegment> {
    let mut scanner = Scanner::new();
    for c in local.chars() {
        scanner.step(c);
    }
    scanner.finish()
}

/// Règles de longueur, de structure et de classes de caractères de la partie locale.
pub(crate) fn check_local(local: &str) -> Result<(), LocalDefect> {
    if local.is_empty() {
        return Err(LocalDefect::Empty);
    }
    if local.len() > MAX_LOCAL_LEN {
        return Err(LocalDefect::TooLong(local.len()));
    }

    for (index, segment) in parse_local_part(local).iter().enumerate() {
        if !segment.syntactically_valid {
            return Err(LocalDefect::MalformedSegment { index });
        }
        let allowed = if segment.quoted {
            is_quoted_char
        } else {
            is_unquoted_char
        };
        if let Some(ch) = segment.content.chars().find(|&c| !allowed(c)) {
            return Err(LocalDefect::ForbiddenChar {
                ch,
                quoted: segment.quoted,
            });
        }
    }
    Ok(())
}
