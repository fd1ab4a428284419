use super::{Error, LineNumber};
use crate::error;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Source conventions recognised before tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Starts a comment running to end of line, outside of strings.
    pub comment: char,
    /// A line ending in this character (after whitespace) joins the next.
    pub continuation: Option<char>,
    /// Treat lines starting with `REM` as comments.
    pub rem_comments: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            comment: '\'',
            continuation: Some('_'),
            rem_comments: true,
        }
    }
}

/// A cleaned logical line and the physical line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: LineNumber,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: LineNumber, text: &str) -> SourceLine {
        SourceLine {
            number,
            text: text.to_string(),
        }
    }
}

pub fn preprocess_line(line: &str) -> Option<String> {
    Preprocessor::default().line(line)
}

pub fn preprocess_stream<R: BufRead>(reader: R) -> Result<Vec<SourceLine>, Error> {
    Preprocessor::default().stream(reader)
}

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: Options,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Preprocessor {
    pub fn new(options: Options) -> Preprocessor {
        Preprocessor {
            options,
            interrupt: None,
        }
    }

    pub fn with_interrupt(self, interrupt: Arc<AtomicBool>) -> Preprocessor {
        Preprocessor {
            interrupt: Some(interrupt),
            ..self
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn line(&self, line: &str) -> Option<String> {
        let (code, _) = self.strip(line);
        if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        }
    }

    /// Reads every line before returning. An interrupt or read failure
    /// discards everything read so far.
    pub fn stream<R: BufRead>(&self, reader: R) -> Result<Vec<SourceLine>, Error> {
        let mut lines: Vec<SourceLine> = vec![];
        let mut pending: Option<SourceLine> = None;
        for (index, line) in reader.lines().enumerate() {
            let number = index + 1;
            if self.is_interrupted() {
                warn!(line = number, "source read interrupted");
                return Err(error!(Interrupted, number));
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(line = number, error = %e, "source read failed");
                    return Err(error!(IoFailure, number; e.to_string()));
                }
            };
            let (code, open_string) = self.strip(&line);
            let (code, continues) = self.continuation(code, open_string);
            let current = match pending.take() {
                Some(mut joined) => {
                    if !code.is_empty() {
                        if !joined.text.is_empty() {
                            joined.text.push(' ');
                        }
                        joined.text.push_str(code);
                    }
                    joined
                }
                None => SourceLine::new(number, code),
            };
            if continues {
                trace!(line = number, "continued");
                pending = Some(current);
            } else if !current.text.is_empty() {
                lines.push(current);
            }
        }
        if let Some(last) = pending {
            if !last.text.is_empty() {
                lines.push(last);
            }
        }
        if self.is_interrupted() {
            warn!("source read interrupted");
            return Err(error!(Interrupted));
        }
        debug!(lines = lines.len(), "pre-processed source");
        Ok(lines)
    }

    fn is_interrupted(&self) -> bool {
        match &self.interrupt {
            Some(flag) => flag.load(Ordering::SeqCst),
            None => false,
        }
    }

    // Returns the code with any comment removed, and whether a string
    // literal is still open at end of line. A `REM` statement after a `:`
    // comments out the rest of the line.
    fn strip<'a>(&self, line: &'a str) -> (&'a str, bool) {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let mut in_string = false;
        let mut end = line.len();
        for (index, ch) in line.char_indices() {
            if ch == '"' {
                in_string = !in_string;
            } else if ch == self.options.comment && !in_string {
                end = index;
                break;
            } else if ch == ':'
                && !in_string
                && self.options.rem_comments
                && is_rem(line[index + 1..].trim_start())
            {
                end = index;
                break;
            }
        }
        let code = line[..end].trim();
        if self.options.rem_comments && is_rem(code) {
            return ("", false);
        }
        (code, in_string)
    }

    fn continuation<'a>(&self, code: &'a str, open_string: bool) -> (&'a str, bool) {
        if let (Some(marker), false) = (self.options.continuation, open_string) {
            if let Some(rest) = code.strip_suffix(marker) {
                if rest.is_empty() || rest.ends_with(char::is_whitespace) {
                    return (rest.trim_end(), true);
                }
            }
        }
        (code, false)
    }
}

fn is_rem(code: &str) -> bool {
    match code.get(..3) {
        Some(word) if word.eq_ignore_ascii_case("REM") => code[3..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace),
        _ => false,
    }
}
