use super::lex::tokenize_line;
use super::token::*;
use super::{Error, LineNumber};
use crate::error;

#[derive(Debug, Clone, PartialEq)]
pub struct CodeLine {
    number: LineNumber,
    source: String,
    tokens: Vec<Token>,
}

impl CodeLine {
    pub fn new(number: LineNumber, source: &str) -> CodeLine {
        CodeLine {
            number,
            source: source.trim_end_matches(&['\r', '\n'][..]).to_string(),
            tokens: tokenize_line(source),
        }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token runs between top-level `:` delimiters. Empty runs are skipped.
    pub fn statements(&self) -> impl Iterator<Item = &[Token]> {
        let mut runs = vec![];
        let mut depth = 0usize;
        let mut start = 0;
        for (i, token) in self.tokens.iter().enumerate() {
            match token.kind() {
                Kind::BlockStartDelimiter | Kind::SizingStartDelimiter => depth += 1,
                Kind::BlockEndDelimiter | Kind::SizingEndDelimiter => {
                    depth = depth.saturating_sub(1)
                }
                Kind::ExpressionEndDelimiter if depth == 0 => {
                    runs.push(&self.tokens[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        runs.push(&self.tokens[start..]);
        runs.into_iter().filter(|run| !run.is_empty())
    }

    pub fn errors(&self) -> Vec<Error> {
        self.tokens
            .iter()
            .filter(|t| t.is_error())
            .map(|t| {
                let msg = match t.text().chars().next() {
                    Some('"') => "UNTERMINATED STRING",
                    Some(c) if c.is_ascii_digit() || c == '.' => "MALFORMED NUMBER",
                    _ => "UNEXPECTED CHARACTER",
                };
                error!(TokenizationError, self.number, ..&t.column(); msg)
            })
            .collect()
    }
}

impl std::fmt::Display for CodeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lf() {
        let l = CodeLine::new(1, "wend\n");
        assert_eq!(*l.tokens()[0].kind(), Kind::ReservedWord(Word::Wend));
        assert_eq!(l.source(), "wend");
    }

    #[test]
    fn test_crlf() {
        let l = CodeLine::new(7, "loop\r\n");
        assert_eq!(l.tokens().len(), 1);
        assert_eq!(l.number(), 7);
    }

    #[test]
    fn test_statements() {
        let l = CodeLine::new(1, "A = 1 :: PRINT A:");
        let runs: Vec<usize> = l.statements().map(|s| s.len()).collect();
        assert_eq!(runs, vec![3, 2]);
    }

    #[test]
    fn test_statements_keep_nested_colons() {
        let l = CodeLine::new(1, "PRINT (a : b) : x[1 : 2] = 0");
        let runs: Vec<usize> = l.statements().map(|s| s.len()).collect();
        assert_eq!(runs, vec![6, 8]);
        let l = CodeLine::new(1, "PRINT a) : b");
        assert_eq!(l.statements().count(), 2);
    }

    #[test]
    fn test_errors() {
        let l = CodeLine::new(4, "X = 3.1.4 @ \"open");
        let errors = l.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].to_string(), "SYNTAX ERROR IN 4 (4..9); MALFORMED NUMBER");
        assert_eq!(errors[1].column(), 10..11);
        assert_eq!(errors[2].text(), "UNTERMINATED STRING");
    }
}
