use super::token::*;

/// Splits one line of source into tokens. The same text always produces the
/// same tokens; nothing is carried between calls except the vocabulary.
pub fn tokenize_line(s: &str) -> Vec<Token> {
    BasicLexer::lex(s)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_type_suffix(c: char) -> bool {
    c == '$' || c == '%' || c == '!'
}

struct BasicLexer {
    chars: Vec<char>,
    pos: usize,
}

impl BasicLexer {
    fn lex(s: &str) -> Vec<Token> {
        BasicLexer {
            chars: s.trim_end_matches(&['\r', '\n'][..]).chars().collect(),
            pos: 0,
        }
        .collect()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn token(&self, kind: Kind, start: usize) -> Token {
        Token::new(kind, &self.slice(start, self.pos), start..self.pos)
    }

    fn whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !is_basic_whitespace(ch) {
                break;
            }
            self.pos += 1;
        }
    }

    fn string(&mut self) -> Token {
        let start = self.pos;
        let mut s = String::new();
        self.pos += 1;
        loop {
            match self.peek() {
                None => return self.token(Kind::Error, start),
                Some('"') => {
                    if self.peek_at(1) == Some('"') {
                        s.push('"');
                        self.pos += 2;
                        continue;
                    }
                    self.pos += 1;
                    return Token::new(Kind::StringLiteral, &s, start..self.pos);
                }
                Some(ch) => {
                    s.push(ch);
                    self.pos += 1;
                }
            }
        }
    }

    fn number(&mut self) -> Token {
        let start = self.pos;
        let mut decimals = 0;
        while let Some(ch) = self.peek() {
            if ch == '.' {
                decimals += 1;
            } else if !is_basic_digit(ch) {
                break;
            }
            self.pos += 1;
        }
        let kind = match decimals {
            0 => Kind::IntegerLiteral,
            1 => Kind::FloatingPointLiteral,
            _ => Kind::Error,
        };
        self.token(kind, start)
    }

    fn alphabetic(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !is_basic_alphabetic(ch) && !is_basic_digit(ch) {
                break;
            }
            self.pos += 1;
        }
        if let Some(ch) = self.peek() {
            if is_type_suffix(ch) {
                self.pos += 1;
            }
        }
        let s = self.slice(start, self.pos);
        let kind = Kind::from_string(&s).unwrap_or(Kind::UserDefinedItem);
        Token::new(kind, &s, start..self.pos)
    }

    fn operator(&mut self) -> Option<Token> {
        let start = self.pos;
        for len in [2, 1] {
            if start + len > self.chars.len() {
                continue;
            }
            let s = self.slice(start, start + len);
            if let Some(kind) = Kind::from_string(&s) {
                if kind.operator().is_some() {
                    self.pos += len;
                    return Some(Token::new(kind, &s, start..self.pos));
                }
            }
        }
        None
    }

    fn minutia(&mut self, kind: Kind) -> Token {
        let start = self.pos;
        self.pos += 1;
        self.token(kind, start)
    }
}

impl Iterator for BasicLexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.whitespace();
        let pk = self.peek()?;
        if Kind::for_delimiter(pk) == Some(Kind::StringDelimiter) {
            return Some(self.string());
        }
        if is_basic_digit(pk) || (pk == '.' && self.peek_at(1).map_or(false, is_basic_digit)) {
            return Some(self.number());
        }
        if is_basic_alphabetic(pk) {
            return Some(self.alphabetic());
        }
        if let Some(token) = self.operator() {
            return Some(token);
        }
        match Kind::for_delimiter(pk) {
            Some(kind) => Some(self.minutia(kind)),
            None => Some(self.minutia(Kind::Error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<Kind> {
        tokenize_line(s).iter().map(|t| *t.kind()).collect()
    }

    #[test]
    fn test_longest_operator() {
        assert_eq!(
            kinds("<=<>>="),
            vec![
                Kind::ComparisonOperator(Operator::LessEqual),
                Kind::ComparisonOperator(Operator::NotEqual),
                Kind::ComparisonOperator(Operator::GreaterEqual),
            ]
        );
        assert_eq!(kinds("i++"), vec![Kind::UserDefinedItem, Kind::IncrementOperator]);
    }

    #[test]
    fn test_columns_count_chars() {
        let tokens = tokenize_line("A$ = \"é\" + B");
        let columns: Vec<_> = tokens.iter().map(|t| t.column()).collect();
        assert_eq!(columns, vec![0..2, 3..4, 5..8, 9..10, 11..12]);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(kinds("END\r\n"), vec![Kind::ReservedWord(Word::End)]);
    }
}
