use super::ast::BlockType;
use crate::lang::token::{Token, Word};

/// The word a statement opens a block with, if any. `IF` only opens a
/// block when `THEN` ends the statement.
pub fn opener(tokens: &[Token]) -> Option<(Word, BlockType)> {
    let word = tokens.first()?.word()?;
    let kind = match word {
        Word::If => match tokens.last() {
            Some(last) if tokens.len() > 1 && last.is_word(Word::Then) => BlockType::If,
            _ => return None,
        },
        Word::Procedure => BlockType::Procedure,
        Word::Function => BlockType::Function,
        Word::For | Word::While | Word::Do => BlockType::Loop,
        _ => return None,
    };
    Some((word, kind))
}

/// The opening word a terminator statement pairs with. Only the innermost
/// open block may be closed by it.
pub fn closer(tokens: &[Token]) -> Option<Word> {
    match tokens.first()?.word()? {
        Word::EndIf => Some(Word::If),
        Word::End => match tokens.get(1).and_then(Token::word)? {
            Word::If => Some(Word::If),
            Word::Procedure => Some(Word::Procedure),
            Word::Function => Some(Word::Function),
            _ => None,
        },
        Word::Next => Some(Word::For),
        Word::Wend => Some(Word::While),
        Word::Loop => Some(Word::Do),
        _ => None,
    }
}

pub fn terminator_name(opener: Word) -> &'static str {
    match opener {
        Word::If => "ENDIF",
        Word::Procedure => "END PROCEDURE",
        Word::Function => "END FUNCTION",
        Word::For => "NEXT",
        Word::While => "WEND",
        Word::Do => "LOOP",
        _ => "END",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::tokenize_line;

    #[test]
    fn test_openers() {
        assert_eq!(
            opener(&tokenize_line("if a then")),
            Some((Word::If, BlockType::If))
        );
        assert_eq!(opener(&tokenize_line("IF a THEN PRINT a")), None);
        assert_eq!(
            opener(&tokenize_line("WHILE x")),
            Some((Word::While, BlockType::Loop))
        );
        assert_eq!(opener(&tokenize_line("PRINT x")), None);
    }

    #[test]
    fn test_closers() {
        assert_eq!(closer(&tokenize_line("END IF")), Some(Word::If));
        assert_eq!(closer(&tokenize_line("end function")), Some(Word::Function));
        assert_eq!(closer(&tokenize_line("LOOP UNTIL a")), Some(Word::Do));
        assert_eq!(closer(&tokenize_line("END")), None);
    }
}
