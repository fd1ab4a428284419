use super::block::{closer, opener};
use super::reference::{Declaration, DeclarationKind, ReferenceKey, UserReferenceTable};
use crate::error;
use crate::lang::token::{Kind, Token, Word};
use crate::lang::{CodeLine, Error, LineNumber};
use tracing::trace;

/// Collects every procedure, function and implicitly declared variable.
/// The table is flat: a declaration is visible to the whole program.
///
/// Routine ends pair up the same way blocks do in the tree: a terminator
/// only closes the innermost open block, so an `END PROCEDURE` inside an
/// unclosed `FOR` leaves the procedure open.
pub fn find_user_declarations(lines: &[CodeLine]) -> (UserReferenceTable, Vec<Error>) {
    let mut scanner = Scanner::default();
    for (index, line) in lines.iter().enumerate() {
        for tokens in line.statements() {
            scanner.statement(index, line.number(), tokens);
        }
    }
    (scanner.table, scanner.errors)
}

#[derive(Default)]
struct Scanner {
    table: UserReferenceTable,
    errors: Vec<Error>,
    blocks: Vec<(Word, Option<ReferenceKey>)>,
}

impl Scanner {
    fn statement(&mut self, index: usize, number: LineNumber, tokens: &[Token]) {
        let first = match tokens.first() {
            Some(t) => t,
            None => return,
        };
        if let Some(opened_by) = closer(tokens) {
            self.close(opened_by, index, number);
            return;
        }
        let mut key = None;
        match first.kind() {
            Kind::ReservedWord(Word::Procedure) => {
                key = self.routine(DeclarationKind::Procedure, index, number, tokens)
            }
            Kind::ReservedWord(Word::Function) => {
                key = self.routine(DeclarationKind::Function, index, number, tokens)
            }
            Kind::ReservedWord(Word::Let) | Kind::ReservedWord(Word::For) => {
                self.assignment(index, number, &tokens[1..])
            }
            Kind::ReservedWord(Word::Dim) => self.dim(index, number, &tokens[1..]),
            Kind::UserDefinedItem => self.assignment(index, number, tokens),
            _ => {}
        }
        if let Some((word, _)) = opener(tokens) {
            self.blocks.push((word, key));
        }
    }

    fn routine(
        &mut self,
        kind: DeclarationKind,
        index: usize,
        number: LineNumber,
        tokens: &[Token],
    ) -> Option<ReferenceKey> {
        let name = match tokens.get(1) {
            Some(t) if *t.kind() == Kind::UserDefinedItem => t,
            _ => {
                let column = tokens[0].column();
                self.errors.push(error!(MissingIdentifier, number, ..&column; kind.to_string()));
                return None;
            }
        };
        let mut declaration = Declaration::new(name.text(), kind, index, number);
        declaration.parameters = parameters(&tokens[2..]);
        let key = declaration.key();
        trace!(name = name.text(), line = number, "declared {}", kind);
        if let Some(previous) = self.table.declare(declaration) {
            let msg = format!("{} FIRST DECLARED IN {}", previous.name, previous.line_number);
            self.errors
                .push(error!(DuplicateDeclaration, number, ..&name.column(); msg));
        }
        Some(key)
    }

    fn close(&mut self, opened_by: Word, index: usize, number: LineNumber) {
        match self.blocks.last() {
            Some((word, _)) if *word == opened_by => {}
            _ => return,
        }
        if let Some((_, Some(key))) = self.blocks.pop() {
            self.table.close(&key, index, number);
        }
    }

    fn assignment(&mut self, index: usize, number: LineNumber, tokens: &[Token]) {
        let target = match tokens.first() {
            Some(t) if *t.kind() == Kind::UserDefinedItem => t,
            _ => return,
        };
        let mut rest = &tokens[1..];
        if let Some(t) = rest.first() {
            if *t.kind() == Kind::SizingStartDelimiter {
                rest = skip_group(rest);
            }
        }
        if let Some(Kind::AssignmentOperator(_)) = rest.first().map(Token::kind) {
            self.variable(index, number, target);
        }
    }

    fn dim(&mut self, index: usize, number: LineNumber, tokens: &[Token]) {
        let mut depth = 0;
        let mut expect_name = true;
        for token in tokens {
            match token.kind() {
                Kind::BlockStartDelimiter | Kind::SizingStartDelimiter => depth += 1,
                Kind::BlockEndDelimiter | Kind::SizingEndDelimiter => depth -= 1,
                Kind::SeparatorDelimiter if depth == 0 => expect_name = true,
                Kind::UserDefinedItem if depth == 0 && expect_name => {
                    self.variable(index, number, token);
                    expect_name = false;
                }
                _ => {}
            }
        }
    }

    fn variable(&mut self, index: usize, number: LineNumber, token: &Token) {
        if !self.table.contains(token.text()) {
            trace!(name = token.text(), line = number, "declared variable");
            self.table.declare(Declaration::new(
                token.text(),
                DeclarationKind::Variable,
                index,
                number,
            ));
        }
    }
}

// Skips a bracketed run starting at tokens[0] and returns what follows it.
fn skip_group(tokens: &[Token]) -> &[Token] {
    let mut depth = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind() {
            Kind::BlockStartDelimiter | Kind::SizingStartDelimiter => depth += 1,
            Kind::BlockEndDelimiter | Kind::SizingEndDelimiter => {
                depth -= 1;
                if depth == 0 {
                    return &tokens[i + 1..];
                }
            }
            _ => {}
        }
    }
    &[]
}

// The first name of each separated group inside the leading parentheses.
fn parameters(tokens: &[Token]) -> Vec<String> {
    let mut params = vec![];
    let mut iter = tokens.iter();
    match iter.next() {
        Some(t) if *t.kind() == Kind::BlockStartDelimiter => {}
        _ => return params,
    }
    let mut depth = 1;
    let mut expect_name = true;
    for token in iter {
        match token.kind() {
            Kind::BlockStartDelimiter | Kind::SizingStartDelimiter => depth += 1,
            Kind::BlockEndDelimiter | Kind::SizingEndDelimiter => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Kind::SeparatorDelimiter if depth == 1 => expect_name = true,
            Kind::UserDefinedItem if depth == 1 && expect_name => {
                params.push(token.text().to_string());
                expect_name = false;
            }
            _ => {}
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &[&str]) -> Vec<CodeLine> {
        source
            .iter()
            .enumerate()
            .map(|(i, s)| CodeLine::new(i + 1, s))
            .collect()
    }

    #[test]
    fn test_parameters() {
        let line = CodeLine::new(1, "(A AS INTEGER, B[3], C$) AS STRING");
        assert_eq!(parameters(line.tokens()), vec!["A", "B", "C$"]);
        let line = CodeLine::new(1, "()");
        assert!(parameters(line.tokens()).is_empty());
        let line = CodeLine::new(1, "A, B");
        assert!(parameters(line.tokens()).is_empty());
    }

    #[test]
    fn test_missing_name() {
        let (table, errors) = find_user_declarations(&lines(&["PROCEDURE (A)"]));
        assert!(table.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), crate::lang::ErrorCode::MissingIdentifier);
    }

    #[test]
    fn test_implicit_variables() {
        let (table, errors) = find_user_declarations(&lines(&[
            "total = 0",
            "let Count = 1 : FOR i = 1 TO 3",
            "buf[2] = 5",
            "DIM names$[10], Flag AS BOOLEAN",
            "TOTAL = total + 1",
            "PRINT unknown",
        ]));
        assert!(errors.is_empty());
        let names: Vec<&str> = table.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["total", "Count", "i", "buf", "names$", "Flag"]);
        assert_eq!(table.lookup("I").unwrap().line_index, 1);
    }

    #[test]
    fn test_end_inside_open_loop_does_not_close() {
        let (table, _) = find_user_declarations(&lines(&[
            "PROCEDURE P",
            "FOR i = 1 TO 2",
            "END PROCEDURE",
        ]));
        assert!(!table.lookup("p").unwrap().is_closed());
        let (table, _) = find_user_declarations(&lines(&[
            "PROCEDURE P",
            "FOR i = 1 TO 2",
            "NEXT",
            "END PROCEDURE",
        ]));
        assert_eq!(table.lookup("p").unwrap().end_index, Some(3));
    }

    #[test]
    fn test_function_name_assignment_is_not_a_variable() {
        let (table, _) = find_user_declarations(&lines(&[
            "FUNCTION Twice(N)",
            "Twice = N * 2",
            "END FUNCTION",
        ]));
        assert_eq!(table.len(), 1);
        let f = table.lookup("twice").unwrap();
        assert_eq!(f.kind, DeclarationKind::Function);
        assert_eq!(f.end_index, Some(2));
        assert_eq!(f.end_line_number, Some(3));
    }
}
