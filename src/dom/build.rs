use super::ast::*;
use super::block::{closer, opener, terminator_name};
use super::reference::UserReferenceTable;
use crate::error;
use crate::lang::token::{Kind, Token, Word};
use crate::lang::{CodeLine, Column, Error, LineNumber};
use tracing::trace;

/// Groups nested deeper than this are not built.
pub const MAX_NESTING: usize = 64;

/// Assembles the statement tree. Block structure problems are reported and
/// the partial tree is still returned.
pub fn build(lines: &[CodeLine], table: &UserReferenceTable) -> (ExecutionUnit, Vec<Error>) {
    let mut builder = Builder {
        table,
        stack: vec![],
        root: vec![],
        errors: vec![],
        depth: 0,
    };
    for line in lines {
        for tokens in line.statements() {
            let statement = builder.statement(line.number(), tokens);
            builder.place(statement, tokens);
        }
    }
    builder.finish()
}

struct OpenBlock {
    opener: Word,
    statement: Statement,
    block: Block,
}

impl OpenBlock {
    fn into_statement(self) -> Statement {
        let mut statement = self.statement;
        statement.block = Some(self.block);
        statement
    }
}

#[derive(Default)]
struct Context {
    open_file: bool,
    file_named: bool,
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn next(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(t)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_word(&self) -> Option<Word> {
        self.peek().and_then(Token::word)
    }

    fn end(&self) -> usize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(t) => t.column().end,
            None => 0,
        }
    }
}

struct Builder<'a> {
    table: &'a UserReferenceTable,
    stack: Vec<OpenBlock>,
    root: Vec<Statement>,
    errors: Vec<Error>,
    depth: usize,
}

impl<'a> Builder<'a> {
    fn finish(mut self) -> (ExecutionUnit, Vec<Error>) {
        while let Some(open) = self.stack.pop() {
            let msg = format!("{} WITHOUT {}", open.opener, terminator_name(open.opener));
            let column = open.statement.column.clone();
            self.errors
                .push(error!(UnclosedBlock, open.statement.line_number, ..&column; msg));
            let statement = open.into_statement();
            self.push(statement);
        }
        (ExecutionUnit::new(self.root), self.errors)
    }

    fn push(&mut self, statement: Statement) {
        match self.stack.last_mut() {
            Some(open) => open.block.children.push(statement),
            None => self.root.push(statement),
        }
    }

    fn place(&mut self, mut statement: Statement, tokens: &[Token]) {
        if let Some(opened_by) = closer(tokens) {
            let line_number = statement.line_number;
            let column = statement.column.clone();
            match self.stack.last() {
                Some(open) if open.opener == opened_by => {
                    if let Some(mut open) = self.stack.pop() {
                        trace!(line = line_number, "closed {}", open.opener);
                        open.block.terminator = Some(Box::new(statement));
                        let statement = open.into_statement();
                        self.push(statement);
                    }
                }
                Some(open) => {
                    let msg = format!(
                        "EXPECTED {} FOR {} IN {}",
                        terminator_name(open.opener),
                        open.opener,
                        open.statement.line_number
                    );
                    self.errors
                        .push(error!(MismatchedBlockEnd, line_number, ..&column; msg));
                    statement.unmatched = true;
                    self.push(statement);
                }
                None => {
                    let msg = format!("{} WITHOUT {}", terminator_name(opened_by), opened_by);
                    self.errors
                        .push(error!(BlockEndWithoutStart, line_number, ..&column; msg));
                    statement.unmatched = true;
                    self.push(statement);
                }
            }
        } else if let Some((word, kind)) = opener(tokens) {
            trace!(line = statement.line_number, "opened {}", word);
            self.stack.push(OpenBlock {
                opener: word,
                statement,
                block: Block::new(kind),
            });
        } else {
            self.push(statement);
        }
    }

    fn statement(&mut self, line_number: LineNumber, tokens: &[Token]) -> Statement {
        let column = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => first.column().start..last.column().end,
            _ => 0..0,
        };
        let mut statement = Statement::new(line_number, column);
        let mut cursor = Cursor { tokens, pos: 0 };
        if let Some(first) = cursor.peek() {
            if let Some(keyword) = Keyword::from_kind(first.kind()) {
                cursor.next();
                statement.keyword = Some(KeywordExpression {
                    column: first.column(),
                    keyword,
                });
            }
        }
        let mut context = Context {
            open_file: statement.word() == Some(Word::Open),
            file_named: false,
        };
        let (expressions, _) = self.sequence(line_number, &mut cursor, &mut context, None);
        statement.expressions = expressions;
        statement
    }

    // Reads expressions until `end` is consumed or the tokens run out. The
    // flag reports whether `end` was found.
    fn sequence(
        &mut self,
        line_number: LineNumber,
        cursor: &mut Cursor,
        context: &mut Context,
        end: Option<Kind>,
    ) -> (Vec<Expression>, bool) {
        let mut items: Vec<Expression> = vec![];
        while let Some(token) = cursor.next() {
            let column = token.column();
            let expr = match token.kind() {
                Kind::BlockEndDelimiter | Kind::SizingEndDelimiter => {
                    if Some(*token.kind()) == end {
                        return (items, true);
                    }
                    let msg = format!("UNEXPECTED {}", token.text());
                    self.errors
                        .push(error!(UnbalancedDelimiter, line_number, ..&column; msg));
                    Expression::Error(column, token.text().to_string())
                }
                Kind::BlockStartDelimiter => self.group(
                    line_number,
                    cursor,
                    context,
                    column,
                    GroupDelimiter::Parenthesis,
                ),
                Kind::SizingStartDelimiter => {
                    self.group(line_number, cursor, context, column, GroupDelimiter::Sizing)
                }
                Kind::SeparatorDelimiter => {
                    Expression::Separator(column, token.text().chars().next().unwrap_or(','))
                }
                Kind::HandleDelimiter => self.handle(line_number, cursor, column),
                Kind::ReservedWord(Word::For) if context.open_file => {
                    match cursor.peek_word().and_then(FileMode::from_word) {
                        Some(mode) => {
                            cursor.next();
                            Expression::FileMode(FileModeExpression {
                                column: column.start..cursor.end(),
                                mode,
                                access: None,
                            })
                        }
                        None => keyword(token, column),
                    }
                }
                Kind::ReservedWord(Word::Access) if context.open_file => {
                    match access(cursor) {
                        Some(access) => match items.iter_mut().rev().find_map(|e| match e {
                            Expression::FileMode(mode) => Some(mode),
                            _ => None,
                        }) {
                            Some(mode) => {
                                mode.access = Some(access);
                                mode.column.end = cursor.end();
                                continue;
                            }
                            None => keyword(token, column),
                        },
                        None => keyword(token, column),
                    }
                }
                Kind::StringLiteral if context.open_file && !context.file_named => {
                    context.file_named = true;
                    Expression::FileName(FileNameExpression {
                        column,
                        name: token.text().to_string(),
                    })
                }
                Kind::IntegerLiteral | Kind::FloatingPointLiteral | Kind::StringLiteral => {
                    literal(token, column)
                }
                kind if kind.is_keyword() => keyword(token, column),
                kind if kind.operator().is_some() => match kind.operator() {
                    Some(operator) => Expression::Operator(OperatorExpression { column, operator }),
                    None => Expression::Error(column, token.text().to_string()),
                },
                Kind::UserDefinedItem => {
                    let key = self.table.lookup(token.text()).map(|d| d.key());
                    Expression::UserDefinedReference(UserDefinedReferenceExpression {
                        column,
                        name: token.text().to_string(),
                        key,
                    })
                }
                _ => Expression::Error(column, token.text().to_string()),
            };
            items.push(expr);
        }
        (items, end.is_none())
    }

    fn group(
        &mut self,
        line_number: LineNumber,
        cursor: &mut Cursor,
        context: &mut Context,
        column: Column,
        delimiter: GroupDelimiter,
    ) -> Expression {
        if self.depth >= MAX_NESTING {
            let (text, ok) = skip_nested(cursor, delimiter);
            let msg = format!("MORE THAN {} LEVELS", MAX_NESTING);
            self.errors
                .push(error!(NestingTooDeep, line_number, ..&column; msg));
            if !ok {
                let msg = format!("MISSING {}", delimiter.close());
                self.errors
                    .push(error!(UnbalancedDelimiter, line_number, ..&column; msg));
            }
            let column = column.start..cursor.end();
            return Expression::Error(column, text);
        }
        let end = match delimiter {
            GroupDelimiter::Parenthesis => Kind::BlockEndDelimiter,
            GroupDelimiter::Sizing => Kind::SizingEndDelimiter,
        };
        self.depth += 1;
        let (items, closed) = self.sequence(line_number, cursor, context, Some(end));
        self.depth -= 1;
        if !closed {
            let msg = format!("MISSING {}", delimiter.close());
            self.errors
                .push(error!(UnbalancedDelimiter, line_number, ..&column; msg));
        }
        Expression::Group(GroupExpression {
            column: column.start..cursor.end(),
            delimiter,
            arguments: arguments(items),
            closed,
        })
    }

    fn handle(&mut self, line_number: LineNumber, cursor: &mut Cursor, column: Column) -> Expression {
        if let Some(t) = cursor.peek() {
            if *t.kind() == Kind::IntegerLiteral {
                if let Ok(handle) = t.text().parse::<u32>() {
                    cursor.next();
                    return Expression::FileHandle(FileHandleExpression {
                        column: column.start..cursor.end(),
                        handle,
                    });
                }
            }
        }
        self.errors
            .push(error!(BadFileNumber, line_number, ..&column; "EXPECTED FILE NUMBER"));
        Expression::Error(column, "#".to_string())
    }
}

// Consumes the rest of an open group without building it, returning its
// text and whether the group closed before the tokens ran out.
fn skip_nested(cursor: &mut Cursor, delimiter: GroupDelimiter) -> (String, bool) {
    let mut text = delimiter.open().to_string();
    let mut depth = 1usize;
    while let Some(token) = cursor.next() {
        text.push_str(&token.to_string());
        match token.kind() {
            Kind::BlockStartDelimiter | Kind::SizingStartDelimiter => depth += 1,
            Kind::BlockEndDelimiter | Kind::SizingEndDelimiter => {
                depth -= 1;
                if depth == 0 {
                    return (text, true);
                }
            }
            _ => text.push(' '),
        }
    }
    (text, false)
}

fn keyword(token: &Token, column: Column) -> Expression {
    match Keyword::from_kind(token.kind()) {
        Some(keyword) => Expression::Keyword(KeywordExpression { column, keyword }),
        None => Expression::Error(column, token.text().to_string()),
    }
}

fn literal(token: &Token, column: Column) -> Expression {
    let value = match token.kind() {
        Kind::StringLiteral => Some(Literal::String(token.text().to_string())),
        Kind::IntegerLiteral => match token.text().parse::<i64>() {
            Ok(i) => Some(Literal::Integer(i)),
            Err(_) => token.text().parse::<f64>().ok().map(Literal::Float),
        },
        _ => token.text().parse::<f64>().ok().map(Literal::Float),
    };
    match value {
        Some(value) => Expression::Literal(LiteralExpression {
            column,
            value,
            text: token.text().to_string(),
        }),
        None => Expression::Error(column, token.text().to_string()),
    }
}

fn access(cursor: &mut Cursor) -> Option<FileAccess> {
    let access = match cursor.peek_word()? {
        Word::Read => {
            cursor.next();
            if cursor.peek_word() == Some(Word::Write) {
                cursor.next();
                FileAccess::ReadWrite
            } else {
                FileAccess::Read
            }
        }
        Word::Write => {
            cursor.next();
            FileAccess::Write
        }
        _ => return None,
    };
    Some(access)
}

fn arguments(items: Vec<Expression>) -> Vec<Vec<Expression>> {
    if items.is_empty() {
        return vec![];
    }
    let mut arguments = vec![vec![]];
    for item in items {
        match item {
            Expression::Separator(..) => arguments.push(vec![]),
            item => {
                if let Some(last) = arguments.last_mut() {
                    last.push(item);
                }
            }
        }
    }
    arguments
}
