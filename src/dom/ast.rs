use super::reference::ReferenceKey;
use crate::lang::token::{DataType, Function, Kind, Operator, Word};
use crate::lang::{Column, LineNumber};

/// Root of a parsed program. Statement order is execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionUnit {
    pub statements: Vec<Statement>,
}

impl ExecutionUnit {
    pub fn new(statements: Vec<Statement>) -> ExecutionUnit {
        ExecutionUnit { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    If,
    Procedure,
    Function,
    Loop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub line_number: LineNumber,
    pub column: Column,
    pub keyword: Option<KeywordExpression>,
    pub expressions: Vec<Expression>,
    pub block: Option<Block>,
    /// A block terminator with no matching opener.
    pub unmatched: bool,
}

impl Statement {
    pub fn new(line_number: LineNumber, column: Column) -> Statement {
        Statement {
            line_number,
            column,
            keyword: None,
            expressions: vec![],
            block: None,
            unmatched: false,
        }
    }

    pub fn word(&self) -> Option<Word> {
        match &self.keyword {
            Some(KeywordExpression {
                keyword: Keyword::Word(word),
                ..
            }) => Some(*word),
            _ => None,
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.block.as_ref().map(|b| b.kind)
    }

    pub fn children(&self) -> &[Statement] {
        match &self.block {
            Some(block) => &block.children,
            None => &[],
        }
    }

    pub fn is_unclosed(&self) -> bool {
        match &self.block {
            Some(block) => !block.is_closed(),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockType,
    pub children: Vec<Statement>,
    pub terminator: Option<Box<Statement>>,
}

impl Block {
    pub fn new(kind: BlockType) -> Block {
        Block {
            kind,
            children: vec![],
            terminator: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.terminator.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Word(Word),
    DataType(DataType),
    Function(Function),
}

impl Keyword {
    pub fn from_kind(kind: &Kind) -> Option<Keyword> {
        match kind {
            Kind::ReservedWord(w) => Some(Keyword::Word(*w)),
            Kind::DataTypeName(d) => Some(Keyword::DataType(*d)),
            Kind::ReservedFunction(f) => Some(Keyword::Function(*f)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Keyword::Word(w) => write!(f, "{}", w),
            Keyword::DataType(d) => write!(f, "{}", d),
            Keyword::Function(func) => write!(f, "{}", func),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordExpression {
    pub column: Column,
    pub keyword: Keyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileHandleExpression {
    pub column: Column,
    pub handle: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Input,
    Output,
    Append,
    Binary,
    Random,
}

impl FileMode {
    pub fn from_word(word: Word) -> Option<FileMode> {
        match word {
            Word::Input => Some(FileMode::Input),
            Word::Output => Some(FileMode::Output),
            Word::Append => Some(FileMode::Append),
            Word::Binary => Some(FileMode::Binary),
            Word::Random => Some(FileMode::Random),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use FileMode::*;
        match self {
            Input => write!(f, "INPUT"),
            Output => write!(f, "OUTPUT"),
            Append => write!(f, "APPEND"),
            Binary => write!(f, "BINARY"),
            Random => write!(f, "RANDOM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    Read,
    Write,
    ReadWrite,
}

impl std::fmt::Display for FileAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FileAccess::Read => write!(f, "READ"),
            FileAccess::Write => write!(f, "WRITE"),
            FileAccess::ReadWrite => write!(f, "READ WRITE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileModeExpression {
    pub column: Column,
    pub mode: FileMode,
    pub access: Option<FileAccess>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileNameExpression {
    pub column: Column,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpression {
    pub column: Column,
    pub value: Literal,
    /// Spelling in the source. String literals hold their content.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorExpression {
    pub column: Column,
    pub operator: Operator,
}

/// A user-defined name. `key` points into the reference table when the
/// name was declared somewhere in the program.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDefinedReferenceExpression {
    pub column: Column,
    pub name: String,
    pub key: Option<ReferenceKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDelimiter {
    Parenthesis,
    Sizing,
}

impl GroupDelimiter {
    pub fn open(&self) -> char {
        match self {
            GroupDelimiter::Parenthesis => '(',
            GroupDelimiter::Sizing => '[',
        }
    }

    pub fn close(&self) -> char {
        match self {
            GroupDelimiter::Parenthesis => ')',
            GroupDelimiter::Sizing => ']',
        }
    }
}

/// Argument list or sizing clause. Each argument is the run of expressions
/// between separators.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpression {
    pub column: Column,
    pub delimiter: GroupDelimiter,
    pub arguments: Vec<Vec<Expression>>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Keyword(KeywordExpression),
    FileHandle(FileHandleExpression),
    FileMode(FileModeExpression),
    FileName(FileNameExpression),
    Literal(LiteralExpression),
    Operator(OperatorExpression),
    UserDefinedReference(UserDefinedReferenceExpression),
    Group(GroupExpression),
    Separator(Column, char),
    Error(Column, String),
}

impl Expression {
    pub fn column(&self) -> Column {
        match self {
            Expression::Keyword(e) => e.column.clone(),
            Expression::FileHandle(e) => e.column.clone(),
            Expression::FileMode(e) => e.column.clone(),
            Expression::FileName(e) => e.column.clone(),
            Expression::Literal(e) => e.column.clone(),
            Expression::Operator(e) => e.column.clone(),
            Expression::UserDefinedReference(e) => e.column.clone(),
            Expression::Group(e) => e.column.clone(),
            Expression::Separator(col, _) | Expression::Error(col, _) => col.clone(),
        }
    }

    pub fn is_word(&self, word: Word) -> bool {
        matches!(
            self,
            Expression::Keyword(KeywordExpression {
                keyword: Keyword::Word(w),
                ..
            }) if *w == word
        )
    }
}

pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_keyword(&mut self, _: &KeywordExpression) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for ExecutionUnit {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        for statement in &self.statements {
            statement.accept(visitor);
        }
    }
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        if let Some(keyword) = &self.keyword {
            visitor.visit_keyword(keyword);
        }
        for expr in &self.expressions {
            expr.accept(visitor);
        }
        if let Some(block) = &self.block {
            for stmt in &block.children {
                stmt.accept(visitor);
            }
            if let Some(terminator) = &block.terminator {
                terminator.accept(visitor);
            }
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        match self {
            Expression::Keyword(keyword) => visitor.visit_keyword(keyword),
            Expression::Group(group) => {
                for argument in &group.arguments {
                    for expr in argument {
                        expr.accept(visitor);
                    }
                }
            }
            _ => {}
        }
        visitor.visit_expression(self)
    }
}
