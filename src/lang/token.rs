use super::Column;
use std::collections::HashMap;
use std::sync::LazyLock;

static STRING_TO_KIND: LazyLock<HashMap<&'static str, Kind>> = LazyLock::new(|| {
    Word::ALL
        .iter()
        .map(|w| (w.name(), Kind::ReservedWord(*w)))
        .chain(DataType::ALL.iter().map(|d| (d.name(), Kind::DataTypeName(*d))))
        .chain(Function::ALL.iter().map(|f| (f.name(), Kind::ReservedFunction(*f))))
        .chain(Operator::ALL.iter().map(|o| (o.name(), o.kind())))
        .collect()
});

/// Classification of a token. Operator and keyword classes carry the
/// specific entry of the vocabulary they matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Unknown,
    Error,
    ReservedWord(Word),
    DataTypeName(DataType),
    ReservedFunction(Function),
    UserDefinedItem,
    IntegerLiteral,
    FloatingPointLiteral,
    StringLiteral,
    ArithmeticOperator(Operator),
    AssignmentOperator(Operator),
    ComparisonOperator(Operator),
    LogicalOperator(Operator),
    BitwiseOperator(Operator),
    IncrementOperator,
    DecrementOperator,
    BlockStartDelimiter,
    BlockEndDelimiter,
    ExpressionEndDelimiter,
    SeparatorDelimiter,
    SizingStartDelimiter,
    SizingEndDelimiter,
    StringDelimiter,
    HandleDelimiter,
}

impl Kind {
    pub fn from_string(s: &str) -> Option<Kind> {
        STRING_TO_KIND.get(s.to_ascii_uppercase().as_str()).copied()
    }

    pub fn for_delimiter(ch: char) -> Option<Kind> {
        use Kind::*;
        match ch {
            '(' => Some(BlockStartDelimiter),
            ')' => Some(BlockEndDelimiter),
            ':' => Some(ExpressionEndDelimiter),
            ',' | ';' => Some(SeparatorDelimiter),
            '[' => Some(SizingStartDelimiter),
            ']' => Some(SizingEndDelimiter),
            '"' => Some(StringDelimiter),
            '#' => Some(HandleDelimiter),
            _ => None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Kind::ReservedWord(_) | Kind::DataTypeName(_) | Kind::ReservedFunction(_)
        )
    }

    pub fn operator(&self) -> Option<Operator> {
        use Kind::*;
        match self {
            ArithmeticOperator(op)
            | AssignmentOperator(op)
            | ComparisonOperator(op)
            | LogicalOperator(op)
            | BitwiseOperator(op) => Some(*op),
            IncrementOperator => Some(Operator::Increment),
            DecrementOperator => Some(Operator::Decrement),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Token {
    kind: Kind,
    text: Option<String>,
    column: Column,
}

impl Token {
    pub fn new(kind: Kind, text: &str, column: Column) -> Token {
        Token {
            kind,
            text: Some(text.to_string()),
            column,
        }
    }

    pub fn synthetic(kind: Kind) -> Token {
        Token {
            kind,
            text: None,
            column: 0..0,
        }
    }

    pub fn from_string(s: &str) -> Option<Token> {
        Kind::from_string(s).map(|kind| Token {
            kind,
            text: Some(s.to_string()),
            column: 0..s.chars().count(),
        })
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    pub fn is_error(&self) -> bool {
        self.kind == Kind::Error
    }

    pub fn is_word(&self, word: Word) -> bool {
        self.kind == Kind::ReservedWord(word)
    }

    pub fn word(&self) -> Option<Word> {
        match self.kind {
            Kind::ReservedWord(w) => Some(w),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?} {:?})", self.kind, self.text(), self.column)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            Kind::StringLiteral => write!(f, "\"{}\"", self.text().replace('"', "\"\"")),
            _ => write!(f, "{}", self.text()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Word {
    Access,
    Append,
    As,
    Binary,
    Call,
    Close,
    Dim,
    Do,
    Else,
    ElseIf,
    End,
    EndIf,
    Exit,
    For,
    Function,
    Gosub,
    Goto,
    If,
    Input,
    Let,
    Loop,
    Next,
    Open,
    Output,
    Print,
    Procedure,
    Random,
    Read,
    Return,
    Step,
    Then,
    To,
    Until,
    Wend,
    While,
    Write,
}

impl Word {
    pub const ALL: &'static [Word] = &[
        Word::Access,
        Word::Append,
        Word::As,
        Word::Binary,
        Word::Call,
        Word::Close,
        Word::Dim,
        Word::Do,
        Word::Else,
        Word::ElseIf,
        Word::End,
        Word::EndIf,
        Word::Exit,
        Word::For,
        Word::Function,
        Word::Gosub,
        Word::Goto,
        Word::If,
        Word::Input,
        Word::Let,
        Word::Loop,
        Word::Next,
        Word::Open,
        Word::Output,
        Word::Print,
        Word::Procedure,
        Word::Random,
        Word::Read,
        Word::Return,
        Word::Step,
        Word::Then,
        Word::To,
        Word::Until,
        Word::Wend,
        Word::While,
        Word::Write,
    ];

    pub fn name(&self) -> &'static str {
        use Word::*;
        match self {
            Access => "ACCESS",
            Append => "APPEND",
            As => "AS",
            Binary => "BINARY",
            Call => "CALL",
            Close => "CLOSE",
            Dim => "DIM",
            Do => "DO",
            Else => "ELSE",
            ElseIf => "ELSEIF",
            End => "END",
            EndIf => "ENDIF",
            Exit => "EXIT",
            For => "FOR",
            Function => "FUNCTION",
            Gosub => "GOSUB",
            Goto => "GOTO",
            If => "IF",
            Input => "INPUT",
            Let => "LET",
            Loop => "LOOP",
            Next => "NEXT",
            Open => "OPEN",
            Output => "OUTPUT",
            Print => "PRINT",
            Procedure => "PROCEDURE",
            Random => "RANDOM",
            Read => "READ",
            Return => "RETURN",
            Step => "STEP",
            Then => "THEN",
            To => "TO",
            Until => "UNTIL",
            Wend => "WEND",
            While => "WHILE",
            Write => "WRITE",
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Double,
    Integer,
    Long,
    Single,
    String,
}

impl DataType {
    pub const ALL: &'static [DataType] = &[
        DataType::Boolean,
        DataType::Double,
        DataType::Integer,
        DataType::Long,
        DataType::Single,
        DataType::String,
    ];

    pub fn name(&self) -> &'static str {
        use DataType::*;
        match self {
            Boolean => "BOOLEAN",
            Double => "DOUBLE",
            Integer => "INTEGER",
            Long => "LONG",
            Single => "SINGLE",
            String => "STRING",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Abs,
    Asc,
    Chr,
    Cos,
    Eof,
    Int,
    Left,
    Len,
    Mid,
    Right,
    Rnd,
    Sin,
    Sqr,
    Str,
    Tan,
    Val,
}

impl Function {
    pub const ALL: &'static [Function] = &[
        Function::Abs,
        Function::Asc,
        Function::Chr,
        Function::Cos,
        Function::Eof,
        Function::Int,
        Function::Left,
        Function::Len,
        Function::Mid,
        Function::Right,
        Function::Rnd,
        Function::Sin,
        Function::Sqr,
        Function::Str,
        Function::Tan,
        Function::Val,
    ];

    pub fn name(&self) -> &'static str {
        use Function::*;
        match self {
            Abs => "ABS",
            Asc => "ASC",
            Chr => "CHR$",
            Cos => "COS",
            Eof => "EOF",
            Int => "INT",
            Left => "LEFT$",
            Len => "LEN",
            Mid => "MID$",
            Right => "RIGHT$",
            Rnd => "RND",
            Sin => "SIN",
            Sqr => "SQR",
            Str => "STR$",
            Tan => "TAN",
            Val => "VAL",
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    DivideInt,
    Modulus,
    Plus,
    Minus,
    Assign,
    PlusAssign,
    MinusAssign,
    MultiplyAssign,
    DivideAssign,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
    Xor,
    BitAnd,
    BitOr,
    BitNot,
    ShiftLeft,
    ShiftRight,
    Increment,
    Decrement,
}

impl Operator {
    pub const ALL: &'static [Operator] = &[
        Operator::Caret,
        Operator::Multiply,
        Operator::Divide,
        Operator::DivideInt,
        Operator::Modulus,
        Operator::Plus,
        Operator::Minus,
        Operator::Assign,
        Operator::PlusAssign,
        Operator::MinusAssign,
        Operator::MultiplyAssign,
        Operator::DivideAssign,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::BitAnd,
        Operator::BitOr,
        Operator::BitNot,
        Operator::ShiftLeft,
        Operator::ShiftRight,
        Operator::Increment,
        Operator::Decrement,
    ];

    pub fn name(&self) -> &'static str {
        use Operator::*;
        match self {
            Caret => "^",
            Multiply => "*",
            Divide => "/",
            DivideInt => "\\",
            Modulus => "MOD",
            Plus => "+",
            Minus => "-",
            Assign => "=",
            PlusAssign => "+=",
            MinusAssign => "-=",
            MultiplyAssign => "*=",
            DivideAssign => "/=",
            Equal => "==",
            NotEqual => "<>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Not => "NOT",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            BitAnd => "&",
            BitOr => "|",
            BitNot => "~",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            Increment => "++",
            Decrement => "--",
        }
    }

    pub fn kind(&self) -> Kind {
        use Operator::*;
        match self {
            Caret | Multiply | Divide | DivideInt | Modulus | Plus | Minus => {
                Kind::ArithmeticOperator(*self)
            }
            Assign | PlusAssign | MinusAssign | MultiplyAssign | DivideAssign => {
                Kind::AssignmentOperator(*self)
            }
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Kind::ComparisonOperator(*self)
            }
            Not | And | Or | Xor => Kind::LogicalOperator(*self),
            BitAnd | BitOr | BitNot | ShiftLeft | ShiftRight => Kind::BitwiseOperator(*self),
            Increment => Kind::IncrementOperator,
            Decrement => Kind::DecrementOperator,
        }
    }

    pub fn is_reserved_word(&self) -> bool {
        self.name().chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
