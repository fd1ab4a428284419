use super::{Column, LineNumber};

#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn is_fatal(&self) -> bool {
        self.code.kind() == ErrorKind::IoFailure
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn in_column(self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self
        }
    }

    pub fn message(self, message: impl Into<String>) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

/// The four failure classes a parse pass can report.
///
/// Only `IoFailure` aborts a pass. Everything else is recovered locally and
/// reported next to a best-effort result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IoFailure,
    TokenizationError,
    StructuralParseError,
    DuplicateDeclaration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorCode {
    #[error("DISK I/O ERROR")]
    IoFailure = 57,
    #[error("INTERRUPTED")]
    Interrupted = 70,
    #[error("SYNTAX ERROR")]
    TokenizationError = 2,
    #[error("UNCLOSED BLOCK")]
    UnclosedBlock = 26,
    #[error("BLOCK END WITHOUT START")]
    BlockEndWithoutStart = 1,
    #[error("MISMATCHED BLOCK END")]
    MismatchedBlockEnd = 30,
    #[error("UNBALANCED DELIMITER")]
    UnbalancedDelimiter = 22,
    #[error("MISSING IDENTIFIER")]
    MissingIdentifier = 18,
    #[error("BAD FILE NUMBER")]
    BadFileNumber = 52,
    #[error("NESTING TOO DEEP")]
    NestingTooDeep = 7,
    #[error("DUPLICATE DEFINITION")]
    DuplicateDeclaration = 10,
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            IoFailure | Interrupted => ErrorKind::IoFailure,
            TokenizationError => ErrorKind::TokenizationError,
            UnclosedBlock | BlockEndWithoutStart | MismatchedBlockEnd | UnbalancedDelimiter
            | MissingIdentifier | BadFileNumber | NestingTooDeep => {
                ErrorKind::StructuralParseError
            }
            DuplicateDeclaration => ErrorKind::DuplicateDeclaration,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if self.line_number.is_some() || (0..0) != self.column {
            write!(f, " IN")?;
            if let Some(line_number) = self.line_number {
                write!(f, " {}", line_number)?;
            }
            if (0..0) != self.column {
                write!(f, " ({}..{})", self.column.start, self.column.end)?;
            }
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
