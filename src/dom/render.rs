use super::ast::*;
use crate::lang::token::Operator;

/// How nested statements are indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Default for Indent {
    fn default() -> Indent {
        Indent::Spaces(4)
    }
}

/// Regenerates canonical source text from a code-DOM.
#[derive(Debug, Clone, Copy, Default)]
pub struct Listing {
    indent: Indent,
}

impl Listing {
    pub fn new(indent: Indent) -> Listing {
        Listing { indent }
    }

    pub fn render(&self, unit: &ExecutionUnit) -> String {
        let mut out = String::new();
        for statement in &unit.statements {
            self.statement(&mut out, statement, 0);
        }
        out
    }

    pub fn statement(&self, out: &mut String, statement: &Statement, depth: usize) {
        self.pad(out, depth);
        out.push_str(&statement_text(statement));
        out.push('\n');
        if let Some(block) = &statement.block {
            for child in &block.children {
                self.statement(out, child, depth + 1);
            }
            if let Some(terminator) = &block.terminator {
                self.statement(out, terminator, depth);
            }
        }
    }

    fn pad(&self, out: &mut String, depth: usize) {
        match self.indent {
            Indent::Spaces(n) => out.extend(std::iter::repeat(' ').take(n * depth)),
            Indent::Tab => out.extend(std::iter::repeat('\t').take(depth)),
        }
    }
}

pub fn statement_text(statement: &Statement) -> String {
    let mut s = String::new();
    if let Some(keyword) = &statement.keyword {
        s.push_str(&keyword.keyword.to_string());
    }
    let body = sequence_text(&statement.expressions);
    if !body.is_empty() {
        if !s.is_empty() {
            s.push(' ');
        }
        s.push_str(&body);
    }
    s
}

fn sequence_text(items: &[Expression]) -> String {
    let mut s = String::new();
    let mut previous: Option<&Expression> = None;
    for item in items {
        if previous.is_some() && spaced(previous, item) {
            s.push(' ');
        }
        s.push_str(&expression_text(item));
        previous = Some(item);
    }
    s
}

// Calls, subscripts, separators and postfix steps sit tight against what
// precedes them.
fn spaced(previous: Option<&Expression>, item: &Expression) -> bool {
    let applies = matches!(
        previous,
        Some(Expression::UserDefinedReference(_))
            | Some(Expression::Keyword(KeywordExpression {
                keyword: Keyword::Function(_),
                ..
            }))
    );
    match item {
        Expression::Separator(..) => false,
        Expression::Group(_) => !applies,
        Expression::Operator(OperatorExpression {
            operator: Operator::Increment | Operator::Decrement,
            ..
        }) => !applies,
        _ => true,
    }
}

pub fn expression_text(expr: &Expression) -> String {
    match expr {
        Expression::Keyword(k) => k.keyword.to_string(),
        Expression::FileHandle(h) => format!("#{}", h.handle),
        Expression::FileMode(m) => match m.access {
            Some(access) => format!("FOR {} ACCESS {}", m.mode, access),
            None => format!("FOR {}", m.mode),
        },
        Expression::FileName(n) => quote(&n.name),
        Expression::Literal(l) => match &l.value {
            Literal::String(s) => quote(s),
            Literal::Integer(_) | Literal::Float(_) => l.text.clone(),
        },
        Expression::Operator(o) => o.operator.to_string(),
        Expression::UserDefinedReference(r) => r.name.clone(),
        Expression::Group(g) => {
            let args: Vec<String> = g.arguments.iter().map(|a| sequence_text(a)).collect();
            let mut s = String::new();
            s.push(g.delimiter.open());
            s.push_str(&args.join(", "));
            if g.closed {
                s.push(g.delimiter.close());
            }
            s
        }
        Expression::Separator(_, c) => c.to_string(),
        Expression::Error(_, text) => text.clone(),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_policies() {
        let mut outer = Statement::new(1, 0..0);
        outer.keyword = Some(KeywordExpression {
            column: 0..2,
            keyword: Keyword::Word(crate::lang::token::Word::Do),
        });
        let mut block = Block::new(BlockType::Loop);
        block.children.push(Statement::new(2, 0..0));
        outer.block = Some(block);
        let unit = ExecutionUnit::new(vec![outer]);
        assert_eq!(Listing::new(Indent::Spaces(2)).render(&unit), "DO\n  \n");
        assert_eq!(Listing::new(Indent::Tab).render(&unit), "DO\n\t\n");
    }
}
