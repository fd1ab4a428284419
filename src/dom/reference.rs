use crate::lang::LineNumber;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Procedure,
    Function,
    Variable,
}

impl DeclarationKind {
    pub fn scope(self) -> Scope {
        match self {
            DeclarationKind::Procedure | DeclarationKind::Function => Scope::Routine,
            DeclarationKind::Variable => Scope::Variable,
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DeclarationKind::Procedure => write!(f, "PROCEDURE"),
            DeclarationKind::Function => write!(f, "FUNCTION"),
            DeclarationKind::Variable => write!(f, "VARIABLE"),
        }
    }
}

/// Procedures and functions share one namespace, variables another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Routine,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    scope: Scope,
    name: String,
}

impl ReferenceKey {
    pub fn new(scope: Scope, name: &str) -> ReferenceKey {
        ReferenceKey {
            scope,
            name: name.to_ascii_uppercase(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub line_index: usize,
    pub line_number: LineNumber,
    pub end_index: Option<usize>,
    pub end_line_number: Option<LineNumber>,
    pub parameters: Vec<String>,
}

impl Declaration {
    pub fn new(
        name: &str,
        kind: DeclarationKind,
        line_index: usize,
        line_number: LineNumber,
    ) -> Declaration {
        Declaration {
            name: name.to_string(),
            kind,
            line_index,
            line_number,
            end_index: None,
            end_line_number: None,
            parameters: vec![],
        }
    }

    pub fn key(&self) -> ReferenceKey {
        ReferenceKey::new(self.kind.scope(), &self.name)
    }

    pub fn is_closed(&self) -> bool {
        self.end_index.is_some()
    }
}

/// User declarations in first-seen order, indexed by case-insensitive key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserReferenceTable {
    declarations: Vec<Declaration>,
    index: HashMap<ReferenceKey, usize>,
}

impl UserReferenceTable {
    pub fn new() -> UserReferenceTable {
        UserReferenceTable::default()
    }

    /// Inserts or overwrites. The overwritten declaration is returned.
    pub fn declare(&mut self, declaration: Declaration) -> Option<Declaration> {
        let key = declaration.key();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.declarations[i], declaration)),
            None => {
                self.index.insert(key, self.declarations.len());
                self.declarations.push(declaration);
                None
            }
        }
    }

    pub fn get(&self, key: &ReferenceKey) -> Option<&Declaration> {
        self.index.get(key).map(|&i| &self.declarations[i])
    }

    pub fn close(&mut self, key: &ReferenceKey, end_index: usize, end_line: LineNumber) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                let declaration = &mut self.declarations[i];
                declaration.end_index = Some(end_index);
                declaration.end_line_number = Some(end_line);
                true
            }
            None => false,
        }
    }

    /// Routines shadow variables of the same name.
    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.get(&ReferenceKey::new(Scope::Routine, name))
            .or_else(|| self.get(&ReferenceKey::new(Scope::Variable, name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn is_parameter(&self, name: &str) -> bool {
        self.declarations
            .iter()
            .any(|d| d.parameters.iter().any(|p| p.eq_ignore_ascii_case(name)))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut table = UserReferenceTable::new();
        table.declare(Declaration::new("Total", DeclarationKind::Variable, 0, 1));
        let found = table.lookup("TOTAL").unwrap();
        assert_eq!(found.name, "Total");
        assert!(table.contains("total"));
        assert!(!table.contains("count"));
    }

    #[test]
    fn test_redeclare_overwrites() {
        let mut table = UserReferenceTable::new();
        assert!(table
            .declare(Declaration::new("Foo", DeclarationKind::Procedure, 0, 1))
            .is_none());
        let old = table.declare(Declaration::new("FOO", DeclarationKind::Function, 5, 9));
        assert_eq!(old.map(|d| d.line_index), Some(0));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("foo").unwrap().kind, DeclarationKind::Function);
    }

    #[test]
    fn test_scopes_are_separate() {
        let mut table = UserReferenceTable::new();
        table.declare(Declaration::new("Area", DeclarationKind::Function, 0, 1));
        table.declare(Declaration::new("Area", DeclarationKind::Variable, 3, 4));
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("area").unwrap().kind, DeclarationKind::Function);
        let key = ReferenceKey::new(Scope::Variable, "AREA");
        assert_eq!(table.get(&key).unwrap().line_index, 3);
    }
}
