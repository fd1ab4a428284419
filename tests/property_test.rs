use codedom::dom::ParserWorker;
use codedom::lang::token::Kind;
use codedom::lang::{preprocess_line, tokenize_line};
use proptest::prelude::*;

proptest! {
    #[test]
    fn integer_literals_lex_whole(n in 0u64..u64::MAX) {
        let text = n.to_string();
        let tokens = tokenize_line(&text);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(*tokens[0].kind(), Kind::IntegerLiteral);
        prop_assert_eq!(tokens[0].text(), text.as_str());
    }

    #[test]
    fn float_literals_lex_whole(a in 0u32..100_000, b in 0u32..100_000) {
        let text = format!("{}.{}", a, b);
        let tokens = tokenize_line(&text);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(*tokens[0].kind(), Kind::FloatingPointLiteral);
    }

    #[test]
    fn preprocess_is_idempotent(line in "[ -~]{0,40}") {
        if let Some(once) = preprocess_line(&line) {
            prop_assert_eq!(preprocess_line(&once), Some(once.clone()));
        }
    }

    #[test]
    fn columns_stay_in_line(line in "[ -~]{0,40}") {
        let width = line.chars().count();
        for token in tokenize_line(&line) {
            let column = token.column();
            prop_assert!(column.start < column.end);
            prop_assert!(column.end <= width);
        }
    }

    #[test]
    fn parse_never_fatal_for_text(source in "[ -~\n]{0,200}") {
        let parse = ParserWorker::new().parse_str(&source);
        prop_assert!(!parse.is_fatal());
    }
}
