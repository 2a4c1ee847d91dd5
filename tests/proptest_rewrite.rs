//! Property-based tests with proptest.
//!
//! Inputs are drawn from an alphabet rich in the characters the lexer cares
//! about (quotes, colons, backslashes, `e`), so unterminated literals, casts
//! and empty placeholder names all show up regularly.

use std::collections::HashSet;

use proptest::prelude::*;
use sqlx_named_sql::lexer::{tokenize, Token};
use sqlx_named_sql::splitter::split_config_and_sql;
use sqlx_named_sql::{build_query, QuerySource};

/// SQL-ish text that may contain placeholders, casts and literals.
fn sql_text() -> impl Strategy<Value = String> {
    "[a-cxyE_0-9 :'\"\\\\$(),=e\n]{0,60}".prop_map(|s| s)
}

/// SQL-ish text without any colon.
fn colon_free_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 '\"\\\\$(),=*;\n\t]{0,60}".prop_map(|s| s)
}

proptest! {
    #[test]
    fn colon_free_sql_is_unchanged(input in colon_free_text()) {
        let rewritten = build_query(&input).unwrap();
        prop_assert_eq!(rewritten.sql, input.trim());
        prop_assert!(rewritten.parameters.is_empty());
    }

    #[test]
    fn ordinals_are_contiguous(input in sql_text()) {
        let rewritten = build_query(&input).unwrap();

        let mut ordinals: Vec<u16> = rewritten.parameters.iter().map(|p| p.ordinal).collect();
        ordinals.sort_unstable();
        let expected: Vec<u16> = (1..).take(ordinals.len()).collect();
        prop_assert_eq!(ordinals, expected);

        let names: HashSet<&str> = rewritten.parameters.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(names.len(), rewritten.parameters.len());
    }

    #[test]
    fn parameters_match_distinct_placeholder_tokens(input in sql_text()) {
        let trimmed = input.trim();
        let mut seen = Vec::new();
        for token in tokenize(trimmed).tokens {
            if let Token::Placeholder(name) = token {
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }

        let rewritten = build_query(&input).unwrap();
        let names: Vec<&str> = rewritten.parameters.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(names, seen);
    }

    #[test]
    fn rewriting_is_idempotent(input in sql_text()) {
        let first = build_query(&input).unwrap();
        let second = build_query(&first.sql).unwrap();
        prop_assert_eq!(&second.sql, &first.sql);
        prop_assert!(second.parameters.is_empty());
    }

    #[test]
    fn tokens_reconstruct_input(input in sql_text()) {
        let mut rebuilt = String::new();
        for token in tokenize(&input).tokens {
            match token {
                Token::Literal(text) => rebuilt.push_str(text),
                Token::Placeholder(name) => {
                    rebuilt.push(':');
                    rebuilt.push_str(name);
                }
            }
        }
        prop_assert_eq!(rebuilt, input);
    }

    #[test]
    fn config_block_position_is_irrelevant(
        before in colon_free_text(),
        after in colon_free_text(),
        name in "[A-Z][A-Za-z0-9]{0,12}",
    ) {
        let block = format!("/* pgxsql\nname = \"{name}\"\npgxsql */");
        let (config, sql) = split_config_and_sql(&format!("{before}{block}{after}"));
        prop_assert_eq!(config, format!("name = \"{name}\""));
        let surrounding = format!("{before}{after}");
        prop_assert_eq!(sql, surrounding.trim());

        let source = QuerySource::parse(&format!("{block}\n{before}")).unwrap();
        prop_assert_eq!(source.name, name);
    }
}
