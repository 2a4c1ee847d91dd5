/// Opening marker of the embedded configuration block.
pub const BLOCK_OPEN: &str = "/* pgxsql";

/// Closing marker of the embedded configuration block.
pub const BLOCK_CLOSE: &str = "pgxsql */";

/// Separates the embedded configuration block from the SQL around it.
///
/// The block is a reserved comment, `/* pgxsql ... pgxsql */`, whose body is
/// configuration text. Everything outside the block is SQL, kept in its
/// original order. Both halves are returned trimmed.
///
/// An opening marker without a matching closing marker is not a block and is
/// left in the SQL. When several blocks are present, all of them are removed
/// and their bodies are joined with a newline in order of appearance.
///
/// # Examples
///
/// ```
/// use sqlx_named_sql::splitter::split_config_and_sql;
///
/// let (config, sql) = split_config_and_sql("/* pgxsql\nname = \"One\"\npgxsql */\nselect 1;");
/// assert_eq!(config, "name = \"One\"");
/// assert_eq!(sql, "select 1;");
/// ```
pub fn split_config_and_sql(document: &str) -> (String, String) {
    let mut config = String::new();
    let mut sql = String::with_capacity(document.len());
    let mut rest = document;

    while let Some((before, body, after)) = next_block(rest) {
        sql.push_str(before);
        if !config.is_empty() {
            config.push('\n');
        }
        config.push_str(body);
        rest = after;
    }
    sql.push_str(rest);

    (config.trim().to_owned(), sql.trim().to_owned())
}

/// Finds the first complete block in `text`, returning the text before it,
/// its body, and the text after it.
fn next_block(text: &str) -> Option<(&str, &str, &str)> {
    let open = text.find(BLOCK_OPEN)?;
    let body_start = open + BLOCK_OPEN.len();
    // The body holds at least one character, so the markers never overlap.
    let close_from = body_start + text[body_start..].chars().next()?.len_utf8();
    // No close after the first opening marker means none after a later one.
    let close = close_from + text[close_from..].find(BLOCK_CLOSE)?;
    Some((
        &text[..open],
        &text[body_start..close],
        &text[close + BLOCK_CLOSE.len()..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_block_before_sql() {
        let (config, sql) = split_config_and_sql(
            "/* pgxsql\npackage = \"main\"\nname = \"GetSomething\"\npgxsql */\n\nselect 1;\n",
        );
        assert_eq!(config, "package = \"main\"\nname = \"GetSomething\"");
        assert_eq!(sql, "select 1;");
    }

    #[test]
    fn test_split_block_after_sql() {
        let (config, sql) =
            split_config_and_sql("select 1;\n/* pgxsql\nname = \"GetSomething\"\npgxsql */\n");
        assert_eq!(config, "name = \"GetSomething\"");
        assert_eq!(sql, "select 1;");
    }

    #[test]
    fn test_split_block_in_middle_keeps_order() {
        let (config, sql) =
            split_config_and_sql("select a\n/* pgxsql\nname = \"X\"\npgxsql */\nfrom t;");
        assert_eq!(config, "name = \"X\"");
        assert_eq!(sql, "select a\n\nfrom t;");
    }

    #[test]
    fn test_split_no_block() {
        let (config, sql) = split_config_and_sql("  select 1;\n");
        assert_eq!(config, "");
        assert_eq!(sql, "select 1;");
    }

    #[test]
    fn test_split_unclosed_block_is_sql() {
        let (config, sql) = split_config_and_sql("/* pgxsql name = \"X\"\nselect 1;");
        assert_eq!(config, "");
        assert_eq!(sql, "/* pgxsql name = \"X\"\nselect 1;");
    }

    #[test]
    fn test_split_many_unclosed_markers() {
        let document = "/* pgxsql ".repeat(40_000);
        let (config, sql) = split_config_and_sql(&document);
        assert_eq!(config, "");
        assert_eq!(sql, document.trim());
    }

    #[test]
    fn test_split_unclosed_marker_before_block() {
        let (config, sql) =
            split_config_and_sql("select 1; /* pgxsql x /* pgxsql\nname = \"A\"\npgxsql */");
        assert_eq!(config, "x /* pgxsql\nname = \"A\"");
        assert_eq!(sql, "select 1;");
    }

    #[test]
    fn test_split_empty_body_is_not_a_block() {
        let (config, sql) = split_config_and_sql("/* pgxsqlpgxsql */ select 1;");
        assert_eq!(config, "");
        assert_eq!(sql, "/* pgxsqlpgxsql */ select 1;");
    }

    #[test]
    fn test_split_multiple_blocks_merge_in_order() {
        let (config, sql) = split_config_and_sql(
            "/* pgxsql\npackage = \"main\"\npgxsql */\nselect 1;\n/* pgxsql\nname = \"Two\"\npgxsql */",
        );
        assert_eq!(config, "package = \"main\"\n\n\nname = \"Two\"");
        assert_eq!(sql, "select 1;");
    }

    #[test]
    fn test_split_multibyte_body() {
        let (config, sql) = split_config_and_sql("/* pgxsqlé pgxsql */ select 'ü';");
        assert_eq!(config, "é");
        assert_eq!(sql, "select 'ü';");
    }
}
