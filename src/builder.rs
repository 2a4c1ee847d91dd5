use crate::lexer::{tokenize, Diagnostic, Token};
use crate::parameter::{Parameter, ParameterMap};

/// SQL with named placeholders replaced by positional ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenSql {
    /// Statement text using `$1`, `$2`, ...
    pub sql: String,
    /// One entry per distinct name, in ordinal order.
    pub parameters: Vec<Parameter>,
    /// Non-fatal lexer findings.
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts named placeholders (`:name`) to PostgreSQL positional placeholders (`$n`).
///
/// Each distinct name gets the next ordinal the first time it appears and
/// every later occurrence reuses it. Placeholder-like text inside quoted
/// literals and `::` casts is left untouched. Surrounding whitespace is
/// trimmed.
///
/// # Errors
///
/// Returns [`Error::TooManyParameters`](crate::Error::TooManyParameters) when
/// the statement names more parameters than PostgreSQL can bind.
///
/// # Examples
///
/// ```
/// use sqlx_named_sql::builder::build_query;
///
/// let rewritten = build_query("SELECT * FROM users WHERE id = :id OR parent_id = :id AND name = :name")?;
/// assert_eq!(rewritten.sql, "SELECT * FROM users WHERE id = $1 OR parent_id = $1 AND name = $2");
/// assert_eq!(rewritten.parameters.len(), 2);
/// # Ok::<(), sqlx_named_sql::Error>(())
/// ```
pub fn build_query(template: &str) -> crate::Result<RewrittenSql> {
    let lexed = tokenize(template.trim());
    for diagnostic in &lexed.diagnostics {
        tracing::warn!(%diagnostic, "suspicious SQL while rewriting named parameters");
    }

    let mut sql = String::with_capacity(template.len());
    let mut parameters = ParameterMap::default();
    for token in lexed.tokens {
        match token {
            Token::Literal(text) => sql.push_str(text),
            Token::Placeholder(name) => {
                let ordinal = parameters.ordinal_for(name)?;
                sql.push('$');
                sql.push_str(&ordinal.to_string());
            }
        }
    }

    let parameters = parameters.into_parameters();
    tracing::debug!(parameters = parameters.len(), "rewrote named parameters");
    Ok(RewrittenSql {
        sql,
        parameters,
        diagnostics: lexed.diagnostics,
    })
}
