use sqlx::{Either, Executor, Postgres, Statement};

use crate::builder::build_query;
use crate::config::QueryConfig;
use crate::error::{Error, Result};
use crate::lexer::Diagnostic;
use crate::parameter::{DataType, Parameter};
use crate::splitter::split_config_and_sql;

/// A single annotated SQL statement, ready for code generation.
///
/// `QuerySource` is built from a source document holding an optional
/// configuration block and one SQL statement written with named placeholders:
///
/// ```sql
/// /* pgxsql
/// package = "main"
/// name = "GetPerson"
/// pgxsql */
///
/// select name from person where id = :id;
/// ```
///
/// After parsing, `sql` only contains positional placeholders (`$1`, `$2`, ...)
/// and `parameters` lists each distinct name once, in ordinal order.
///
/// # Examples
///
/// ```rust
/// use sqlx_named_sql::QuerySource;
///
/// let source = QuerySource::parse(
///     "/* pgxsql\nname = \"GetPerson\"\npgxsql */\nselect name from person where id = :id;",
/// )?;
/// assert_eq!(source.name, "GetPerson");
/// assert_eq!(source.sql, "select name from person where id = $1;");
/// assert_eq!(source.parameters[0].name, "id");
/// # Ok::<(), sqlx_named_sql::Error>(())
/// ```
///
/// # Resolving parameter types
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use sqlx_named_sql::QuerySource;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = PgPool::connect("postgres://localhost/test").await?;
///
/// let source = QuerySource::new(
///     "/* pgxsql\nname = \"DeletePerson\"\npgxsql */\ndelete from person where id = :id;",
///     &pool,
/// )
/// .await?;
///
/// for parameter in &source.parameters {
///     println!("${} {} {:?}", parameter.ordinal, parameter.name, parameter.data_type);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySource {
    pub package: String,
    pub name: String,
    pub sql: String,
    pub parameters: Vec<Parameter>,
    /// Configuration keys other than `package` and `name`.
    pub extra: toml::Table,
    /// Non-fatal findings from rewriting the SQL.
    pub diagnostics: Vec<Diagnostic>,
}

impl QuerySource {
    /// Splits, decodes and rewrites a source document without touching a database.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration block is invalid or the statement
    /// has too many distinct parameters.
    pub fn parse(document: &str) -> Result<Self> {
        let (config, sql) = split_config_and_sql(document);
        let config = QueryConfig::from_toml(&config)?;
        let rewritten = build_query(&sql)?;

        tracing::debug!(
            package = %config.package,
            name = %config.name,
            parameters = rewritten.parameters.len(),
            "parsed query source"
        );

        Ok(Self {
            package: config.package,
            name: config.name,
            sql: rewritten.sql,
            parameters: rewritten.parameters,
            extra: config.extra,
            diagnostics: rewritten.diagnostics,
        })
    }

    /// Parses a source document and resolves its parameter types against
    /// the database behind `executor`.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, the statement cannot be prepared,
    /// or the described parameters do not line up with the named ones.
    pub async fn new<'e, E>(document: &str, executor: E) -> Result<Self>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut source = Self::parse(document)?;
        source.resolve_types(executor).await?;
        Ok(source)
    }

    /// Prepares the rewritten statement and attaches the parameter types the
    /// server describes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the statement cannot be prepared and
    /// the errors of [`attach_types`](Self::attach_types) otherwise.
    #[tracing::instrument(skip_all, fields(name = %self.name))]
    pub async fn resolve_types<'e, E>(&mut self, executor: E) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let types: Vec<DataType> = {
            let statement = executor.prepare(&self.sql).await?;
            match statement.parameters() {
                Some(Either::Left(types)) => types.iter().map(DataType::from).collect(),
                Some(Either::Right(0)) => Vec::new(),
                _ => return Err(Error::ParameterTypesUnavailable),
            }
        };
        tracing::debug!(described = types.len(), "described statement parameters");
        self.attach_types(types)
    }

    /// Attaches one type per ordinal, the first type to `$1` and so on.
    ///
    /// Nothing is attached unless every parameter receives a type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterTypeCount`] if the number of types differs
    /// from the number of parameters, and [`Error::UnmatchedParameterType`]
    /// if some ordinal has no parameter.
    pub fn attach_types<I>(&mut self, types: I) -> Result<()>
    where
        I: IntoIterator<Item = DataType>,
    {
        let types: Vec<DataType> = types.into_iter().collect();
        if types.len() != self.parameters.len() {
            return Err(Error::ParameterTypeCount {
                expected: self.parameters.len(),
                actual: types.len(),
            });
        }

        let mut slots = Vec::with_capacity(types.len());
        for ordinal in 1..=types.len() {
            let ordinal =
                u16::try_from(ordinal).map_err(|_| Error::TooManyParameters(types.len()))?;
            let slot = self
                .parameters
                .iter()
                .position(|p| p.ordinal == ordinal)
                .ok_or(Error::UnmatchedParameterType(ordinal))?;
            slots.push(slot);
        }

        for (slot, data_type) in slots.into_iter().zip(types) {
            self.parameters[slot].data_type = Some(data_type);
        }
        Ok(())
    }

    /// Looks up a parameter by its 1-based ordinal.
    pub fn parameter(&self, ordinal: u16) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.ordinal == ordinal)
    }

    /// Looks up a parameter by name.
    pub fn named_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
