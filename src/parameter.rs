use indexmap::IndexMap;
use sqlx::postgres::PgTypeInfo;
use sqlx::TypeInfo;

use crate::error::{Error, Result};

/// PostgreSQL type of a bind parameter, as described by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Type name, e.g. `INT8` or `TEXT`.
    pub name: String,
    /// Type OID, when the server reported one.
    pub oid: Option<u32>,
}

impl DataType {
    /// Creates a type descriptor from a type name and optional OID.
    pub fn new(name: impl Into<String>, oid: Option<u32>) -> Self {
        Self {
            name: name.into(),
            oid,
        }
    }
}

impl From<&PgTypeInfo> for DataType {
    fn from(info: &PgTypeInfo) -> Self {
        Self::new(info.name(), info.oid().map(|oid| oid.0))
    }
}

/// A distinct named placeholder and the positional slot it was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// 1-based position, in order of first occurrence.
    pub ordinal: u16,
    /// Filled in by type resolution.
    pub data_type: Option<DataType>,
}

/// Insertion-ordered set of parameters keyed by name.
///
/// The n-th distinct name always gets ordinal n, so ordinals stay contiguous
/// from 1.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParameterMap {
    by_name: IndexMap<String, Parameter>,
}

impl ParameterMap {
    /// Returns the ordinal of `name`, assigning the next one on first sight.
    pub(crate) fn ordinal_for(&mut self, name: &str) -> Result<u16> {
        if let Some(parameter) = self.by_name.get(name) {
            return Ok(parameter.ordinal);
        }
        let count = self.by_name.len() + 1;
        let ordinal = u16::try_from(count).map_err(|_| Error::TooManyParameters(count))?;
        self.by_name.insert(
            name.to_owned(),
            Parameter {
                name: name.to_owned(),
                ordinal,
                data_type: None,
            },
        );
        Ok(ordinal)
    }

    /// Parameters in ordinal order.
    pub(crate) fn into_parameters(self) -> Vec<Parameter> {
        self.by_name.into_values().collect()
    }
}
