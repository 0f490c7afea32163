use crate::domain::value_objects::{AssetType, RowStatus, Visibility};

/// Columns the query DSL may reference. Being a closed enum, this is the
/// whitelist: no identifier in generated SQL ever comes from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    AuthorId,
    Category,
    Address,
    IsPublic,
    AssetType,
    ClickCount,
    Status,
    Version,
    CTime,
    UTime,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::AuthorId => "author_id",
            Column::Category => "category",
            Column::Address => "address",
            Column::IsPublic => "is_public",
            Column::AssetType => "asset_type",
            Column::ClickCount => "click_count",
            Column::Status => "status",
            Column::Version => "version",
            Column::CTime => "c_time",
            Column::UTime => "u_time",
        }
    }
}

/// Comparison operator of a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    NotEq,
    Like,
}

impl FilterOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::NotEq => "<>",
            FilterOp::Like => "LIKE",
        }
    }
}

/// A value bound as a statement parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<Visibility> for SqlValue {
    fn from(value: Visibility) -> Self {
        SqlValue::Int(value.as_i64())
    }
}

impl From<RowStatus> for SqlValue {
    fn from(value: RowStatus) -> Self {
        SqlValue::Int(value.as_i64())
    }
}

impl From<AssetType> for SqlValue {
    fn from(value: AssetType) -> Self {
        SqlValue::Int(value.as_i64())
    }
}

/// One `column op ?` term; a list of them is combined with AND
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub column: Column,
    pub op: FilterOp,
    pub value: SqlValue,
}

impl FilterCondition {
    pub fn eq(column: Column, value: impl Into<SqlValue>) -> Self {
        Self {
            column,
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn like(column: Column, pattern: impl Into<String>) -> Self {
        Self {
            column,
            op: FilterOp::Like,
            value: SqlValue::Text(pattern.into()),
        }
    }

    /// The condition every list/search applies: soft-deleted rows are invisible
    pub fn active() -> Self {
        Self::eq(Column::Status, RowStatus::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderByCondition {
    pub column: Column,
    pub direction: Direction,
}

impl OrderByCondition {
    pub fn asc(column: Column) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: Column) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// Escape LIKE wildcards in user text; pairs with `ESCAPE '!'`
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '!' | '%' | '_') {
            escaped.push('!');
        }
        escaped.push(c);
    }
    escaped
}
