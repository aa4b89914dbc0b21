//! Column definitions.
//!
//! A [`Column`] is one `column_definition` of a CREATE TABLE statement,
//! including the inline constraints (`PRIMARY KEY`, `UNIQUE`) that
//! table normalization later lifts into explicit indexes.

use core::fmt;
use std::borrow::Cow;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum ColumnType {
    // Numeric types
    /// Bit-field.
    Bit,
    /// 1-byte integer.
    TinyInt,
    /// 2-byte integer.
    SmallInt,
    /// 3-byte integer.
    MediumInt,
    /// 4-byte integer.
    Int,
    /// Synonym for `INT`.
    Integer,
    /// 8-byte integer.
    BigInt,
    /// Synonym for `DOUBLE` (unless `REAL_AS_FLOAT` is set).
    Real,
    /// Double precision float.
    Double,
    /// Single precision float.
    Float,
    /// Fixed-point number.
    Decimal,
    /// Synonym for `DECIMAL`.
    Numeric,

    // Date/time types
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Timestamp.
    Timestamp,
    /// Date and time.
    DateTime,
    /// Year.
    Year,

    // String types
    /// Fixed-length character string.
    Char,
    /// Variable-length character string.
    VarChar,
    /// Fixed-length binary string.
    Binary,
    /// Variable-length binary string.
    VarBinary,
    /// Tiny binary large object.
    TinyBlob,
    /// Binary large object.
    Blob,
    /// Medium binary large object.
    MediumBlob,
    /// Long binary large object.
    LongBlob,
    /// Tiny text.
    TinyText,
    /// Text.
    Text,
    /// Medium text.
    MediumText,
    /// Long text.
    LongText,
    /// Enumeration.
    Enum,
    /// Set of values.
    Set,

    // Other
    /// Synonym for `TINYINT(1)`.
    Boolean,
    /// Synonym for `TINYINT(1)`.
    Bool,
    /// JSON document.
    Json,
}

impl ColumnType {
    /// Returns the SQL keyword for this type.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::DateTime => "DATETIME",
            Self::Year => "YEAR",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::TinyBlob => "TINYBLOB",
            Self::Blob => "BLOB",
            Self::MediumBlob => "MEDIUMBLOB",
            Self::LongBlob => "LONGBLOB",
            Self::TinyText => "TINYTEXT",
            Self::Text => "TEXT",
            Self::MediumText => "MEDIUMTEXT",
            Self::LongText => "LONGTEXT",
            Self::Enum => "ENUM",
            Self::Set => "SET",
            Self::Boolean => "BOOLEAN",
            Self::Bool => "BOOL",
            Self::Json => "JSON",
        }
    }

    /// Returns `true` for the character/text types that carry a
    /// character set and collation.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::VarChar
                | Self::TinyText
                | Self::Text
                | Self::MediumText
                | Self::LongText
        )
    }

    /// Returns `true` for the integer types.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::TinyInt
                | Self::SmallInt
                | Self::MediumInt
                | Self::Int
                | Self::Integer
                | Self::BigInt
                | Self::Boolean
                | Self::Bool
        )
    }

    /// Returns `true` for every numeric type, integers included.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer()
            || matches!(
                self,
                Self::Bit | Self::Real | Self::Double | Self::Float | Self::Decimal | Self::Numeric
            )
    }

    /// Canonical type for a synonym, along with the length the synonym
    /// implies. Returns `None` if this type is already canonical.
    const fn synonym(self) -> Option<(Self, Option<ColumnLength>)> {
        match self {
            Self::Integer => Some((Self::Int, None)),
            Self::Numeric => Some((Self::Decimal, None)),
            Self::Boolean | Self::Bool => Some((Self::TinyInt, Some(ColumnLength::new(1)))),
            _ => None,
        }
    }

    /// Length MySQL reports for this type when none was declared.
    const fn default_length(self, unsigned: bool) -> Option<ColumnLength> {
        let length = match (self, unsigned) {
            (Self::TinyInt, false) => 4,
            (Self::TinyInt, true) => 3,
            (Self::SmallInt, false) => 6,
            (Self::SmallInt, true) => 5,
            (Self::MediumInt, false) => 9,
            (Self::MediumInt, true) => 8,
            (Self::Int, false) => 11,
            (Self::Int, true) => 10,
            (Self::BigInt, _) => 20,
            (Self::Decimal, _) => return Some(ColumnLength::with_decimals(10, 0)),
            _ => return None,
        };
        Some(ColumnLength::new(length))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ColumnType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let ty = match s.trim().to_ascii_uppercase().as_str() {
            "BIT" => Self::Bit,
            "TINYINT" => Self::TinyInt,
            "SMALLINT" => Self::SmallInt,
            "MEDIUMINT" => Self::MediumInt,
            "INT" => Self::Int,
            "INTEGER" => Self::Integer,
            "BIGINT" => Self::BigInt,
            "REAL" => Self::Real,
            "DOUBLE" => Self::Double,
            "FLOAT" => Self::Float,
            "DECIMAL" => Self::Decimal,
            "NUMERIC" => Self::Numeric,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "DATETIME" => Self::DateTime,
            "YEAR" => Self::Year,
            "CHAR" => Self::Char,
            "VARCHAR" => Self::VarChar,
            "BINARY" => Self::Binary,
            "VARBINARY" => Self::VarBinary,
            "TINYBLOB" => Self::TinyBlob,
            "BLOB" => Self::Blob,
            "MEDIUMBLOB" => Self::MediumBlob,
            "LONGBLOB" => Self::LongBlob,
            "TINYTEXT" => Self::TinyText,
            "TEXT" => Self::Text,
            "MEDIUMTEXT" => Self::MediumText,
            "LONGTEXT" => Self::LongText,
            "ENUM" => Self::Enum,
            "SET" => Self::Set,
            "BOOLEAN" => Self::Boolean,
            "BOOL" => Self::Bool,
            "JSON" => Self::Json,
            _ => return Err(ModelError::UnknownColumnType(s.to_string())),
        };
        Ok(ty)
    }
}

/// Nullability as declared on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NullState {
    /// Neither `NULL` nor `NOT NULL` was declared.
    #[default]
    None,
    /// `NULL`.
    Null,
    /// `NOT NULL`.
    NotNull,
}

/// Declared length of a column, e.g. `VARCHAR(255)` or `DECIMAL(10, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnLength {
    /// Length, display width, or precision.
    pub length: u32,
    /// Number of digits after the decimal point, if declared.
    pub decimals: Option<u32>,
}

impl ColumnLength {
    /// Creates a length without decimals.
    #[must_use]
    pub const fn new(length: u32) -> Self {
        Self {
            length,
            decimals: None,
        }
    }

    /// Creates a length with decimals.
    #[must_use]
    pub const fn with_decimals(length: u32, decimals: u32) -> Self {
        Self {
            length,
            decimals: Some(decimals),
        }
    }
}

impl fmt::Display for ColumnLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decimals {
            Some(decimals) => write!(f, "({}, {decimals})", self.length),
            None => write!(f, "({})", self.length),
        }
    }
}

/// A column's `DEFAULT` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultValue {
    /// The literal or expression text.
    pub value: String,
    /// Whether the value was written as a quoted string literal.
    pub quoted: bool,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    ty: ColumnType,
    length: Option<ColumnLength>,
    unsigned: bool,
    zerofill: bool,
    binary: bool,
    character_set: Option<String>,
    collation: Option<String>,
    null_state: NullState,
    default: Option<DefaultValue>,
    auto_increment: bool,
    auto_update: Option<String>,
    primary: bool,
    unique: bool,
    comment: Option<String>,
    enum_values: Vec<String>,
    /// Identity of the table that owns this column, if any.
    #[cfg_attr(feature = "serde", serde(skip))]
    table_id: Option<String>,
}

impl Column {
    /// Creates a new column with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            length: None,
            unsigned: false,
            zerofill: false,
            binary: false,
            character_set: None,
            collation: None,
            null_state: NullState::None,
            default: None,
            auto_increment: false,
            auto_update: None,
            primary: false,
            unique: false,
            comment: None,
            enum_values: Vec::new(),
            table_id: None,
        }
    }

    /// Sets the length.
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(ColumnLength::new(length));
        self
    }

    /// Sets the length and decimals.
    #[must_use]
    pub fn length_with_decimals(mut self, length: u32, decimals: u32) -> Self {
        self.length = Some(ColumnLength::with_decimals(length, decimals));
        self
    }

    /// Marks the column `UNSIGNED`.
    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Marks the column `ZEROFILL`.
    #[must_use]
    pub fn zerofill(mut self) -> Self {
        self.zerofill = true;
        self
    }

    /// Marks the column `BINARY`.
    #[must_use]
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    /// Declares the column `NOT NULL`.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.null_state = NullState::NotNull;
        self
    }

    /// Declares the column `NULL`.
    #[must_use]
    pub fn null(mut self) -> Self {
        self.null_state = NullState::Null;
        self
    }

    /// Declares the column `AUTO_INCREMENT`.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Declares an inline `PRIMARY KEY`.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Declares an inline `UNIQUE`.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets `CHARACTER SET`.
    #[must_use]
    pub fn with_character_set(mut self, character_set: impl Into<String>) -> Self {
        self.character_set = Some(character_set.into());
        self
    }

    /// Sets `COLLATE`.
    #[must_use]
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets the `DEFAULT` clause.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>, quoted: bool) -> Self {
        self.default = Some(DefaultValue {
            value: value.into(),
            quoted,
        });
        self
    }

    /// Sets the `ON UPDATE` expression.
    #[must_use]
    pub fn with_auto_update(mut self, expr: impl Into<String>) -> Self {
        self.auto_update = Some(expr.into());
        self
    }

    /// Sets `COMMENT`.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the values of an `ENUM` or `SET` column.
    #[must_use]
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Identity of this column within its table.
    #[must_use]
    pub fn id(&self) -> String {
        format!("tablecol#{}", self.name)
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.ty
    }

    /// Declared length, if any.
    #[must_use]
    pub const fn column_length(&self) -> Option<ColumnLength> {
        self.length
    }

    /// Whether the column is `UNSIGNED`.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Whether the column is `ZEROFILL`.
    #[must_use]
    pub const fn is_zerofill(&self) -> bool {
        self.zerofill
    }

    /// Whether the column carries the `BINARY` attribute.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        self.binary
    }

    /// Declared nullability.
    #[must_use]
    pub const fn null_state(&self) -> NullState {
        self.null_state
    }

    /// Declared `DEFAULT`, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Whether the column is `AUTO_INCREMENT`.
    #[must_use]
    pub const fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// `ON UPDATE` expression, if any.
    #[must_use]
    pub fn auto_update(&self) -> Option<&str> {
        self.auto_update.as_deref()
    }

    /// Column comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Members of an `ENUM` or `SET` type.
    #[must_use]
    pub fn enum_values(&self) -> &[String] {
        &self.enum_values
    }

    /// Whether the column carries an inline `PRIMARY KEY`.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// Sets or clears the inline `PRIMARY KEY`.
    pub fn set_primary(&mut self, primary: bool) -> &mut Self {
        self.primary = primary;
        self
    }

    /// Whether the column carries an inline `UNIQUE`.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Sets or clears the inline `UNIQUE`.
    pub fn set_unique(&mut self, unique: bool) -> &mut Self {
        self.unique = unique;
        self
    }

    /// Whether an explicit character set was declared.
    #[must_use]
    pub const fn has_character_set(&self) -> bool {
        self.character_set.is_some()
    }

    /// Declared character set, if any.
    #[must_use]
    pub fn character_set(&self) -> Option<&str> {
        self.character_set.as_deref()
    }

    /// Sets the character set.
    pub fn set_character_set(&mut self, character_set: impl Into<String>) -> &mut Self {
        self.character_set = Some(character_set.into());
        self
    }

    /// Whether an explicit collation was declared.
    #[must_use]
    pub const fn has_collation(&self) -> bool {
        self.collation.is_some()
    }

    /// Declared collation, if any.
    #[must_use]
    pub fn collation(&self) -> Option<&str> {
        self.collation.as_deref()
    }

    /// Sets the collation.
    pub fn set_collation(&mut self, collation: impl Into<String>) -> &mut Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets the nullability.
    pub fn set_null_state(&mut self, null_state: NullState) -> &mut Self {
        self.null_state = null_state;
        self
    }

    /// Identity of the owning table, or `None` if the column is not
    /// attached to a table.
    #[must_use]
    pub fn table_id(&self) -> Option<&str> {
        self.table_id.as_deref()
    }

    /// Tags the column with the identity of its owning table.
    pub fn set_table_id(&mut self, table_id: impl Into<String>) -> &mut Self {
        self.table_id = Some(table_id.into());
        self
    }

    /// Rewrites the column into the form MySQL reports back for it.
    ///
    /// Returns [`Cow::Borrowed`] when the column is already canonical and
    /// [`Cow::Owned`] with an independent copy otherwise.
    #[must_use]
    pub fn normalize(&self) -> Cow<'_, Self> {
        let mut column = Cow::Borrowed(self);

        if let Some((ty, implied_length)) = self.ty.synonym() {
            let col = column.to_mut();
            col.ty = ty;
            if implied_length.is_some() {
                col.length = implied_length;
            }
        }

        if column.length.is_none() {
            if let Some(length) = column.ty.default_length(column.unsigned) {
                column.to_mut().length = Some(length);
            }
        }

        if column.null_state == NullState::None {
            let null_state = if column.primary {
                NullState::NotNull
            } else {
                NullState::Null
            };
            column.to_mut().null_state = null_state;
        }

        if column.ty.is_numeric() && column.default.as_ref().is_some_and(|d| d.quoted) {
            if let Some(default) = column.to_mut().default.as_mut() {
                default.quoted = false;
            }
        }

        column
    }
}
