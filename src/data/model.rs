use std::fmt;

use serde::Deserialize;

/// Separator between entries of a multi-valued cell (`cast`, `director`, `country`).
pub const LIST_DELIMITER: &str = ", ";

// ---------------------------------------------------------------------------
// Value – a single key in a frequency table
// ---------------------------------------------------------------------------

/// A typed cell value. Integers order numerically, so year series never
/// sort as strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Field – the columns the analysis knows about
// ---------------------------------------------------------------------------

/// How a column is interpreted once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Categorical,
    Integer,
    Text,
    /// Text holding several entries joined by [`LIST_DELIMITER`].
    DelimitedList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Type,
    ReleaseYear,
    DateAdded,
    MonthAdded,
    Cast,
    Director,
    Country,
}

impl Field {
    /// Column name as it appears in the source header.
    pub fn name(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::ReleaseYear => "release_year",
            Field::DateAdded => "date_added",
            Field::MonthAdded => "month_added",
            Field::Cast => "cast",
            Field::Director => "director",
            Field::Country => "country",
        }
    }

    pub fn column_type(self) -> ColumnType {
        match self {
            Field::Type => ColumnType::Categorical,
            Field::ReleaseYear => ColumnType::Integer,
            Field::DateAdded | Field::MonthAdded => ColumnType::Text,
            Field::Cast | Field::Director | Field::Country => ColumnType::DelimitedList,
        }
    }

    /// Column name with its first letter upper-cased ("release_year" → "Release_year").
    pub fn capitalized(self) -> String {
        let mut chars = self.name().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// TitleKind – the categorical `type` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TitleKind {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl TitleKind {
    pub fn label(self) -> &'static str {
        match self {
            TitleKind::Movie => "Movie",
            TitleKind::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<TitleKind> for Value {
    fn from(kind: TitleKind) -> Self {
        Value::Text(kind.label().to_string())
    }
}

// ---------------------------------------------------------------------------
// Title – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog entry. Field names follow the source header; columns
/// not listed here are ignored when loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Title {
    #[serde(default)]
    pub show_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TitleKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    pub release_year: i64,
    /// Derived by [`Catalog::with_month_added`]; never read from the file.
    #[serde(skip)]
    pub month_added: Option<String>,
}

impl Title {
    /// A row with every optional cell missing.
    #[cfg(test)]
    pub fn new(kind: TitleKind, release_year: i64) -> Self {
        Title {
            show_id: None,
            kind,
            title: None,
            director: None,
            cast: None,
            country: None,
            date_added: None,
            release_year,
            month_added: None,
        }
    }

    fn text(&self, field: Field) -> Option<&str> {
        let cell = match field {
            Field::DateAdded => self.date_added.as_deref(),
            Field::MonthAdded => self.month_added.as_deref(),
            Field::Cast => self.cast.as_deref(),
            Field::Director => self.director.as_deref(),
            Field::Country => self.country.as_deref(),
            Field::Type => Some(self.kind.label()),
            Field::ReleaseYear => None,
        };
        cell.filter(|s| !s.is_empty())
    }

    /// The single value of `field`, or `None` when the cell is missing.
    pub fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::ReleaseYear => Some(Value::Integer(self.release_year)),
            other => self.text(other).map(Value::from),
        }
    }

    /// Occurrences of `field` in this row. With `explode`, a delimited-list
    /// cell is split on [`LIST_DELIMITER`] and each non-empty token is one
    /// occurrence; any other cell is a single occurrence.
    pub fn occurrences(&self, field: Field, explode: bool) -> Vec<Value> {
        match (field.column_type(), explode) {
            (ColumnType::DelimitedList, true) => self
                .text(field)
                .map(|cell| {
                    cell.split(LIST_DELIMITER)
                        .filter(|tok| !tok.is_empty())
                        .map(Value::from)
                        .collect()
                })
                .unwrap_or_default(),
            (ColumnType::Categorical | ColumnType::Integer | ColumnType::Text, _)
            | (ColumnType::DelimitedList, false) => self.value(field).into_iter().collect(),
        }
    }
}

/// Leading token of a `date_added` string ("September 24, 2021" → "September").
pub fn month_token(date_added: &str) -> Option<&str> {
    date_added.split_whitespace().next()
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    titles: Vec<Title>,
}

impl Catalog {
    pub fn from_titles(titles: Vec<Title>) -> Self {
        Catalog { titles }
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Append the derived `month_added` column.
    pub fn with_month_added(self) -> Self {
        let mut missing = 0usize;
        let titles = self
            .titles
            .into_iter()
            .map(|mut t| {
                t.month_added = t
                    .text(Field::DateAdded)
                    .and_then(month_token)
                    .map(str::to_string);
                if t.month_added.is_none() {
                    missing += 1;
                }
                t
            })
            .collect();
        if missing > 0 {
            log::warn!("{missing} rows have no usable date_added; month_added left missing");
        }
        Catalog { titles }
    }
}
