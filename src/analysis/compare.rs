use std::collections::BTreeMap;

use super::counts::{count_by_value, CountQuery, FrequencyTable};
use crate::data::filter::RowFilter;
use crate::data::model::{Catalog, Field, Value};

// ---------------------------------------------------------------------------
// ComparisonTable – two key-aligned, zero-filled series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    /// Column the keys come from.
    pub field: Field,
    /// Series names, in column order.
    pub names: (String, String),
    rows: BTreeMap<Value, (u64, u64)>,
}

impl ComparisonTable {
    /// Union of both key domains; a key missing from one side counts 0 there.
    pub fn from_tables(a: &FrequencyTable, b: &FrequencyTable, names: (String, String)) -> Self {
        let mut rows: BTreeMap<Value, (u64, u64)> = BTreeMap::new();
        for (key, count) in a.entries() {
            rows.entry(key.clone()).or_default().0 += count;
        }
        for (key, count) in b.entries() {
            rows.entry(key.clone()).or_default().1 += count;
        }
        ComparisonTable {
            field: a.field,
            names,
            rows,
        }
    }

    /// Rows ascending by key.
    pub fn rows(&self) -> impl Iterator<Item = (&Value, (u64, u64))> {
        self.rows.iter().map(|(k, v)| (k, *v))
    }

    #[cfg(test)]
    pub fn get(&self, key: &Value) -> (u64, u64) {
        self.rows.get(key).copied().unwrap_or((0, 0))
    }
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

/// Count `value` separately for two values of the `category` column.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub category: Field,
    pub value: Field,
    pub first: Value,
    pub second: Value,
    pub min_release_year: Option<i64>,
    /// Series names; the category values themselves when `None`.
    pub labels: Option<(String, String)>,
}

impl Comparison {
    pub fn new(category: Field, value: Field, first: impl Into<Value>, second: impl Into<Value>) -> Self {
        Comparison {
            category,
            value,
            first: first.into(),
            second: second.into(),
            min_release_year: None,
            labels: None,
        }
    }

    pub fn since(mut self, year: i64) -> Self {
        self.min_release_year = Some(year);
        self
    }

    pub fn labeled(mut self, first: &str, second: &str) -> Self {
        self.labels = Some((first.to_string(), second.to_string()));
        self
    }

    fn side(&self, category_value: &Value) -> CountQuery {
        let mut filter = RowFilter::all().with_eq(self.category, category_value.clone());
        if let Some(year) = self.min_release_year {
            filter = filter.since(year);
        }
        CountQuery::new(self.value).filter(filter)
    }
}

pub fn compare(catalog: &Catalog, cmp: &Comparison) -> ComparisonTable {
    let a = count_by_value(catalog, &cmp.side(&cmp.first));
    let b = count_by_value(catalog, &cmp.side(&cmp.second));
    let names = cmp
        .labels
        .clone()
        .unwrap_or_else(|| (cmp.first.to_string(), cmp.second.to_string()));
    ComparisonTable::from_tables(&a, &b, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Title, TitleKind};

    fn catalog() -> Catalog {
        let rows = [
            (TitleKind::Movie, 2014),
            (TitleKind::Movie, 2016),
            (TitleKind::Movie, 2016),
            (TitleKind::TvShow, 2016),
            (TitleKind::TvShow, 2020),
        ];
        Catalog::from_titles(rows.iter().map(|&(k, y)| Title::new(k, y)).collect())
    }

    fn per_year() -> Comparison {
        Comparison::new(Field::Type, Field::ReleaseYear, TitleKind::Movie, TitleKind::TvShow)
    }

    #[test]
    fn union_is_zero_filled_and_ascending() {
        let table = compare(&catalog(), &per_year());
        let rows: Vec<(Value, (u64, u64))> = table.rows().map(|(k, v)| (k.clone(), v)).collect();
        assert_eq!(
            rows,
            vec![
                (Value::Integer(2014), (1, 0)),
                (Value::Integer(2016), (2, 1)),
                (Value::Integer(2020), (0, 1)),
            ]
        );
        assert_eq!(table.names, ("Movie".to_string(), "TV Show".to_string()));
    }

    #[test]
    fn sides_match_independent_counts() {
        let cat = catalog();
        let table = compare(&cat, &per_year());
        let movies = count_by_value(
            &cat,
            &CountQuery::new(Field::ReleaseYear)
                .filter(RowFilter::all().with_eq(Field::Type, TitleKind::Movie)),
        );
        let shows = count_by_value(
            &cat,
            &CountQuery::new(Field::ReleaseYear)
                .filter(RowFilter::all().with_eq(Field::Type, TitleKind::TvShow)),
        );
        for (key, (a, b)) in table.rows() {
            assert_eq!(a + b, movies.get(key) + shows.get(key));
        }
        for (key, _) in movies.entries().iter().chain(shows.entries()) {
            assert_ne!(table.get(key), (0, 0));
        }
    }

    #[test]
    fn year_bound_and_labels_apply() {
        let table = compare(&catalog(), &per_year().since(2015).labeled("Movies", "TV Shows"));
        assert_eq!(table.rows().count(), 2);
        assert_eq!(table.get(&Value::Integer(2014)), (0, 0));
        assert_eq!(table.get(&Value::Integer(2016)), (2, 1));
        assert_eq!(table.names.0, "Movies");
    }
}
