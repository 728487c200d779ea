use std::collections::HashMap;

use crate::data::filter::{filtered, RowFilter};
use crate::data::model::{Catalog, Field, Value};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// FrequencyTable – ordered (value, count) pairs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Column the counts were taken over.
    pub field: Field,
    entries: Vec<(Value, u64)>,
}

impl FrequencyTable {
    /// Count `values` in encounter order, then order by descending count.
    /// The sort is stable, so equal counts keep first-encountered order.
    pub fn tally(field: Field, values: impl IntoIterator<Item = Value>) -> Self {
        let mut index: HashMap<Value, usize> = HashMap::new();
        let mut entries: Vec<(Value, u64)> = Vec::new();
        for value in values {
            match index.get(&value) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(value.clone(), entries.len());
                    entries.push((value, 1));
                }
            }
        }
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        FrequencyTable { field, entries }
    }

    pub fn entries(&self) -> &[(Value, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Count for `key`, zero when absent.
    #[cfg(test)]
    pub fn get(&self, key: &Value) -> u64 {
        self.entries
            .iter()
            .find(|(v, _)| v == key)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// The `n` highest counts.
    pub fn top(&self, n: usize) -> Self {
        FrequencyTable {
            field: self.field,
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Same counts, ascending by key.
    pub fn sorted_by_key(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        FrequencyTable {
            field: self.field,
            entries,
        }
    }
}

// ---------------------------------------------------------------------------
// count_by_value
// ---------------------------------------------------------------------------

/// What to count and over which rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CountQuery {
    pub field: Field,
    pub filter: RowFilter,
    /// Split text cells on ", " and count each entry on its own.
    pub explode: bool,
    pub top_n: Option<usize>,
}

impl CountQuery {
    pub fn new(field: Field) -> Self {
        CountQuery {
            field,
            filter: RowFilter::all(),
            explode: false,
            top_n: None,
        }
    }

    pub fn filter(mut self, filter: RowFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn explode(mut self) -> Self {
        self.explode = true;
        self
    }

    pub fn top(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }
}

/// Frequency of each distinct value of `query.field` among the rows
/// passing `query.filter`. Missing cells are not counted.
pub fn count_by_value(catalog: &Catalog, query: &CountQuery) -> FrequencyTable {
    let values = filtered(catalog, &query.filter)
        .flat_map(|t| t.occurrences(query.field, query.explode));
    let table = FrequencyTable::tally(query.field, values);
    let table = match query.top_n {
        Some(n) => table.top(n),
        None => table,
    };
    log::debug!(
        "{}: {} distinct values, {} occurrences",
        query.field,
        table.len(),
        table.total()
    );
    table
}

/// The key with the highest count; the first-encountered one on ties.
pub fn most_frequent(table: &FrequencyTable) -> Result<&Value> {
    table
        .entries
        .first()
        .map(|(v, _)| v)
        .ok_or_else(|| AnalysisError::EmptyDomain {
            column: table.field.name().to_string(),
        })
}

/// Mode of `field` over the whole catalog.
pub fn most_frequent_in(catalog: &Catalog, field: Field) -> Result<Value> {
    let table = count_by_value(catalog, &CountQuery::new(field));
    most_frequent(&table).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Title, TitleKind};

    fn titled(kind: TitleKind, year: i64, cast: Option<&str>) -> Title {
        let mut t = Title::new(kind, year);
        t.cast = cast.map(str::to_string);
        t
    }

    fn example() -> Catalog {
        Catalog::from_titles(vec![
            titled(TitleKind::Movie, 2018, Some("A, B")),
            titled(TitleKind::Movie, 2018, Some("B, C")),
            titled(TitleKind::TvShow, 2019, Some("A")),
        ])
    }

    fn movie_cast() -> CountQuery {
        CountQuery::new(Field::Cast)
            .filter(RowFilter::all().with_eq(Field::Type, TitleKind::Movie))
            .explode()
    }

    #[test]
    fn exploded_movie_cast_counts() {
        let table = count_by_value(&example(), &movie_cast());
        assert_eq!(table.get(&"A".into()), 1);
        assert_eq!(table.get(&"B".into()), 2);
        assert_eq!(table.get(&"C".into()), 1);
        assert_eq!(table.len(), 3);
        assert_eq!(most_frequent(&table).unwrap(), &Value::from("B"));
    }

    #[test]
    fn compound_cell_is_not_a_key() {
        let table = count_by_value(&example(), &movie_cast());
        assert_eq!(table.get(&"A, B".into()), 0);
    }

    #[test]
    fn counts_sum_to_occurrences() {
        let cat = example();
        let table = count_by_value(&cat, &CountQuery::new(Field::Cast).explode());
        let occurrences: usize = cat
            .titles()
            .iter()
            .map(|t| t.occurrences(Field::Cast, true).len())
            .sum();
        assert_eq!(table.total(), occurrences as u64);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let table = count_by_value(&example(), &movie_cast());
        let keys: Vec<String> = table.entries().iter().map(|(v, _)| v.to_string()).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn ties_at_top_n_cut_keep_first_encountered() {
        let titles = ["X", "Y", "Z", "Y", "W"]
            .iter()
            .map(|c| titled(TitleKind::Movie, 2020, Some(c)))
            .collect();
        let cat = Catalog::from_titles(titles);
        let table = count_by_value(&cat, &CountQuery::new(Field::Cast).explode().top(3));
        let keys: Vec<String> = table.entries().iter().map(|(v, _)| v.to_string()).collect();
        assert_eq!(keys, vec!["Y", "X", "Z"]);
    }

    #[test]
    fn top_n_keeps_largest_counts() {
        let mut titles = Vec::new();
        for (country, n) in [("India", 1), ("United States", 4), ("Japan", 2), ("France", 3)] {
            for _ in 0..n {
                let mut t = Title::new(TitleKind::Movie, 2020);
                t.country = Some(country.to_string());
                titles.push(t);
            }
        }
        let cat = Catalog::from_titles(titles);
        let full = count_by_value(&cat, &CountQuery::new(Field::Country).explode());
        let top = count_by_value(&cat, &CountQuery::new(Field::Country).explode().top(2));

        assert_eq!(top.len(), 2);
        let min_kept = top.entries().iter().map(|(_, c)| *c).min().unwrap();
        for (_, excluded) in &full.entries()[2..] {
            assert!(min_kept >= *excluded);
        }
        assert_eq!(most_frequent(&top).unwrap(), &Value::from("United States"));
    }

    #[test]
    fn years_sort_by_key() {
        let cat = Catalog::from_titles(vec![
            Title::new(TitleKind::Movie, 2021),
            Title::new(TitleKind::Movie, 1999),
            Title::new(TitleKind::Movie, 2021),
            Title::new(TitleKind::TvShow, 2005),
        ]);
        let query = CountQuery::new(Field::ReleaseYear)
            .filter(RowFilter::all().with_eq(Field::Type, TitleKind::Movie));
        let table = count_by_value(&cat, &query).sorted_by_key();
        assert_eq!(
            table.entries(),
            &[(Value::Integer(1999), 1), (Value::Integer(2021), 2)]
        );
    }

    #[test]
    fn missing_months_are_excluded_from_mode() {
        let mut a = Title::new(TitleKind::Movie, 2020);
        a.date_added = Some("September 24, 2021".into());
        let b = Title::new(TitleKind::Movie, 2020);
        let c = Title::new(TitleKind::Movie, 2020);
        let cat = Catalog::from_titles(vec![a, b, c]).with_month_added();

        let month = most_frequent_in(&cat, Field::MonthAdded).unwrap();
        assert_eq!(month, Value::from("September"));
    }

    #[test]
    fn empty_column_has_no_mode() {
        let cat = Catalog::from_titles(vec![Title::new(TitleKind::Movie, 2020)]).with_month_added();
        let err = most_frequent_in(&cat, Field::MonthAdded).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDomain { column } if column == "month_added"));
    }

    #[test]
    fn counting_is_idempotent() {
        let cat = example();
        let q = movie_cast().top(10);
        assert_eq!(count_by_value(&cat, &q), count_by_value(&cat, &q));
    }
}
