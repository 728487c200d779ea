use super::model::{Catalog, Field, Title, Value};

// ---------------------------------------------------------------------------
// Row predicate: equality constraints plus a release-year lower bound
// ---------------------------------------------------------------------------

/// Conjunction of row constraints. The default filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    equals: Vec<(Field, Value)>,
    min_release_year: Option<i64>,
}

impl RowFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep rows whose `field` equals `value`.
    pub fn with_eq(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.equals.push((field, value.into()));
        self
    }

    /// Keep rows released in `year` or later.
    pub fn since(mut self, year: i64) -> Self {
        self.min_release_year = Some(match self.min_release_year {
            Some(current) => current.max(year),
            None => year,
        });
        self
    }

    /// A row passes when every equality holds and it is recent enough.
    /// A missing cell never equals anything.
    pub fn matches(&self, title: &Title) -> bool {
        if let Some(min) = self.min_release_year {
            if title.release_year < min {
                return false;
            }
        }
        self.equals
            .iter()
            .all(|(field, expected)| title.value(*field).as_ref() == Some(expected))
    }
}

/// Rows of `catalog` passing `filter`, in input order.
pub fn filtered<'a>(catalog: &'a Catalog, filter: &'a RowFilter) -> impl Iterator<Item = &'a Title> {
    catalog.titles().iter().filter(move |t| filter.matches(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TitleKind;

    fn catalog() -> Catalog {
        Catalog::from_titles(vec![
            Title::new(TitleKind::Movie, 2014),
            Title::new(TitleKind::Movie, 2016),
            Title::new(TitleKind::TvShow, 2019),
        ])
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let cat = catalog();
        assert_eq!(filtered(&cat, &RowFilter::all()).count(), 3);
    }

    #[test]
    fn equality_and_year_bound_combine() {
        let cat = catalog();
        let movies = RowFilter::all().with_eq(Field::Type, TitleKind::Movie);
        assert_eq!(filtered(&cat, &movies).count(), 2);

        let recent_movies = movies.since(2015);
        let years: Vec<i64> = filtered(&cat, &recent_movies).map(|t| t.release_year).collect();
        assert_eq!(years, vec![2016]);
    }

    #[test]
    fn missing_cell_fails_equality() {
        let cat = catalog();
        let f = RowFilter::all().with_eq(Field::Country, "India");
        assert_eq!(filtered(&cat, &f).count(), 0);
    }
}
