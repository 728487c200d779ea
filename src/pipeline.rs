use std::path::PathBuf;

use crate::analysis::compare::{compare, Comparison};
use crate::analysis::counts::{count_by_value, most_frequent_in, CountQuery, FrequencyTable};
use crate::chart::{Chart, ChartStyle};
use crate::data::filter::RowFilter;
use crate::data::loader::load_file;
use crate::data::model::{Catalog, Field, TitleKind, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub dataset_path: PathBuf,
    /// Entries kept in the actor / director / country charts.
    pub top_n: usize,
    /// First release year of the "recent years" comparison.
    pub recent_since: i64,
    pub category_a: TitleKind,
    pub category_b: TitleKind,
    /// Figure size of every chart, in inches.
    pub figsize: (f32, f32),
    pub bar_width: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            dataset_path: PathBuf::from("./netflix.csv"),
            top_n: 10,
            recent_since: 2015,
            category_a: TitleKind::Movie,
            category_b: TitleKind::TvShow,
            figsize: (15.0, 8.0),
            bar_width: 0.8,
        }
    }
}

// ---------------------------------------------------------------------------
// Report – everything one run produces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub month_with_most_releases: Value,
    pub titles_loaded: usize,
    /// Charts in display order.
    pub charts: Vec<Chart>,
}

impl Report {
    pub fn month_line(&self) -> String {
        format!("The month with most releases is {}", self.month_with_most_releases)
    }
}

/// Load the configured dataset and build the report.
pub fn run(config: &PipelineConfig) -> Result<Report> {
    let catalog = load_file(&config.dataset_path)?.with_month_added();
    build_report(&catalog, config)
}

fn of_kind(kind: TitleKind) -> RowFilter {
    RowFilter::all().with_eq(Field::Type, kind)
}

/// Plural used in axis captions and titles ("Movies", "TV Shows").
fn plural(kind: TitleKind) -> String {
    format!("{}s", kind.label())
}

/// Top `n` entries of an exploded list column for one kind of title.
fn top_credits(catalog: &Catalog, field: Field, kind: TitleKind, n: usize) -> FrequencyTable {
    count_by_value(
        catalog,
        &CountQuery::new(field).filter(of_kind(kind)).explode().top(n),
    )
}

/// The fixed analysis sequence over an already-derived catalog.
pub fn build_report(catalog: &Catalog, config: &PipelineConfig) -> Result<Report> {
    let (a, b) = (config.category_a, config.category_b);
    let n = config.top_n;

    let movies_per_year =
        count_by_value(catalog, &CountQuery::new(Field::ReleaseYear).filter(of_kind(a))).sorted_by_key();
    let per_year = compare(catalog, &Comparison::new(Field::Type, Field::ReleaseYear, a, b));
    let month = most_frequent_in(catalog, Field::MonthAdded)?;

    let a_actors = top_credits(catalog, Field::Cast, a, n);
    let a_directors = top_credits(catalog, Field::Director, a, n);
    let b_actors = top_credits(catalog, Field::Cast, b, n);
    let b_directors = top_credits(catalog, Field::Director, b, n);

    let recent = compare(
        catalog,
        &Comparison::new(Field::Type, Field::ReleaseYear, a, b)
            .since(config.recent_since)
            .labeled(&plural(a), &plural(b)),
    );
    let countries = count_by_value(catalog, &CountQuery::new(Field::Country).explode().top(n));

    let credit_style = |x: &str, kind: TitleKind, title: String| {
        ChartStyle::bar(x, &format!("Number of {}", plural(kind)), &title)
            .rotation(45.0)
    };

    let charts = vec![
        Chart::single(
            movies_per_year,
            ChartStyle::bar(
                "Year",
                &format!("Number of {}", plural(a)),
                &format!("Number of {} Released Per Year", plural(a)),
            ),
        ),
        Chart::grouped(
            per_year,
            ChartStyle::comparison(Field::Type, Field::ReleaseYear).title(&format!(
                "Comparison of {} and {} Released Per Year",
                plural(a),
                plural(b)
            )),
        ),
        Chart::single(
            a_actors,
            credit_style("Actor", a, format!("Top {n} Actors in {}", plural(a))),
        ),
        Chart::single(
            b_actors,
            credit_style("Actor", b, format!("Top {n} Actors in {}", plural(b))),
        ),
        Chart::single(
            a_directors,
            credit_style("Director", a, format!("Top {n} Directors in {}", plural(a))),
        ),
        Chart::single(
            b_directors,
            credit_style("Director", b, format!("Top {n} Directors in {}", plural(b))),
        ),
        Chart::grouped(
            recent,
            ChartStyle::bar(
                "Year",
                "Number of Releases",
                &format!(
                    "Comparison of {} and {} Released in Recent Years (Since {})",
                    plural(a),
                    plural(b),
                    config.recent_since
                ),
            )
            .rotation(0.0),
        ),
        Chart::single(
            countries,
            ChartStyle::bar("Country", "Number of Titles", &format!("Top {n} Countries by Number of Titles"))
                .rotation(45.0),
        ),
    ];
    let (width, height) = config.figsize;
    let charts: Vec<Chart> = charts
        .into_iter()
        .map(|mut chart| {
            chart.style = chart.style.figsize(width, height).bar_width(config.bar_width);
            chart
        })
        .collect();

    log::debug!("Built {} charts from {} titles", charts.len(), catalog.len());
    Ok(Report {
        month_with_most_releases: month,
        titles_loaded: catalog.len(),
        charts,
    })
}
