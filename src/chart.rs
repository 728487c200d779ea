use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::analysis::compare::ComparisonTable;
use crate::analysis::counts::FrequencyTable;
use crate::data::model::Field;
use crate::error::{AnalysisError, Result};

/// Screen points per figure inch.
pub const POINTS_PER_INCH: f32 = 80.0;

// ---------------------------------------------------------------------------
// ChartStyle – display parameters of one chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    /// Figure size in inches.
    pub figsize: (f32, f32),
    /// X tick label rotation in degrees, counter-clockwise.
    pub rotation: f32,
    /// Fraction of a category slot covered by bars, in (0, 1].
    pub bar_width: f32,
    pub legend_title: Option<String>,
}

impl ChartStyle {
    /// Single-series defaults.
    pub fn bar(x_label: &str, y_label: &str, title: &str) -> Self {
        ChartStyle {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            title: title.to_string(),
            figsize: (12.0, 6.0),
            rotation: 90.0,
            bar_width: 0.8,
            legend_title: None,
        }
    }

    /// Defaults for a category comparison: axis caption and legend title
    /// come from the column names.
    pub fn comparison(category: Field, value: Field) -> Self {
        ChartStyle {
            x_label: value.capitalized(),
            y_label: "Number of Releases".to_string(),
            title: "Comparison Chart".to_string(),
            figsize: (15.0, 8.0),
            rotation: 90.0,
            bar_width: 0.8,
            legend_title: Some(category.capitalized()),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn figsize(mut self, width: f32, height: f32) -> Self {
        self.figsize = (width, height);
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn bar_width(mut self, width: f32) -> Self {
        self.bar_width = width.clamp(f32::EPSILON, 1.0);
        self
    }

    /// Figure size in screen points.
    pub fn size_points(&self) -> [f32; 2] {
        [self.figsize.0 * POINTS_PER_INCH, self.figsize.1 * POINTS_PER_INCH]
    }
}

// ---------------------------------------------------------------------------
// Chart – data plus style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Single(FrequencyTable),
    Grouped(ComparisonTable),
}

/// One bar series prepared for drawing: name, and one height per category slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub heights: Vec<f64>,
}

impl ChartData {
    /// Tick labels in slot order.
    pub fn categories(&self) -> Vec<String> {
        match self {
            ChartData::Single(t) => t.entries().iter().map(|(v, _)| v.to_string()).collect(),
            ChartData::Grouped(t) => t.rows().map(|(v, _)| v.to_string()).collect(),
        }
    }

    pub fn series(&self) -> Vec<Series> {
        match self {
            ChartData::Single(t) => vec![Series {
                name: t.field.name().to_string(),
                heights: t.entries().iter().map(|(_, c)| *c as f64).collect(),
            }],
            ChartData::Grouped(t) => vec![
                Series {
                    name: t.names.0.clone(),
                    heights: t.rows().map(|(_, (a, _))| a as f64).collect(),
                },
                Series {
                    name: t.names.1.clone(),
                    heights: t.rows().map(|(_, (_, b))| b as f64).collect(),
                },
            ],
        }
    }

    /// Write the table as CSV: `key,count`, or `key,<a>,<b>` for comparisons.
    pub fn write_csv<W: Write>(&self, out: W) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        match self {
            ChartData::Single(t) => {
                writer.write_record([t.field.name(), "count"])?;
                for (key, count) in t.entries() {
                    writer.write_record([key.to_string(), count.to_string()])?;
                }
            }
            ChartData::Grouped(t) => {
                writer.write_record([t.field.name(), t.names.0.as_str(), t.names.1.as_str()])?;
                for (key, (a, b)) in t.rows() {
                    writer.write_record([key.to_string(), a.to_string(), b.to_string()])?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub style: ChartStyle,
    pub data: ChartData,
}

impl Chart {
    pub fn single(table: FrequencyTable, style: ChartStyle) -> Self {
        Chart {
            style,
            data: ChartData::Single(table),
        }
    }

    pub fn grouped(table: ComparisonTable, style: ChartStyle) -> Self {
        Chart {
            style,
            data: ChartData::Grouped(table),
        }
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        std::fs::File::create(path)
            .context("creating export file")
            .and_then(|file| self.data.write_csv(file))
            .map_err(|source| AnalysisError::Export {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Exported '{}' to {}", self.style.title, path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bar geometry
// ---------------------------------------------------------------------------

/// Centre offset and width of each series' bar within a category slot.
/// The bars together span `bar_width`, centred on the tick.
pub fn bar_offsets(n_series: usize, bar_width: f32) -> Vec<(f64, f64)> {
    if n_series == 0 {
        return Vec::new();
    }
    let each = bar_width as f64 / n_series as f64;
    let start = -(bar_width as f64) / 2.0 + each / 2.0;
    (0..n_series)
        .map(|i| (start + i as f64 * each, each))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    #[test]
    fn defaults_match_chart_helpers() {
        let bar = ChartStyle::bar("Year", "Number of Movies", "t");
        assert_eq!(bar.figsize, (12.0, 6.0));
        assert_eq!(bar.rotation, 90.0);
        assert_eq!(bar.bar_width, 0.8);

        let cmp = ChartStyle::comparison(Field::Type, Field::ReleaseYear);
        assert_eq!(cmp.x_label, "Release_year");
        assert_eq!(cmp.y_label, "Number of Releases");
        assert_eq!(cmp.title, "Comparison Chart");
        assert_eq!(cmp.legend_title.as_deref(), Some("Type"));
        assert_eq!(cmp.size_points(), [1200.0, 640.0]);

        assert_eq!(bar.clone().bar_width(1.5).bar_width, 1.0);
        assert!(bar.bar_width(0.0).bar_width > 0.0);
    }

    #[test]
    fn grouped_bars_span_bar_width() {
        let offsets = bar_offsets(2, 0.8);
        assert_eq!(offsets.len(), 2);
        let (c0, w0) = offsets[0];
        let (c1, w1) = offsets[1];
        assert!((w0 - 0.4).abs() < 1e-6 && (w1 - 0.4).abs() < 1e-6);
        assert!((c0 + 0.2).abs() < 1e-6);
        assert!((c1 - 0.2).abs() < 1e-6);

        let single = bar_offsets(1, 0.8);
        assert!((single[0].0).abs() < 1e-6);
        assert!(bar_offsets(0, 0.8).is_empty());
    }

    #[test]
    fn single_table_exports_key_count() {
        let table = FrequencyTable::tally(
            Field::Country,
            ["India", "Japan", "India"].into_iter().map(Value::from),
        );
        let mut out = Vec::new();
        ChartData::Single(table).write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "country,count\nIndia,2\nJapan,1\n");
    }

    #[test]
    fn grouped_table_exports_both_series() {
        let a = FrequencyTable::tally(Field::ReleaseYear, [Value::Integer(2016)]);
        let b = FrequencyTable::tally(Field::ReleaseYear, [Value::Integer(2017)]);
        let table = ComparisonTable::from_tables(&a, &b, ("Movies".into(), "TV Shows".into()));
        let data = ChartData::Grouped(table);

        assert_eq!(data.categories(), vec!["2016", "2017"]);
        let series = data.series();
        assert_eq!(series[0].heights, vec![1.0, 0.0]);
        assert_eq!(series[1].heights, vec![0.0, 1.0]);

        let mut out = Vec::new();
        data.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "release_year,Movies,TV Shows\n2016,1,0\n2017,0,1\n"
        );
    }
}
