use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};

use super::model::{Catalog, Title};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with at least `type` and `release_year`
/// * `.json` – `[{ "type": "Movie", "release_year": 2019, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let titles = match ext.as_str() {
        "csv" => std::fs::File::open(path)
            .context("opening CSV")
            .and_then(read_csv),
        "json" => std::fs::read_to_string(path)
            .context("reading JSON file")
            .and_then(|text| parse_json(&text)),
        other => Err(anyhow::anyhow!("Unsupported file extension: .{other}")),
    }
    .map_err(|e| AnalysisError::load(path, e))?;

    log::info!("Loaded {} titles from {}", titles.len(), path.display());
    Ok(Catalog::from_titles(titles))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV rows into typed titles. Columns beyond those in [`Title`]
/// are ignored; an empty cell in an optional column is missing.
pub fn read_csv<R: Read>(input: R) -> anyhow::Result<Vec<Title>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in ["type", "release_year"] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut titles = Vec::new();
    for (row_no, result) in reader.deserialize::<Title>().enumerate() {
        let title = result.with_context(|| format!("CSV row {row_no}"))?;
        titles.push(title);
    }
    Ok(titles)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn parse_json(text: &str) -> anyhow::Result<Vec<Title>> {
    let titles: Vec<Title> = serde_json::from_str(text).context("parsing JSON")?;
    Ok(titles
        .into_iter()
        .map(|mut t| {
            // `null` and "" mean the same thing in both formats
            for cell in [
                &mut t.show_id,
                &mut t.title,
                &mut t.director,
                &mut t.cast,
                &mut t.country,
                &mut t.date_added,
            ] {
                if cell.as_deref() == Some("") {
                    *cell = None;
                }
            }
            t
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TitleKind;

    const SAMPLE: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13
s2,TV Show,Blood & Water,,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA
";

    #[test]
    fn csv_rows_are_typed() {
        let titles = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].kind, TitleKind::Movie);
        assert_eq!(titles[0].release_year, 2020);
        assert_eq!(titles[0].cast, None);
        assert_eq!(titles[1].kind, TitleKind::TvShow);
        assert_eq!(titles[1].cast.as_deref(), Some("Ama Qamata, Khosi Ngema"));
        assert_eq!(titles[1].director, None);
    }

    #[test]
    fn non_integer_year_is_rejected() {
        let bad = "type,release_year\nMovie,twenty\n";
        let err = read_csv(bad.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let bad = "type,release_year\nPodcast,2020\n";
        assert!(read_csv(bad.as_bytes()).is_err());
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let bad = "type,title\nMovie,Foo\n";
        let err = read_csv(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("release_year"));
    }

    #[test]
    fn json_records_load() {
        let text = r#"[
            {"type": "Movie", "release_year": 2019, "cast": "A, B", "director": null},
            {"type": "TV Show", "release_year": 2021, "country": ""}
        ]"#;
        let titles = parse_json(text).unwrap();
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].cast.as_deref(), Some("A, B"));
        assert_eq!(titles[0].director, None);
        assert_eq!(titles[1].country, None);
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::Load { .. }));
    }

    #[test]
    fn unsupported_extension_is_load_error() {
        let err = load_file(Path::new("catalog.parquet")).unwrap_err();
        assert!(matches!(err, AnalysisError::Load { .. }));
    }
}
