//! Reads ASRS CSV exports into a normalized [`Dataset`].
//!
//! ASRS exports carry two header rows: a banner row grouping columns into
//! categories ("Time", "Place", "Aircraft 1", ...) followed by the real
//! column header. The banner is skipped. Per-aircraft and per-person
//! columns repeat in wide exports, so the first occurrence of a known
//! header feeds the canonical field and later ones are kept as
//! passthrough columns suffixed `.1`, `.2`, ...

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use asrs_dashboard_incident_models::IncidentRecord;
use chrono::Datelike as _;

use crate::columns::Column;
use crate::parsing::{clean_cell, extract_airport_code, parse_year_month};
use crate::{Dataset, DatasetError};

/// Loads and concatenates a fixed list of CSV files.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    paths: Vec<PathBuf>,
}

impl DatasetLoader {
    /// Creates a loader over the given files, read in order.
    #[must_use]
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured file paths.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Reads every existing file and builds a fresh [`Dataset`].
    ///
    /// Missing files are logged and skipped.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::NoDataSource`] if none of the files exist
    /// * [`DatasetError::Io`] / [`DatasetError::Csv`] if an existing file
    ///   cannot be read or parsed
    pub fn load(&self) -> Result<Dataset, DatasetError> {
        let mut records = Vec::new();
        let mut source_files = Vec::new();

        for path in &self.paths {
            if !path.exists() {
                log::warn!("CSV file not found: {}", path.display());
                continue;
            }

            log::info!("Loading CSV: {}", path.display());
            let file = File::open(path).map_err(|source| DatasetError::Io {
                path: path.clone(),
                source,
            })?;

            let name = file_name(path);
            let rows = read_incidents(file, &name)
                .map_err(|source| csv_error(path, source))?;

            log::info!("Loaded {} rows from {name}", rows.len());
            records.extend(rows);
            source_files.push(name);
        }

        if source_files.is_empty() {
            return Err(DatasetError::NoDataSource {
                searched: self.paths.clone(),
            });
        }

        log::info!("Total rows loaded: {}", records.len());

        Ok(Dataset::new(records, source_files))
    }
}

/// Reader failures become [`DatasetError::Io`], everything else
/// [`DatasetError::Csv`].
fn csv_error(path: &Path, source: csv::Error) -> DatasetError {
    if !source.is_io_error() {
        return DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        };
    }

    match source.into_kind() {
        csv::ErrorKind::Io(source) => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => unreachable!(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Parses one ASRS export from any reader.
///
/// Input with fewer than two rows yields no records. Cells are decoded
/// lossily so stray non-UTF-8 bytes in narratives do not fail the file.
///
/// # Errors
///
/// Returns [`csv::Error`] if the underlying reader fails.
pub fn read_incidents<R: Read>(
    reader: R,
    source_file: &str,
) -> Result<Vec<IncidentRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = reader.byte_records();

    // Category banner row
    match rows.next() {
        Some(banner) => {
            banner?;
        }
        None => return Ok(Vec::new()),
    }

    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let layout = HeaderLayout::new(&header?);

    rows.map(|row| row.map(|r| layout.normalize(&r, source_file)))
        .collect()
}

/// Column positions resolved from a header row.
#[derive(Debug)]
struct HeaderLayout {
    canonical: Vec<(Column, usize)>,
    passthrough: Vec<(String, usize)>,
}

impl HeaderLayout {
    fn new(header: &csv::ByteRecord) -> Self {
        let mut canonical: Vec<(Column, usize)> = Vec::new();
        let mut passthrough = Vec::new();
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();

        for (idx, raw) in header.iter().enumerate() {
            let name = String::from_utf8_lossy(raw).trim().to_string();
            if name.is_empty() {
                continue;
            }

            let occurrence = seen.entry(name.clone()).or_insert(0);
            let first = *occurrence == 0;
            *occurrence += 1;

            match Column::from_raw_header(&name) {
                Some(column) if first => canonical.push((column, idx)),
                _ if first => passthrough.push((name, idx)),
                _ => passthrough.push((format!("{name}.{}", *occurrence - 1), idx)),
            }
        }

        Self {
            canonical,
            passthrough,
        }
    }

    fn cell(row: &csv::ByteRecord, idx: usize) -> Option<String> {
        row.get(idx)
            .and_then(|raw| clean_cell(&String::from_utf8_lossy(raw)))
    }

    fn normalize(&self, row: &csv::ByteRecord, source_file: &str) -> IncidentRecord {
        let mut record = IncidentRecord {
            source_file: source_file.to_string(),
            ..IncidentRecord::default()
        };

        for (column, idx) in &self.canonical {
            column.assign(&mut record, Self::cell(row, *idx));
        }

        for (name, idx) in &self.passthrough {
            if let Some(value) = Self::cell(row, *idx) {
                record.extra.insert(name.clone(), value);
            }
        }

        record.date_parsed = record.date_raw.as_deref().and_then(parse_year_month);
        record.year = record.date_parsed.map(|d| d.year());
        record.airport_code = record.airport.as_deref().and_then(extract_airport_code);

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT_A: &str = "\
Time,Place,Place,Events,Report 1,Report 1
ACN,Date,Locale Reference,Contributing Factors / Situations,Narrative,Synopsis
1001,201703,ORD.Airport,Human Factors; Procedure,Taxied past hold short line.,Runway incursion at ORD.
1002,201801,KLAX.Airport,Human Factors,,Pilot crossed runway.
1003,bogus,ne.Airport,,Nothing happened.,
";

    const EXPORT_B: &str = "\
Time,Place,Aircraft 1,Aircraft 2,
ACN,Date,Make Model Name,Make Model Name,Crew Size
2001,202002,B737,A320,2
";

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("asrs-loader-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn normalizes_known_columns() {
        let rows = read_incidents(EXPORT_A.as_bytes(), "a.csv").unwrap();
        assert_eq!(rows.len(), 3);

        let first = &rows[0];
        assert_eq!(first.acn, "1001");
        assert_eq!(first.year, Some(2017));
        assert_eq!(first.airport_code.as_deref(), Some("ORD"));
        assert_eq!(
            first.contributing_factors.as_deref(),
            Some("Human Factors; Procedure")
        );
        assert_eq!(first.source_file, "a.csv");

        let second = &rows[1];
        assert_eq!(second.airport_code.as_deref(), Some("KLAX"));
        assert!(second.narrative.is_none());
        assert_eq!(second.synopsis.as_deref(), Some("Pilot crossed runway."));
    }

    #[test]
    fn malformed_values_become_null() {
        let rows = read_incidents(EXPORT_A.as_bytes(), "a.csv").unwrap();
        let third = &rows[2];
        assert_eq!(third.date_raw.as_deref(), Some("bogus"));
        assert!(third.date_parsed.is_none());
        assert!(third.year.is_none());
        assert!(third.airport_code.is_none());
        assert!(third.contributing_factors.is_none());
    }

    #[test]
    fn duplicate_headers_keep_first_and_pass_through_rest() {
        let rows = read_incidents(EXPORT_B.as_bytes(), "b.csv").unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.aircraft_type.as_deref(), Some("B737"));
        assert_eq!(row.extra.get("Make Model Name.1").map(String::as_str), Some("A320"));
        assert_eq!(row.extra.get("Crew Size").map(String::as_str), Some("2"));
        assert!(row.synopsis.is_none());
        assert!(row.airport.is_none());
    }

    #[test]
    fn short_input_yields_no_rows() {
        assert!(read_incidents("".as_bytes(), "x.csv").unwrap().is_empty());
        assert!(read_incidents("Time,Place\n".as_bytes(), "x.csv").unwrap().is_empty());
    }

    #[test]
    fn concatenates_files_in_order_and_skips_missing() {
        let dir = temp_dir();
        std::fs::write(dir.join("a.csv"), EXPORT_A).unwrap();
        std::fs::write(dir.join("b.csv"), EXPORT_B).unwrap();

        let loader = DatasetLoader::new([
            dir.join("a.csv"),
            dir.join("missing.csv"),
            dir.join("b.csv"),
        ]);
        assert_eq!(loader.paths().len(), 3);
        let dataset = loader.load().unwrap();

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.source_files(), ["a.csv", "b.csv"]);
        assert_eq!(dataset.records()[3].acn, "2001");
        assert_eq!(dataset.records()[3].source_file, "b.csv");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn all_files_missing_is_fatal() {
        let dir = temp_dir();
        let loader = DatasetLoader::new([dir.join("a.csv"), dir.join("b.csv")]);
        let err = loader.load().unwrap_err();
        assert!(matches!(err, DatasetError::NoDataSource { ref searched } if searched.len() == 2));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unreadable_file_fails_the_load() {
        let dir = temp_dir();
        std::fs::write(dir.join("b.csv"), EXPORT_B).unwrap();
        std::fs::create_dir_all(dir.join("a.csv")).unwrap();

        let loader = DatasetLoader::new([dir.join("a.csv"), dir.join("b.csv")]);
        let err = loader.load().unwrap_err();

        assert!(matches!(err, DatasetError::Io { ref path, .. } if path == &dir.join("a.csv")));
        assert!(err.to_string().starts_with("I/O error reading"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn io_and_parse_failures_are_distinguished() {
        let path = PathBuf::from("a.csv");

        let io = csv::Error::from(std::io::Error::other("disk gone"));
        assert!(matches!(csv_error(&path, io), DatasetError::Io { .. }));

        let bad: &[u8] = b"x\n\xff\xfe\n";
        let utf8 = csv::Reader::from_reader(bad)
            .records()
            .find_map(Result::err)
            .unwrap();
        assert!(matches!(csv_error(&path, utf8), DatasetError::Csv { .. }));
    }

    #[test]
    fn loading_twice_is_identical() {
        let dir = temp_dir();
        std::fs::write(dir.join("a.csv"), EXPORT_A).unwrap();
        let loader = DatasetLoader::new([dir.join("a.csv")]);

        let first = loader.load().unwrap();
        let second = loader.load().unwrap();
        assert_eq!(first.records(), second.records());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
