//! CSV-based bracket table loader
//!
//! Expected columns: `lower,upper,rate_percent`. Leave `upper` empty on the
//! top bracket. Rates are percentages (22 = 22%).

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Reader;

use super::brackets::{BracketSet, TaxBracket};

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    lower: f64,
    upper: Option<f64>,
    rate_percent: f64,
}

impl CsvRow {
    fn to_bracket(&self) -> TaxBracket {
        TaxBracket {
            lower: self.lower,
            upper: self.upper,
            rate: self.rate_percent / 100.0,
        }
    }
}

/// Load a bracket table from a CSV file
pub fn load_bracket_set<P: AsRef<Path>>(path: P) -> Result<BracketSet> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)
        .with_context(|| format!("opening bracket table {}", path.display()))?;
    read_rows(reader).with_context(|| format!("reading bracket table {}", path.display()))
}

/// Load a bracket table from any reader (string buffer, stdin, ...)
pub fn load_bracket_set_from_reader<R: Read>(reader: R) -> Result<BracketSet> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: Read>(mut reader: Reader<R>) -> Result<BracketSet> {
    let mut brackets = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        brackets.push(row.to_bracket());
    }
    Ok(BracketSet::new(brackets)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reader() {
        let data = "lower,upper,rate_percent\n0,10000,10\n10000,40000,20\n40000,,30\n";
        let set = load_bracket_set_from_reader(data.as_bytes()).unwrap();

        assert_eq!(set.brackets().len(), 3);
        assert_eq!(set.brackets()[2].upper, None);
        assert!((set.brackets()[1].rate - 0.20).abs() < 1e-12);
        assert!((set.evaluate(25_000.0).total_tax - 4_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_gapped_table() {
        let data = "lower,upper,rate_percent\n0,10000,10\n12000,,20\n";
        let err = load_bracket_set_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid bracket table"));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_bracket_set("does/not/exist.csv").is_err());
    }
}
