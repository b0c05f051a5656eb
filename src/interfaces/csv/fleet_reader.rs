use crate::domain::fleet::{CarEntry, FleetData};
use crate::error::{RentalError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const CAR_ENTRY_FIELDS: usize = 6;

/// Reads a company fleet file.
///
/// The format is line based: `#` starts a comment, `-name,region1:region2`
/// names the company and its regions, and every other line is a car entry
/// `type,capacity,trunk,price,smoking,count`.
pub struct FleetReader<R: Read> {
    reader: csv::Reader<R>,
}

impl FleetReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> FleetReader<R> {
    /// Creates a new `FleetReader` from any `Read` source.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Parses the whole file. Any malformed line fails the read.
    pub fn read(mut self) -> Result<FleetData> {
        let mut name: Option<String> = None;
        let mut regions = Vec::new();
        let mut entries = Vec::new();

        for record in self.reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());

            if let Some(company) = record.get(0).and_then(|f| f.strip_prefix('-')) {
                if company.is_empty() {
                    return Err(bad_data(line, "empty company name"));
                }
                name = Some(company.to_string());
                regions = record
                    .get(1)
                    .map(|r| {
                        r.split(':')
                            .map(str::trim)
                            .filter(|r| !r.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                continue;
            }

            if record.len() != CAR_ENTRY_FIELDS {
                return Err(bad_data(
                    line,
                    format!("expected {} fields, found {}", CAR_ENTRY_FIELDS, record.len()),
                ));
            }
            let entry: CarEntry = record
                .deserialize(None)
                .map_err(|e| bad_data(line, e.to_string()))?;
            if !entry.trunk_space.is_finite() {
                return Err(bad_data(
                    line,
                    format!("trunk space must be a finite number, found {}", entry.trunk_space),
                ));
            }
            if let Some(known) = entries.iter().find(|k: &&CarEntry| k.name == entry.name)
                && known.car_type() != entry.car_type()
            {
                return Err(bad_data(
                    line,
                    format!("conflicting definition of car type {}", entry.name),
                ));
            }
            entries.push(entry);
        }

        let name = name.ok_or_else(|| bad_data(0, "missing company header line"))?;
        Ok(FleetData {
            name,
            regions,
            entries,
        })
    }
}

fn bad_data(line: u64, reason: impl Into<String>) -> RentalError {
    RentalError::BadData {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_fleet() {
        let data = "# Hertz fleet\n\
                    -Hertz,Leuven:Brussels\n\
                    Compact,4,2.5,40.0,false,3\n\
                    # vans\n\
                    Van,8,6.0,89.5,true,1\n";
        let fleet = FleetReader::new(data.as_bytes()).read().unwrap();

        assert_eq!(fleet.name, "Hertz");
        assert_eq!(fleet.regions, vec!["Leuven", "Brussels"]);
        assert_eq!(fleet.entries.len(), 2);
        assert_eq!(fleet.entries[0].count, 3);
        assert_eq!(fleet.entries[1].price_per_day, dec!(89.5));
        assert!(fleet.entries[1].smoking_allowed);
    }

    #[test]
    fn test_reader_malformed_number() {
        let data = "-Hertz,Leuven\nCompact,four,2.5,40.0,false,3\n";
        let result = FleetReader::new(data.as_bytes()).read();
        assert!(matches!(result, Err(RentalError::BadData { line: 2, .. })));
    }

    #[test]
    fn test_reader_non_finite_trunk_space() {
        for trunk in ["NaN", "inf", "-inf"] {
            let data = format!("-Avis,Leuven\nCompact,4,{},40.0,false,2\n", trunk);
            let result = FleetReader::new(data.as_bytes()).read();
            assert!(
                matches!(result, Err(RentalError::BadData { line: 2, .. })),
                "{trunk} accepted"
            );
        }
    }

    #[test]
    fn test_reader_wrong_field_count() {
        let data = "-Hertz,Leuven\nCompact,4,2.5,40.0,false\n";
        let result = FleetReader::new(data.as_bytes()).read();
        assert!(matches!(result, Err(RentalError::BadData { .. })));
    }

    #[test]
    fn test_reader_missing_header() {
        let data = "Compact,4,2.5,40.0,false,3\n";
        let result = FleetReader::new(data.as_bytes()).read();
        assert!(matches!(result, Err(RentalError::BadData { line: 0, .. })));
    }

    #[test]
    fn test_reader_conflicting_type_definitions() {
        let data = "-Hertz,Leuven\nCompact,4,2.5,40.0,false,3\nCompact,4,2.5,45.0,false,1\n";
        let result = FleetReader::new(data.as_bytes()).read();
        assert!(matches!(result, Err(RentalError::BadData { line: 3, .. })));
    }
}
