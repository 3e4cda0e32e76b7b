//! CSV manifests: a header line naming the columns, then one record per row.
//!
//! Column order is free and unknown columns are ignored. Cells are trimmed;
//! an empty cell counts as an absent value.

use std::io::Read;

use serde::Deserialize;
use vidsplit_common::{Error, ManifestFormat, Result};

use super::RawRecord;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    length: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    rename_to: Option<String>,
}

pub(super) fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize::<CsvRecord>()
        .map(|row| {
            let row = row.map_err(|e| Error::manifest_invalid(ManifestFormat::Csv, e.to_string()))?;
            Ok(RawRecord {
                start_time: row.start_time,
                length: row.length,
                end_time: row.end_time,
                rename_to: row.rename_to,
            })
        })
        .collect()
}
