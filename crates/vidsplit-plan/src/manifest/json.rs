//! JSON manifests: an array of record objects.

use std::io::Read;

use serde::Deserialize;
use vidsplit_common::{Error, ManifestFormat, Result};

use super::RawRecord;

/// Times may be written as numbers or strings; names are normally strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    start_time: Option<Scalar>,
    #[serde(default)]
    length: Option<Scalar>,
    #[serde(default)]
    end_time: Option<Scalar>,
    #[serde(default)]
    rename_to: Option<Scalar>,
}

impl From<JsonRecord> for RawRecord {
    fn from(r: JsonRecord) -> Self {
        RawRecord {
            start_time: r.start_time.map(Into::into),
            length: r.length.map(Into::into),
            end_time: r.end_time.map(Into::into),
            rename_to: r.rename_to.map(Into::into),
        }
    }
}

pub(super) fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let records: Vec<JsonRecord> = serde_json::from_reader(reader)
        .map_err(|e| Error::manifest_invalid(ManifestFormat::Json, e.to_string()))?;
    Ok(records.into_iter().map(RawRecord::from).collect())
}
