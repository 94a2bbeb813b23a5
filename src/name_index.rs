use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{GeoRangeError, Result};
use crate::model::{LocationRecord, NameField, GEONAME_ID};
use crate::utils::csv_reader_builder;

/// Lowercased location name -> geoname ids carrying that name.
///
/// Built once from a locations table and read-only afterwards.
#[derive(Debug, Default)]
pub struct NameIndex {
    map: HashMap<String, HashSet<String>>,
}

impl NameIndex {
    pub fn from_path(path: &Path) -> Result<NameIndex> {
        let rdr = csv_reader_builder()
            .from_path(path)
            .map_err(|e| GeoRangeError::csv(path, e))?;
        let index = Self::from_csv(rdr, path)?;
        debug!("Indexed {} names from {}", index.len(), path.display());
        Ok(index)
    }

    /// Builds the index from an already opened reader. `path` is only used
    /// to label errors.
    pub fn from_csv<R: Read>(mut rdr: csv::Reader<R>, path: &Path) -> Result<NameIndex> {
        check_headers(&mut rdr, path)?;

        let mut index = NameIndex::default();
        for result in rdr.deserialize() {
            let record: LocationRecord = result.map_err(|e| GeoRangeError::csv(path, e))?;
            index.insert(&record);
        }
        Ok(index)
    }

    fn insert(&mut self, record: &LocationRecord) {
        let Some(id) = record.geoname_id.as_deref() else {
            return;
        };
        for key in record.name_keys() {
            self.map.entry(key).or_default().insert(id.to_string());
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn get(&self, name: &str) -> Option<&HashSet<String>> {
        self.map.get(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn check_headers<R: Read>(rdr: &mut csv::Reader<R>, path: &Path) -> Result<()> {
    let headers = rdr.headers().map_err(|e| GeoRangeError::csv(path, e))?;
    let has = |name: &str| headers.iter().any(|h| h == name);

    let mut missing = Vec::new();
    if !has(GEONAME_ID) {
        missing.push(GEONAME_ID.to_string());
    }
    if !NameField::ALL.iter().any(|field| has(field.column())) {
        let names: Vec<&str> = NameField::ALL.iter().map(|field| field.column()).collect();
        missing.push(names.join("|"));
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GeoRangeError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        })
    }
}
