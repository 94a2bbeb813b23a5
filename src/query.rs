//! Name -> geoname ids -> CIDR blocks, per requested name.

use std::collections::HashSet;
use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::block_scan::BlockScanner;
use crate::config::OutputFormat;
use crate::model::Dataset;
use crate::name_index::NameIndex;
use crate::paths::DatasetPaths;

/// Ranges found for one requested name.
#[derive(Debug, PartialEq, Serialize)]
pub struct RangeSection {
    pub kind: Dataset,
    pub name: String,
    pub geoname_ids: Vec<String>,
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
}

/// Everything a batch produced. Unknown names land in `unresolved`;
/// known names with no blocks still get a section with empty lists.
#[derive(Debug, Default, PartialEq)]
pub struct QueryReport {
    pub sections: Vec<RangeSection>,
    pub unresolved: Vec<(Dataset, String)>,
}

/// Looks up `names` against one dataset whose paths are already resolved.
///
/// Each section is written to `out` as soon as both of its scans finish.
/// Names missing from the index get a one-line diagnostic on `err` and are
/// skipped.
pub fn query_dataset<W: Write, E: Write>(
    dataset: Dataset,
    paths: &DatasetPaths,
    names: &[String],
    format: OutputFormat,
    out: &mut W,
    err: &mut E,
) -> Result<QueryReport> {
    let index = NameIndex::from_path(&paths.locations)?;
    info!(
        "Loaded {} {} names from {}",
        index.len(),
        dataset,
        paths.locations.display()
    );

    let mut report = QueryReport::default();
    for name in names {
        let Some(ids) = index.get(name) else {
            debug!("Skipping unresolved {} name {:?}", dataset, name);
            writeln!(err, "[!] No geoname_id for {} '{}'", dataset, name)?;
            report.unresolved.push((dataset, name.clone()));
            continue;
        };

        let section = lookup(dataset, paths, name, ids)?;
        if section.ipv4.is_empty() && section.ipv6.is_empty() {
            info!("{} '{}' resolved but has no ranges", dataset, name);
        }
        write_section(&section, format, out)?;
        report.sections.push(section);
    }
    Ok(report)
}

fn lookup(
    dataset: Dataset,
    paths: &DatasetPaths,
    name: &str,
    ids: &HashSet<String>,
) -> Result<RangeSection> {
    let join = dataset.join_column();
    let ipv4 = BlockScanner::open(&paths.blocks_v4, join, ids)?.collect::<Result<Vec<_>, _>>()?;
    let ipv6 = BlockScanner::open(&paths.blocks_v6, join, ids)?.collect::<Result<Vec<_>, _>>()?;
    debug!(
        "{} '{}': {} IPv4, {} IPv6 ranges",
        dataset,
        name,
        ipv4.len(),
        ipv6.len()
    );

    let mut geoname_ids: Vec<String> = ids.iter().cloned().collect();
    geoname_ids.sort();

    Ok(RangeSection {
        kind: dataset,
        name: name.to_string(),
        geoname_ids,
        ipv4,
        ipv6,
    })
}

pub fn write_section<W: Write>(
    section: &RangeSection,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(section, out).context("Failed to write output"),
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(section)?).context("Failed to write output")
        }
    }
}

fn write_text<W: Write>(section: &RangeSection, out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "\n=== {}: {} (geoname_id: {}) ===",
        section.kind.label(),
        section.name,
        section.geoname_ids.join(", ")
    )?;
    write_list(out, "-- IPv4 CIDRs --", &section.ipv4)?;
    write_list(out, "-- IPv6 CIDRs --", &section.ipv6)
}

fn write_list<W: Write>(out: &mut W, heading: &str, networks: &[String]) -> std::io::Result<()> {
    writeln!(out, "{}", heading)?;
    if networks.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for network in networks {
        writeln!(out, "{}", network)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, data: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, data).unwrap();
        path
    }

    fn city_fixture(dir: &Path) -> DatasetPaths {
        DatasetPaths::new(
            write(dir, "loc.csv", "geoname_id,city_name\n1,X\n2,Y\n3,Empty\n"),
            write(
                dir,
                "b4.csv",
                "network,geoname_id,registered_country_geoname_id\n10.0.0.0/8,1,9\n11.0.0.0/8,2,9\n12.0.0.0/8,1,9\n",
            ),
            write(dir, "b6.csv", "network,geoname_id,registered_country_geoname_id\n2001:db8::/32,2,9\n"),
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lookup_returns_only_rows_for_the_name() {
        let dir = TempDir::new().unwrap();
        let paths = city_fixture(dir.path());
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());

        let report = query_dataset(Dataset::City, &paths, &names(&["x"]), OutputFormat::Text, &mut out, &mut err).unwrap();

        assert_eq!(
            report.sections,
            vec![RangeSection {
                kind: Dataset::City,
                name: "x".to_string(),
                geoname_ids: vec!["1".to_string()],
                ipv4: vec!["10.0.0.0/8".to_string(), "12.0.0.0/8".to_string()],
                ipv6: vec![],
            }]
        );
        assert!(err.is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n=== City: x (geoname_id: 1) ===\n-- IPv4 CIDRs --\n10.0.0.0/8\n12.0.0.0/8\n-- IPv6 CIDRs --\n  (none)\n"
        );
    }

    #[test]
    fn unknown_names_are_reported_and_skipped() {
        let dir = TempDir::new().unwrap();
        let paths = city_fixture(dir.path());
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());

        let report = query_dataset(Dataset::City, &paths, &names(&["Atlantis", "Y"]), OutputFormat::Text, &mut out, &mut err).unwrap();

        assert_eq!(report.unresolved, vec![(Dataset::City, "Atlantis".to_string())]);
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].ipv6, vec!["2001:db8::/32"]);
        assert_eq!(String::from_utf8(err).unwrap(), "[!] No geoname_id for city 'Atlantis'\n");
    }

    #[test]
    fn known_name_without_blocks_gets_empty_section() {
        let dir = TempDir::new().unwrap();
        let paths = city_fixture(dir.path());
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());

        let report = query_dataset(Dataset::City, &paths, &names(&["empty"]), OutputFormat::Text, &mut out, &mut err).unwrap();

        assert!(report.unresolved.is_empty());
        assert!(report.sections[0].ipv4.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("  (none)").count(), 2);
    }

    #[test]
    fn json_output_is_one_object_per_name() {
        let section = RangeSection {
            kind: Dataset::Country,
            name: "UA".to_string(),
            geoname_ids: vec!["690791".to_string()],
            ipv4: vec!["5.1.0.0/16".to_string()],
            ipv6: vec![],
        };
        let mut out: Vec<u8> = Vec::new();
        write_section(&section, OutputFormat::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["kind"], "country");
        assert_eq!(value["name"], "UA");
        assert_eq!(value["geoname_ids"][0], "690791");
        assert_eq!(value["ipv4"][0], "5.1.0.0/16");
        assert!(value["ipv6"].as_array().unwrap().is_empty());
    }
}
