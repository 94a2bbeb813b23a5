// Shared fixtures: small GeoLite2-shaped CSV datasets written to a temp dir.
#![allow(dead_code)] // not every test file uses every fixture

use std::fs;
use std::path::{Path, PathBuf};

use geo_ip_ranges::config::{
    CITY_BLOCKS_V4_CSV, CITY_BLOCKS_V6_CSV, CITY_LOCATIONS_CSV, COUNTRY_BLOCKS_V4_CSV,
    COUNTRY_BLOCKS_V6_CSV, COUNTRY_LOCATIONS_CSV,
};

pub const CITY_LOCATIONS: &str = "\
geoname_id,locale_code,continent_code,continent_name,country_iso_code,country_name,city_name
703448,en,EU,Europe,UA,Ukraine,Kyiv
2643743,en,EU,Europe,GB,United Kingdom,London
6058560,en,NA,North America,CA,Canada,London
5128581,en,NA,North America,US,United States,New York
9999999,en,EU,Europe,FR,France,Nowhere
";

pub const CITY_BLOCKS_V4: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider
1.0.0.0/24,703448,690791,,0,0
2.0.0.0/24,2643743,2635167,,0,0
3.0.0.0/24,703448,690791,,0,0
4.0.0.0/24,6058560,6251999,,0,0
5.0.0.0/24,5128581,6252001,,0,0
";

pub const CITY_BLOCKS_V6: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider
2001:db8:1::/48,703448,690791,,0,0
2001:db8:2::/48,6058560,6251999,,0,0
";

pub const COUNTRY_LOCATIONS: &str = "\
geoname_id,locale_code,continent_code,continent_name,country_iso_code,country_name,is_in_european_union
690791,en,EU,Europe,UA,Ukraine,0
6252001,en,NA,North America,US,United States,0
";

pub const COUNTRY_BLOCKS_V4: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider
10.0.0.0/16,690791,690791,,0,0
11.0.0.0/16,690791,6252001,,0,0
12.0.0.0/16,6252001,690791,,0,0
";

pub const COUNTRY_BLOCKS_V6: &str = "\
network,geoname_id,registered_country_geoname_id,represented_country_geoname_id,is_anonymous_proxy,is_satellite_provider
2001:db8:a::/48,6252001,6252001,,0,0
";

pub fn write(dir: &Path, name: &str, data: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).expect("Failed to write fixture");
    path
}

/// Writes the City tables under their default names.
pub fn write_city_dataset(dir: &Path) {
    write(dir, CITY_LOCATIONS_CSV, CITY_LOCATIONS);
    write(dir, CITY_BLOCKS_V4_CSV, CITY_BLOCKS_V4);
    write(dir, CITY_BLOCKS_V6_CSV, CITY_BLOCKS_V6);
}

/// Writes the Country tables under their default names.
pub fn write_country_dataset(dir: &Path) {
    write(dir, COUNTRY_LOCATIONS_CSV, COUNTRY_LOCATIONS);
    write(dir, COUNTRY_BLOCKS_V4_CSV, COUNTRY_BLOCKS_V4);
    write(dir, COUNTRY_BLOCKS_V6_CSV, COUNTRY_BLOCKS_V6);
}
