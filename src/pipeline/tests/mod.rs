//! Pipeline tests
//!
//! Exercise complete runs over small export files written to temporary
//! directories.


use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header line of an eBird "My Data" export
pub const EXPORT_HEADER: &str = "Submission ID,Common Name,Scientific Name,Taxonomic Order,Count,State/Province,County,Location ID,Location,Latitude,Longitude,Date,Time,Protocol,Duration (Min),All Obs Reported,Distance Traveled (km),Area Covered (ha),Number of Observers,Breeding Code,Observation Details,Checklist Comments,ML Catalog Numbers";

/// Build a full-width data line
pub fn data_line(submission_id: &str, scientific_name: &str, date: &str, time: &str) -> String {
    format!(
        "{submission_id},Common Bird,{scientific_name},1234,2,US-NY,Kings,L109516,Prospect Park,40.66,-73.97,{date},{time},Traveling,30,1,1.2,,1,,,\"Nice, calm morning\",555 556"
    )
}

/// Build a data line carrying only the required columns
pub fn short_data_line(submission_id: &str, date: &str, time: &str) -> String {
    format!(
        "{submission_id},Mallard,Anas platyrhynchos,432,X,US-NY,,L1,Pond,40.7,-74.0,{date},{time},Stationary,,0"
    )
}

/// Write an export with the given data lines under a fresh temp directory
pub fn write_export(temp_dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = temp_dir.path().join("MyEBirdData.csv");
    let mut content = String::from(EXPORT_HEADER);
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

/// A mixed export of `count` rows across several dates and species
pub fn sample_lines(count: usize) -> Vec<String> {
    let times = ["06:15 AM", "", "11:45 AM", "03:30 PM", ""];
    (0..count)
        .map(|i| {
            let date = format!("2023-{:02}-{:02}", (i % 12) + 1, (i % 28) + 1);
            let species = format!("Species number{}", i % 7);
            if i % 3 == 0 {
                short_data_line(&format!("S{}", i), &date, times[i % times.len()])
            } else {
                data_line(&format!("S{}", i), &species, &date, times[i % times.len()])
            }
        })
        .collect()
}
