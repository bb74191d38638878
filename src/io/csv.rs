// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! CSV interchange format for region lists.
//!
//! The file layout is fixed:
//!
//! ```text
//! <project name>
//! top y,bottom y,left x,right x
//! <top>,<bottom>,<left>,<right>
//! ```
//!
//! Line 1 carries the project name as a single field, line 2 is the column
//! header, and every following line is one region in `top, bottom, left,
//! right` order. Values are plain decimal integers; nothing is quoted.

use crate::error::{Error, Result};
use crate::models::region::RegionRecord;
use std::path::Path;

/// The fixed header written on line 2.
const HEADER: [&str; 4] = ["top y", "bottom y", "left x", "right x"];

/// Encode a project name and region list to CSV text.
///
/// Output is deterministic for a given input order.
pub fn encode(project: &str, regions: &[RegionRecord]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_writer(Vec::new());

    // The project line has a single field; flexible mode permits the
    // varying field count.
    writer
        .write_record([project])
        .expect("write to Vec cannot fail");
    writer
        .write_record(HEADER)
        .expect("write to Vec cannot fail");
    for region in regions {
        writer.serialize(region).expect("write to Vec cannot fail");
    }

    let bytes = writer.into_inner().expect("write to Vec cannot fail");
    String::from_utf8(bytes).expect("encoder emits UTF-8")
}

/// Encode and write straight to a `.csv` file.
pub fn encode_to_path(project: &str, regions: &[RegionRecord], path: &Path) -> Result<()> {
    std::fs::write(path, encode(project, regions))?;
    Ok(())
}

/// Decode CSV text into a project name and region list.
///
/// Line 1 supplies the project name (first field), line 2 is skipped
/// without validation, and every remaining line must parse as at least
/// four non-negative integers (extra trailing fields are ignored). Any
/// bad row fails the whole decode with [`Error::MalformedRow`]; a file
/// with a project line and no data rows yields an empty region list.
pub fn decode(text: &str) -> Result<(String, Vec<RegionRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let project_row = records
        .next()
        .transpose()
        .map_err(|e| malformed(1, e.to_string()))?
        .ok_or_else(|| malformed(1, "missing project line".to_string()))?;
    let project = project_row.get(0).unwrap_or("").to_string();

    // Line 2 is the column header; its content is not checked.
    let _header = records
        .next()
        .transpose()
        .map_err(|e| malformed(2, e.to_string()))?;

    let mut regions = Vec::new();
    for (index, row) in records.enumerate() {
        let line = index + 3;
        let row = row.map_err(|e| malformed(line, e.to_string()))?;
        regions.push(parse_row(&row, line)?);
    }

    Ok((project, regions))
}

/// Read and decode a `.csv` file.
pub fn decode_from_path(path: &Path) -> Result<(String, Vec<RegionRecord>)> {
    let text = std::fs::read_to_string(path)?;
    decode(&text)
}

fn parse_row(row: &csv::StringRecord, line: usize) -> Result<RegionRecord> {
    if row.len() < 4 {
        return Err(malformed(
            line,
            format!("expected 4 fields, found {}", row.len()),
        ));
    }

    let mut values = [0u32; 4];
    for (i, value) in values.iter_mut().enumerate() {
        let field = row.get(i).unwrap_or("");
        *value = field.trim().parse::<u32>().map_err(|_| {
            malformed(line, format!("field {} is not a non-negative integer: {field:?}", i + 1))
        })?;
    }

    Ok(RegionRecord::new(values[0], values[1], values[2], values[3]))
}

fn malformed(line: usize, message: String) -> Error {
    Error::MalformedRow { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_fixed_layout() {
        let regions = vec![
            RegionRecord::new(10, 50, 20, 60),
            RegionRecord::new(5, 15, 5, 15),
        ];

        let text = encode("demo", &regions);

        assert_eq!(text, "demo\ntop y,bottom y,left x,right x\n10,50,20,60\n5,15,5,15\n");
    }

    #[test]
    fn test_roundtrip_preserves_project_and_order() {
        let regions = vec![
            RegionRecord::new(1, 2, 3, 4),
            RegionRecord::new(400, 300, 200, 100),
            RegionRecord::new(0, 0, 0, 0),
        ];

        let (project, decoded) = decode(&encode("wing scan 7", &regions)).unwrap();

        assert_eq!(project, "wing scan 7");
        assert_eq!(decoded, regions);
    }

    #[test]
    fn test_roundtrip_of_empty_region_list() {
        let (project, decoded) = decode(&encode("empty", &[])).unwrap();

        assert_eq!(project, "empty");
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_header_line_is_not_validated() {
        let (project, regions) = decode("proj\nanything, at all\n1,2,3,4\n").unwrap();

        assert_eq!(project, "proj");
        assert_eq!(regions, vec![RegionRecord::new(1, 2, 3, 4)]);
    }

    #[test]
    fn test_non_integer_field_is_malformed() {
        let result = decode("proj\nheader\n1,2,x,4\n");

        assert!(matches!(
            result,
            Err(Error::MalformedRow { line: 3, .. })
        ));
    }

    #[test]
    fn test_negative_field_is_malformed() {
        let result = decode("proj\ntop y,bottom y,left x,right x\n1,-2,3,4\n");

        assert!(matches!(result, Err(Error::MalformedRow { line: 3, .. })));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let result = decode("proj\nheader\n1,2,3,4\n5,6\n");

        assert!(matches!(
            result,
            Err(Error::MalformedRow { line: 4, .. })
        ));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let (_, regions) = decode("proj\nheader\n1,2,3,4,99\n").unwrap();

        assert_eq!(regions, vec![RegionRecord::new(1, 2, 3, 4)]);
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(
            decode(""),
            Err(Error::MalformedRow { line: 1, .. })
        ));
    }

    #[test]
    fn test_path_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.csv");
        let regions = vec![RegionRecord::new(7, 8, 9, 10)];

        encode_to_path("disk", &regions, &path).unwrap();
        let (project, decoded) = decode_from_path(&path).unwrap();

        assert_eq!(project, "disk");
        assert_eq!(decoded, regions);
    }
}
