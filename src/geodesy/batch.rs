//! Batch conversion of pasted `label easting northing` lines
//!
//! Input is the text users paste from a spreadsheet: one point per line,
//! fields separated by spaces or tabs, numbers in es-CL format. The whole
//! batch fails on the first bad line.

use std::io::Write;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::utm::{convert, GeoPoint, UtmPoint, UtmZone};
use crate::error::CalcError;
use crate::locale::{format_decimal, parse_decimal};

/// Fields expected on every batch line: label, easting, northing
const FIELDS_PER_LINE: usize = 3;

/// One converted batch entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub label: String,
    pub utm: UtmPoint,
    pub geo: GeoPoint,
}

/// Parse a single non-blank batch line into its label and UTM point
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_batch_line(
    line: &str,
    line_number: usize,
    zone: UtmZone,
) -> Result<(String, UtmPoint), CalcError> {
    let malformed = |reason: String| CalcError::MalformedBatchEntry {
        line_number,
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELDS_PER_LINE {
        return Err(malformed(format!(
            "expected {} fields (label easting northing), found {}",
            FIELDS_PER_LINE,
            fields.len()
        )));
    }

    let easting = parse_decimal(fields[1])
        .ok_or_else(|| malformed(format!("easting {:?} is not a number", fields[1])))?;
    let northing = parse_decimal(fields[2])
        .ok_or_else(|| malformed(format!("northing {:?} is not a number", fields[2])))?;

    Ok((fields[0].to_string(), UtmPoint::new(easting, northing, zone)))
}

/// Convert every line of `input` in order, all sharing `zone`
///
/// Blank lines are skipped. Any malformed line aborts the batch and nothing
/// converted before it is returned.
pub fn convert_batch(input: &str, zone: UtmZone) -> Result<Vec<LabeledPoint>, CalcError> {
    let mut points = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (label, utm) = parse_batch_line(line, index + 1, zone).map_err(|err| {
            warn!("Batch conversion aborted: {}", err);
            err
        })?;
        let geo = convert(&utm);
        points.push(LabeledPoint { label, utm, geo });
    }

    if points.is_empty() {
        return Err(CalcError::invalid("batch", "no coordinates to convert"));
    }

    info!("Converted {} coordinates in zone {}", points.len(), zone);
    Ok(points)
}

/// Write converted points as tab-separated text ready to paste into a spreadsheet
///
/// Columns: `Punto, Latitud, Longitud, UTM E, UTM N`, coordinates with six
/// decimals and a decimal comma.
pub fn write_tsv<W: Write>(points: &[LabeledPoint], writer: W) -> csv::Result<()> {
    let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    tsv.write_record(["Punto", "Latitud", "Longitud", "UTM E", "UTM N"])?;
    for point in points {
        tsv.write_record([
            point.label.clone(),
            format_decimal(point.geo.latitude, 6),
            format_decimal(point.geo.longitude, 6),
            point.utm.easting.to_string(),
            point.utm.northing.to_string(),
        ])?;
    }

    tsv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_convert_batch_in_order() {
        let input = "P1 346000 6300000\nP2\t500.000\t6.300.000\n\n  \nP3 280000,0 7400000\n";
        let points = convert_batch(input, UtmZone::Zone19S).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].label, "P1");
        assert_eq!(points[1].label, "P2");
        assert_eq!(points[2].label, "P3");

        assert_abs_diff_eq!(points[0].geo.latitude, -33.428331, epsilon = 1e-6);
        assert_eq!(points[1].utm.easting, 500_000.0);
        assert_eq!(points[1].geo.longitude, -69.0);
        assert_abs_diff_eq!(points[2].geo.latitude, -23.495296, epsilon = 1e-6);
    }

    #[test]
    fn test_matches_single_conversion() {
        let points = convert_batch("A 650000 5500000", UtmZone::Zone18S).unwrap();
        let single = convert(&UtmPoint::new(650_000.0, 5_500_000.0, UtmZone::Zone18S));
        assert_eq!(points[0].geo, single);
    }

    #[test]
    fn test_two_fields_aborts_whole_batch() {
        let input = "P1 346000 6300000\nP2 346000\nP3 346000 6300000";
        let err = convert_batch(input, UtmZone::Zone19S).unwrap_err();

        match err {
            CalcError::MalformedBatchEntry { line_number, line, .. } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "P2 346000");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_extra_field_is_malformed() {
        let err = convert_batch("P1 346000 6300000 extra", UtmZone::Zone19S).unwrap_err();
        assert!(matches!(err, CalcError::MalformedBatchEntry { line_number: 1, .. }));
    }

    #[test]
    fn test_non_numeric_coordinate_is_malformed() {
        let err = convert_batch("P1 346000 6300000\nP2 abc 6300000", UtmZone::Zone19S).unwrap_err();
        match err {
            CalcError::MalformedBatchEntry { line_number, line, reason } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "P2 abc 6300000");
                assert!(reason.contains("easting"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_empty_batch_is_invalid_input() {
        let err = convert_batch("\n   \n", UtmZone::Zone18S).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { field: "batch", .. }));
    }

    #[test]
    fn test_write_tsv() {
        let points = convert_batch("P1 346000 6300000", UtmZone::Zone19S).unwrap();
        let mut buffer = Vec::new();
        write_tsv(&points, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Punto\tLatitud\tLongitud\tUTM E\tUTM N"));
        assert_eq!(lines.next(), Some("P1\t-33,428331\t-70,656502\t346000\t6300000"));
        assert_eq!(lines.next(), None);
    }
}
