//! CSV readers for the two live-feed payloads.

use std::io::Read;

use serde::Deserialize;

use super::de::{parse_observation_code, parse_polyline};
use crate::Error;
use crate::model::{CongestionLevel, CongestionObservation, RoadSegment};

/// Raw segment row: id, display name, coordinate blob.
#[derive(Debug, Deserialize)]
struct SegmentRow(String, String, String);

/// Raw observation row: id, timestamp code, current level, predicted level.
#[derive(Debug, Deserialize)]
struct ObservationRow(String, String, u8, u8);

/// Read road segments from the comma-delimited feed payload (one header
/// row; the coordinate blob is a quoted `lon,lat,...` list).
///
/// # Errors
///
/// [`Error::CsvError`] on malformed CSV, [`Error::InvalidData`] on rows
/// that parse as CSV but carry broken fields. The feed contract is
/// well-formed-or-fail: no row is silently dropped.
pub fn read_segments<R: Read>(reader: R) -> Result<Vec<RoadSegment>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut segments = Vec::new();
    for row in csv_reader.deserialize() {
        let SegmentRow(way_id, name, coordinates) = row?;
        let geometry = parse_polyline(&way_id, &coordinates)?;
        segments.push(RoadSegment::new(way_id, name, geometry)?);
    }
    Ok(segments)
}

/// Read congestion observations from the `#`-delimited feed payload (no
/// header row).
///
/// # Errors
///
/// As [`read_segments`]; congestion levels outside 0-6 are
/// [`Error::InvalidData`].
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<CongestionObservation>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'#')
        .has_headers(false)
        .from_reader(reader);

    let mut observations = Vec::new();
    for row in csv_reader.deserialize() {
        let ObservationRow(way_id, code, current, predicted) = row?;
        let observed_at = parse_observation_code(&way_id, &code)?;
        let current = level(&way_id, current)?;
        let predicted = level(&way_id, predicted)?;
        observations.push(CongestionObservation {
            way_id,
            observed_at,
            current,
            predicted,
        });
    }
    Ok(observations)
}

fn level(way_id: &str, raw: u8) -> Result<CongestionLevel, Error> {
    CongestionLevel::try_from(raw).map_err(|_| {
        Error::InvalidData(format!(
            "segment {way_id}: congestion level {raw} is outside the 0-6 range"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::{read_observations, read_segments};
    use crate::Error;
    use crate::model::CongestionLevel;

    const SEGMENTS: &str = "\
Tram,Descripcio,Coordenades
1,Diagonal (Ronda de Dalt a Doctor Marañon),\"2.11203535864776,41.3841912709254,2.1130, 41.38540\"
2,Diagonal (Doctor Marañon a Ronda de Dalt),\"2.1130,41.38540,2.11203535864776,41.3841912709254\"
";

    #[test]
    fn segments_parse_with_header_and_quoted_blob() {
        let segments = read_segments(SEGMENTS.as_bytes()).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].way_id, "1");
        assert_eq!(segments[0].geometry.0.len(), 2);
        let (first, last) = segments[1].endpoints();
        assert_eq!(first.x(), 2.1130);
        assert_eq!(last.y(), 41.3841912709254);
    }

    #[test]
    fn segments_reject_single_point_polyline() {
        let payload = "Tram,Descripcio,Coordenades\n1,Short,\"2.11,41.38\"\n";
        let segments = read_segments(payload.as_bytes());
        assert!(segments.is_err());
    }

    #[test]
    fn observations_parse_hash_delimited_rows() {
        let payload = "1#20210501123000#2#3\n2#20210501123000#0#0\n";
        let observations = read_observations(payload.as_bytes()).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].current, CongestionLevel::Fluid);
        assert_eq!(observations[0].predicted, CongestionLevel::Dense);
        assert_eq!(observations[1].current, CongestionLevel::NoData);
        assert_eq!(
            observations[0].observed_at.to_string(),
            "2021-05-01 12:30:00"
        );
    }

    #[test]
    fn observations_reject_out_of_range_level() {
        let payload = "1#20210501123000#7#3\n";
        let err = read_observations(payload.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
