//! Field-level parsing for the raw feed wire formats.

use chrono::NaiveDateTime;
use geo::{Coord, LineString};

use crate::Error;

/// Parse the feed's `lon,lat,lon,lat,...` coordinate blob into a polyline.
pub(super) fn parse_polyline(way_id: &str, raw: &str) -> Result<LineString<f64>, Error> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| Error::InvalidData(format!("segment {way_id}: bad polyline coordinate: {e}")))?;

    if values.len() % 2 != 0 {
        return Err(Error::InvalidData(format!(
            "segment {way_id}: polyline has an odd number of values ({})",
            values.len()
        )));
    }

    let coords: Vec<Coord<f64>> = values
        .chunks_exact(2)
        .map(|pair| Coord {
            x: pair[0],
            y: pair[1],
        })
        .collect();
    Ok(LineString::new(coords))
}

/// Parse the `YYYYmmddHHMMSS` timestamp code attached to each observation.
pub(super) fn parse_observation_code(way_id: &str, raw: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y%m%d%H%M%S").map_err(|e| {
        Error::InvalidData(format!(
            "segment {way_id}: bad observation timestamp {raw:?}: {e}"
        ))
    })
}
