use geo::{Coord, LineString};
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::RoutePlan;
use crate::Error;
use crate::model::WeightedGraph;

impl RoutePlan {
    /// Converts the route to a `GeoJSON` `Feature` with a `LineString`
    /// geometry and the route metrics as properties.
    pub fn to_geojson(&self, graph: &WeightedGraph) -> Result<Feature, Error> {
        let coords: Vec<Coord<f64>> = self
            .nodes
            .iter()
            .map(|&n| graph.road().graph[n].geometry.into())
            .collect();
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "length_m": self.length_m,
                "time_s": self.time_s,
                "nodes": self.nodes.len(),
            }
        });

        serde_json::from_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson_string(&self, graph: &WeightedGraph) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(graph)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}
