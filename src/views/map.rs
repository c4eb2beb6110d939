//! Map View
//!
//! Computes the map region shown for the stored destinations and validates
//! new destination submissions.
//!
//! The region is the bounding box of all placed destinations. Its center is
//! the midpoint of the box, and the zoom level is picked from the larger of
//! the two coordinate spans.

use serde::{Deserialize, Serialize};

use super::{ViewError, ViewResult};
use crate::store::destinations::{coordinate_in_range, MAX_LATITUDE, MAX_LONGITUDE};
use crate::store::Destination;

/// Span thresholds (exclusive) and the zoom level used below each
const ZOOM_STEPS: [(f64, u8); 6] = [
    (0.05, 12),
    (0.5, 10),
    (1.0, 8),
    (5.0, 6),
    (15.0, 4),
    (40.0, 3),
];

/// Zoom used when the span exceeds every threshold
const WORLD_ZOOM: u8 = 2;

/// Approximate map zoom level for a latitude/longitude span.
///
/// Finer spans give higher zoom. A span exactly on a threshold falls into
/// the coarser bucket.
pub fn compute_zoom(lat_span: f64, lon_span: f64) -> u8 {
    let span = lat_span.max(lon_span);
    ZOOM_STEPS
        .iter()
        .find(|(limit, _)| span < *limit)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(WORLD_ZOOM)
}

/// Visible map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub center_lat: f64,
    pub center_lon: f64,
    pub lat_span: f64,
    pub lon_span: f64,
    pub zoom: u8,
}

impl MapRegion {
    /// Bounding region of `(lat, lon)` points, `None` if there are none
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut points = points.into_iter();
        let (lat, lon) = points.next()?;
        let (mut min_lat, mut max_lat, mut min_lon, mut max_lon) = (lat, lat, lon, lon);

        for (lat, lon) in points {
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
            min_lon = min_lon.min(lon);
            max_lon = max_lon.max(lon);
        }

        let lat_span = max_lat - min_lat;
        let lon_span = max_lon - min_lon;

        Some(Self {
            center_lat: (min_lat + max_lat) / 2.0,
            center_lon: (min_lon + max_lon) / 2.0,
            lat_span,
            lon_span,
            zoom: compute_zoom(lat_span, lon_span),
        })
    }
}

/// A destination drawn on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Render model of the map section
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    /// `None` when no destination has coordinates
    pub region: Option<MapRegion>,
    pub points: Vec<MapPoint>,
    /// Destinations stored without coordinates
    pub unplaced: Vec<String>,
}

impl MapView {
    pub fn build(destinations: &[Destination]) -> Self {
        let mut points = Vec::new();
        let mut unplaced = Vec::new();

        for destination in destinations {
            match destination.position() {
                Some((lat, lon)) => points.push(MapPoint {
                    name: destination.name.clone(),
                    lat,
                    lon,
                }),
                None => unplaced.push(destination.name.clone()),
            }
        }

        let region = MapRegion::from_points(points.iter().map(|p| (p.lat, p.lon)));

        Self {
            region,
            points,
            unplaced,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none()
    }

    /// Points as JSON for the page script
    pub fn points_json(&self) -> String {
        // Keep the payload from closing the surrounding <script> element
        serde_json::to_string(&self.points)
            .unwrap_or_else(|_| "[]".to_string())
            .replace("</", "<\\/")
    }
}

/// Form body of the add-destination form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
}

impl DestinationSubmission {
    /// Destination to append, `None` if the name is empty.
    ///
    /// All spaces are removed from the name. Coordinates are used only when
    /// both are given; otherwise the destination is stored by name alone.
    pub fn into_destination(self) -> ViewResult<Option<Destination>> {
        let name: String = self.name.chars().filter(|c| *c != ' ').collect();
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let lat = non_blank(self.lat);
        let lon = non_blank(self.lon);

        match (lat, lon) {
            (Some(lat), Some(lon)) => {
                let lat = parse_coordinate("latitude", &lat, MAX_LATITUDE)?;
                let lon = parse_coordinate("longitude", &lon, MAX_LONGITUDE)?;
                Ok(Some(Destination::new(name, lat, lon)))
            }
            _ => Ok(Some(Destination::unplaced(name))),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_coordinate(field: &'static str, value: &str, limit: f64) -> ViewResult<f64> {
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| coordinate_in_range(*v, limit))
        .ok_or_else(|| ViewError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_buckets() {
        let spans = [0.01, 0.06, 0.6, 2.0, 10.0, 20.0, 50.0];
        let zooms: Vec<u8> = spans.iter().map(|s| compute_zoom(*s, 0.0)).collect();
        assert_eq!(zooms, vec![12, 10, 8, 6, 4, 3, 2]);
    }

    #[test]
    fn test_zoom_boundaries_are_coarser() {
        assert_eq!(compute_zoom(0.05, 0.0), 10);
        assert_eq!(compute_zoom(0.5, 0.0), 8);
        assert_eq!(compute_zoom(1.0, 0.0), 6);
        assert_eq!(compute_zoom(5.0, 0.0), 4);
        assert_eq!(compute_zoom(15.0, 0.0), 3);
        assert_eq!(compute_zoom(40.0, 0.0), 2);
    }

    #[test]
    fn test_zoom_uses_larger_span() {
        assert_eq!(compute_zoom(0.01, 20.0), 3);
        assert_eq!(compute_zoom(20.0, 0.01), 3);
        assert_eq!(compute_zoom(0.0, 0.0), 12);
    }

    #[test]
    fn test_region_is_bounding_box_center() {
        let region = MapRegion::from_points([(40.0, -10.0), (50.0, 10.0), (41.0, 9.0)]).unwrap();
        assert_eq!(region.center_lat, 45.0);
        assert_eq!(region.center_lon, 0.0);
        assert_eq!(region.lat_span, 10.0);
        assert_eq!(region.lon_span, 20.0);
        assert_eq!(region.zoom, 3);
    }

    #[test]
    fn test_empty_map() {
        let view = MapView::build(&[]);
        assert!(view.is_empty());
        assert!(view.points.is_empty());

        let view = MapView::build(&[Destination::unplaced("Kyoto")]);
        assert!(view.is_empty());
        assert_eq!(view.unplaced, vec!["Kyoto".to_string()]);
    }

    #[test]
    fn test_single_point_region() {
        let view = MapView::build(&[Destination::new("Rom", 41.9, 12.5)]);
        let region = view.region.unwrap();
        assert_eq!(region.center_lat, 41.9);
        assert_eq!(region.zoom, 12);
    }

    #[test]
    fn test_points_json_escapes_script_end() {
        let view = MapView::build(&[Destination::new("</script>", 1.0, 2.0)]);
        assert!(!view.points_json().contains("</script>"));
    }

    #[test]
    fn test_submission_strips_spaces() {
        let submission = DestinationSubmission {
            name: " Bad Tölz ".to_string(),
            lat: Some("47,76".to_string()),
            lon: Some("11.56".to_string()),
        };
        let destination = submission.into_destination().unwrap().unwrap();
        assert_eq!(destination, Destination::new("BadTölz", 47.76, 11.56));
    }

    #[test]
    fn test_submission_without_coordinates() {
        let submission = DestinationSubmission {
            name: "Kyoto".to_string(),
            lat: Some("35.0".to_string()),
            lon: None,
        };
        assert_eq!(
            submission.into_destination().unwrap(),
            Some(Destination::unplaced("Kyoto"))
        );
    }

    #[test]
    fn test_empty_submission() {
        let submission = DestinationSubmission {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.into_destination().unwrap(), None);
    }

    #[test]
    fn test_invalid_coordinate() {
        let submission = DestinationSubmission {
            name: "Nirgendwo".to_string(),
            lat: Some("95".to_string()),
            lon: Some("10".to_string()),
        };
        assert!(matches!(
            submission.into_destination(),
            Err(ViewError::InvalidCoordinate { field: "latitude", .. })
        ));
    }
}
