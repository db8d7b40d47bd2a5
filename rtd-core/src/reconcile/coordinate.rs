//! Coordinate normalisation for persisted and fresh path records.

use serde_json::Value;

use crate::GeoPoint;

use super::{ReconstructionWarning, report};

/// A coordinate as found in a path record.
#[derive(Debug, Clone, Copy)]
pub enum CoordinateInput<'a> {
    /// An already-typed point; passed through unchanged.
    Point(GeoPoint),
    /// A plain JSON encoding of a point.
    Json(&'a Value),
    /// The field was absent.
    Missing,
}

impl From<GeoPoint> for CoordinateInput<'_> {
    fn from(point: GeoPoint) -> Self {
        Self::Point(point)
    }
}

impl<'a> From<&'a Value> for CoordinateInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Json(value)
    }
}

impl<'a> From<Option<&'a Value>> for CoordinateInput<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Self::Missing, Self::Json)
    }
}

/// Decode a coordinate, returning `None` for unrecognised or out-of-range
/// encodings.
///
/// Recognises `{lat, lng}`, `{latitude, longitude}` and `[lat, lng]`.
///
/// # Examples
/// ```
/// use rtd_core::reconcile::{CoordinateInput, try_coordinate};
/// use rtd_core::GeoPoint;
/// use serde_json::json;
///
/// let expected = Some(GeoPoint { lat: 12.5, lng: 77.5 });
/// let plain = json!({"lat": 12.5, "lng": 77.5});
/// let verbose = json!({"latitude": 12.5, "longitude": 77.5});
/// let pair = json!([12.5, 77.5]);
/// let text = json!("12.5,77.5");
/// assert_eq!(try_coordinate(CoordinateInput::Json(&plain)), expected);
/// assert_eq!(try_coordinate(CoordinateInput::Json(&verbose)), expected);
/// assert_eq!(try_coordinate(CoordinateInput::Json(&pair)), expected);
/// assert_eq!(try_coordinate(CoordinateInput::Json(&text)), None);
/// ```
#[must_use]
pub fn try_coordinate(input: CoordinateInput<'_>) -> Option<GeoPoint> {
    match input {
        CoordinateInput::Point(point) => Some(point),
        CoordinateInput::Json(value) => from_json(value),
        CoordinateInput::Missing => None,
    }
}

/// Decode a coordinate, falling back to `(0, 0)` and logging a warning for
/// anything [`try_coordinate`] rejects.
#[must_use]
pub fn normalize_coordinate<'a>(input: impl Into<CoordinateInput<'a>>, field: &'static str) -> GeoPoint {
    try_coordinate(input.into()).unwrap_or_else(|| {
        report(&ReconstructionWarning::MalformedCoordinate { field });
        GeoPoint::ZERO
    })
}

/// Decode every coordinate of an optional JSON array.
///
/// A missing or non-array field yields an empty path; individual bad
/// entries become `(0, 0)`.
pub(crate) fn normalize_path(value: Option<&Value>, field: &'static str) -> Vec<GeoPoint> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| normalize_coordinate(item, field))
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            report(&ReconstructionWarning::NotAnArray { field });
            Vec::new()
        }
    }
}

fn from_json(value: &Value) -> Option<GeoPoint> {
    let (lat, lng) = match value {
        Value::Object(map) => {
            if let (Some(lat), Some(lng)) = (map.get("lat"), map.get("lng")) {
                (lat.as_f64()?, lng.as_f64()?)
            } else {
                (map.get("latitude")?.as_f64()?, map.get("longitude")?.as_f64()?)
            }
        }
        Value::Array(items) => match items.as_slice() {
            [lat, lng] => (lat.as_f64()?, lng.as_f64()?),
            _ => return None,
        },
        _ => return None,
    };
    GeoPoint::new(lat, lng).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"lat": 1.5, "lng": -2.5}))]
    #[case(json!({"latitude": 1.5, "longitude": -2.5}))]
    #[case(json!([1.5, -2.5]))]
    #[case(json!({"lat": 1.5, "lng": -2.5, "extra": true}))]
    fn accepts_known_encodings(#[case] value: Value) {
        assert_eq!(
            normalize_coordinate(&value, "test"),
            GeoPoint { lat: 1.5, lng: -2.5 }
        );
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!("1.5,-2.5"))]
    #[case(json!([1.5]))]
    #[case(json!([1.5, -2.5, 3.0]))]
    #[case(json!({"lat": "1.5", "lng": -2.5}))]
    #[case(json!({"lat": 91.0, "lng": 0.0}))]
    #[case(json!({"x": 1.0, "y": 2.0}))]
    fn falls_back_to_origin(#[case] value: Value) {
        assert_eq!(normalize_coordinate(&value, "test"), GeoPoint::ZERO);
    }

    #[rstest]
    fn passes_typed_points_through() {
        let point = GeoPoint { lat: 3.0, lng: 4.0 };
        assert_eq!(normalize_coordinate(point, "test"), point);
    }

    #[rstest]
    fn missing_field_becomes_origin() {
        assert_eq!(normalize_coordinate(None::<&Value>, "test"), GeoPoint::ZERO);
    }

    #[rstest]
    fn path_keeps_length_with_bad_entries() {
        let raw = json!([[1.0, 2.0], "junk", {"lat": 3.0, "lng": 4.0}]);
        let path = normalize_path(Some(&raw), "test");
        assert_eq!(
            path,
            vec![
                GeoPoint { lat: 1.0, lng: 2.0 },
                GeoPoint::ZERO,
                GeoPoint { lat: 3.0, lng: 4.0 },
            ]
        );
    }
}
