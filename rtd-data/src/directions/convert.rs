//! Conversion of wire responses into provider path results.

use rtd_core::{
    DirectionsError, DirectionsRequest, GeoPoint, LatLngBounds, PathRequest, ProviderPathResult,
    ProviderRoute, RouteLeg, RouteStep, TravelMode,
};

use super::google::{Bounds, DirectionsResponse, Leg, Route, Step};

/// Polyline precision used by the Directions service.
const POLYLINE_PRECISION: u32 = 5;

/// Convert a decoded response for `request` into a path result.
///
/// Non-`OK` statuses become [`DirectionsError::Status`]; undecodable
/// polylines become [`DirectionsError::Parse`].
pub(crate) fn convert_response(
    request: &DirectionsRequest,
    response: DirectionsResponse,
) -> Result<ProviderPathResult, DirectionsError> {
    if !response.is_ok() {
        return Err(DirectionsError::Status {
            code: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let routes = response
        .routes
        .into_iter()
        .map(convert_route)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProviderPathResult {
        routes,
        request: Some(PathRequest {
            origin: request.origin,
            destination: request.destination,
            travel_mode: request.travel_mode,
        }),
        geocoded_waypoints: response.geocoded_waypoints,
    })
}

/// Decode a precision-5 encoded polyline into coordinates.
pub(crate) fn decode_path(encoded: &str) -> Result<Vec<GeoPoint>, DirectionsError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION).map_err(|err| {
        DirectionsError::Parse {
            message: format!("invalid polyline: {err}"),
        }
    })?;
    Ok(line.into_iter().map(GeoPoint::from).collect())
}

fn convert_route(route: Route) -> Result<ProviderRoute, DirectionsError> {
    let legs = route
        .legs
        .into_iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProviderRoute {
        bounds: route.bounds.map(convert_bounds),
        legs,
        overview_path: decode_path(&route.overview_polyline.points)?,
        overview_polyline: route.overview_polyline.points,
        summary: route.summary,
        copyrights: route.copyrights,
        warnings: route.warnings,
        waypoint_order: route.waypoint_order,
    })
}

const fn convert_bounds(bounds: Bounds) -> LatLngBounds {
    LatLngBounds {
        north: bounds.northeast.lat,
        south: bounds.southwest.lat,
        east: bounds.northeast.lng,
        west: bounds.southwest.lng,
    }
}

fn convert_leg(leg: Leg) -> Result<RouteLeg, DirectionsError> {
    let steps = leg
        .steps
        .into_iter()
        .map(convert_step)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RouteLeg {
        distance: leg.distance,
        duration: leg.duration,
        start_address: leg.start_address,
        end_address: leg.end_address,
        start_location: leg.start_location,
        end_location: leg.end_location,
        steps,
        via_waypoints: leg.via_waypoint.into_iter().map(|via| via.location).collect(),
    })
}

fn convert_step(step: Step) -> Result<RouteStep, DirectionsError> {
    Ok(RouteStep {
        path: decode_path(&step.polyline.points)?,
        distance: step.distance,
        duration: step.duration,
        start_location: step.start_location,
        end_location: step.end_location,
        instructions: step.html_instructions,
        travel_mode: TravelMode::parse(&step.travel_mode).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> DirectionsRequest {
        DirectionsRequest::driving_alternatives(
            GeoPoint { lat: 38.5, lng: -120.2 },
            GeoPoint { lat: 43.252, lng: -126.453 },
        )
    }

    fn response(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).expect("fixture should deserialise")
    }

    #[rstest]
    fn decodes_reference_polyline() {
        let path = decode_path("_p~iF~ps|U_ulLnnqC_mqNvxq`@").expect("valid polyline");

        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        assert_eq!(path.len(), expected.len());
        for (point, (lat, lng)) in path.iter().zip(expected) {
            assert!((point.lat - lat).abs() < 1e-9, "lat {} != {lat}", point.lat);
            assert!((point.lng - lng).abs() < 1e-9, "lng {} != {lng}", point.lng);
        }
    }

    #[rstest]
    fn empty_polyline_is_an_empty_path() {
        assert_eq!(decode_path("").expect("empty is valid"), Vec::new());
    }

    #[rstest]
    fn converts_routes_and_echoes_request(request: DirectionsRequest) {
        let body = response(
            r#"{
                "status": "OK",
                "routes": [{
                    "bounds": {
                        "northeast": {"lat": 43.252, "lng": -120.2},
                        "southwest": {"lat": 38.5, "lng": -126.453}
                    },
                    "legs": [{
                        "distance": {"text": "5.1 km", "value": 5100},
                        "duration": {"text": "45 mins", "value": 2700},
                        "steps": [{
                            "html_instructions": "Head <b>north</b>",
                            "polyline": {"points": "_p~iF~ps|U_ulLnnqC"},
                            "travel_mode": "DRIVING"
                        }],
                        "via_waypoint": [{"location": {"lat": 40.7, "lng": -120.95}}]
                    }],
                    "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"},
                    "summary": "I-5"
                }]
            }"#,
        );

        let result = convert_response(&request, body).expect("should convert");

        let route = result.primary_route().expect("one route");
        assert_eq!(route.overview_path.len(), 3);
        assert_eq!(route.summary, "I-5");
        let bounds = route.bounds.expect("bounds");
        assert_eq!(bounds.north, 43.252);
        assert_eq!(bounds.west, -126.453);
        let leg = result.primary_leg().expect("one leg");
        assert_eq!(leg.distance.text, "5.1 km");
        assert_eq!(leg.via_waypoints, vec![GeoPoint { lat: 40.7, lng: -120.95 }]);
        let step = leg.steps.first().expect("one step");
        assert_eq!(step.instructions, "Head <b>north</b>");
        assert_eq!(step.path.len(), 2);
        assert_eq!(step.travel_mode, TravelMode::Driving);
        assert_eq!(
            result.request.map(|echoed| echoed.origin),
            Some(request.origin)
        );
    }

    #[rstest]
    fn non_ok_status_is_a_status_error(request: DirectionsRequest) {
        let body = response(r#"{"status": "ZERO_RESULTS", "routes": []}"#);

        let err = convert_response(&request, body).expect_err("should fail");

        assert_eq!(
            err,
            DirectionsError::Status {
                code: "ZERO_RESULTS".to_owned(),
                message: String::new(),
            }
        );
    }

    #[rstest]
    fn corrupt_polyline_is_a_parse_error(request: DirectionsRequest) {
        let body = response(
            r#"{"status": "OK", "routes": [{"overview_polyline": {"points": "_p~iF~ps|U!!"}}]}"#,
        );

        let err = convert_response(&request, body).expect_err("should fail");

        assert!(matches!(err, DirectionsError::Parse { .. }));
    }
}
