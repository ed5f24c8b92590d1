use actix_web::{web, HttpResponse};
use chrono::Utc;
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;
use url::Url;

use crate::error::AppError;
use crate::models::destination::{DestinationSummary, POPULAR_DESTINATIONS};
use crate::models::maps::{
    DirectionsRequest, ForecastRequest, LocationQuery, PlaceDetailsRequest, PlacesSearchRequest,
    ReverseGeocodeRequest, SnapToRoadsRequest, StaticMap, StaticMapRequest, DEFAULT_MAP_SIZE,
    DEFAULT_MAP_ZOOM,
};
use crate::models::required;
use crate::services::google_maps_service::{
    DirectionsQuery, MapsProvider, TravelMode, DESTINATION_RADIUS_METERS, NEARBY_RADIUS_METERS,
};
use crate::services::location_service::{LocationService, ATTRACTION_TYPE};
use crate::state::AppState;

const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";
const GOOGLE_UNAVAILABLE: &str = "Google services not available";
const MAX_DESTINATION_ATTRACTIONS: usize = 10;

fn locations(state: &AppState, unavailable: &'static str) -> Result<LocationService, AppError> {
    state
        .location_service()
        .ok_or(AppError::ServiceUnavailable(unavailable))
}

fn maps(state: &AppState) -> Result<Arc<dyn MapsProvider>, AppError> {
    Ok(locations(state, GOOGLE_UNAVAILABLE)?.maps().clone())
}

/*
    /api/location-info
*/
pub async fn location_info(
    state: web::Data<AppState>,
    body: web::Json<LocationQuery>,
) -> Result<HttpResponse, AppError> {
    let location = required(&body.location)
        .ok_or_else(|| AppError::BadRequest("Location is required".to_string()))?;
    let service = locations(&state, GOOGLE_UNAVAILABLE)?;

    let bundle = service.get_location_info(location).await?;
    Ok(HttpResponse::Ok().json(bundle))
}

/*
    /api/destinations
    Catalogue entries whose lookup fails are still listed.
*/
pub async fn destinations(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let destinations: Vec<DestinationSummary> = match state.location_service() {
        Some(service) => {
            join_all(POPULAR_DESTINATIONS.iter().map(|entry| {
                let service = service.clone();
                async move {
                    match service.get_location_info(&entry.query()).await {
                        Ok(bundle) => DestinationSummary::from_bundle(*entry, &bundle),
                        Err(e) => {
                            log::warn!("Destination lookup failed for {}: {}", entry.name, e);
                            DestinationSummary::unavailable(*entry)
                        }
                    }
                }
            }))
            .await
        }
        None => POPULAR_DESTINATIONS
            .iter()
            .map(|entry| DestinationSummary::unconfigured(*entry))
            .collect(),
    };

    Ok(HttpResponse::Ok().json(json!({
        "count": destinations.len(),
        "destinations": destinations,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/*
    /api/destination-details/{name}
*/
pub async fn destination_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    let service = locations(&state, GOOGLE_UNAVAILABLE)?;

    let details = service.get_location_info(&name).await?;
    let coords = details.location.coordinates;
    let mut attractions = service
        .maps()
        .search_nearby(coords.lat, coords.lng, ATTRACTION_TYPE, DESTINATION_RADIUS_METERS)
        .await
        .unwrap_or_else(|e| {
            log::warn!("Attraction search failed for '{}': {}", name, e);
            Vec::new()
        });
    attractions.truncate(MAX_DESTINATION_ATTRACTIONS);

    Ok(HttpResponse::Ok().json(json!({
        "destination": name,
        "details": details,
        "attractions": attractions,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/*
    /api/weather-forecast
*/
pub async fn weather_forecast(
    state: web::Data<AppState>,
    body: web::Json<ForecastRequest>,
) -> Result<HttpResponse, AppError> {
    let location = required(&body.location)
        .ok_or_else(|| AppError::BadRequest("Location is required".to_string()))?;
    let service = locations(&state, "Weather services not available")?;

    let resolved = service.resolve(location).await?;
    let coords = resolved.geometry.location;
    let forecast = service
        .weather()
        .forecast(coords.lat, coords.lng, body.days())
        .await
        .map_err(AppError::Provider)?;

    Ok(HttpResponse::Ok().json(forecast))
}

/*
    /api/directions
*/
pub async fn directions(
    state: web::Data<AppState>,
    body: web::Json<DirectionsRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (origin, destination) = match (required(&body.origin), required(&body.destination)) {
        (Some(o), Some(d)) => (o.to_string(), d.to_string()),
        _ => {
            return Err(AppError::BadRequest(
                "Origin and destination are required".to_string(),
            ))
        }
    };
    let maps = maps(&state)?;

    let query = DirectionsQuery {
        origin,
        destination,
        mode: body
            .mode
            .as_deref()
            .map_or(TravelMode::Driving, TravelMode::parse),
        waypoints: body.waypoints,
    };
    let directions = maps.directions(&query).await.map_err(AppError::Provider)?;

    Ok(HttpResponse::Ok().json(directions))
}

/*
    /api/places/search
    Either a free-text `query`, or a `location` plus place `type`.
*/
pub async fn search_places(
    state: web::Data<AppState>,
    body: web::Json<PlacesSearchRequest>,
) -> Result<HttpResponse, AppError> {
    let maps = maps(&state)?;
    let location = required(&body.location);

    let results = if let Some(query) = required(&body.query) {
        maps.text_search(query, location).await
    } else if let (Some(location), Some(place_type)) = (location, required(&body.place_type)) {
        let first = maps
            .geocode(location)
            .await
            .ok()
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| AppError::BadRequest("Could not geocode location".to_string()))?;
        let coords = first.geometry.location;
        maps.search_nearby(coords.lat, coords.lng, place_type, NEARBY_RADIUS_METERS)
            .await
    } else {
        return Err(AppError::BadRequest(
            "Query or location+type are required".to_string(),
        ));
    };

    let places = results.map_err(AppError::Provider)?;
    Ok(HttpResponse::Ok().json(json!({ "results": places })))
}

/*
    /api/places/details
*/
pub async fn place_details(
    state: web::Data<AppState>,
    body: web::Json<PlaceDetailsRequest>,
) -> Result<HttpResponse, AppError> {
    let place_id = required(&body.place_id)
        .ok_or_else(|| AppError::BadRequest("place_id is required".to_string()))?;
    let details = maps(&state)?
        .place_details(place_id)
        .await
        .map_err(AppError::Provider)?;

    Ok(HttpResponse::Ok().json(details))
}

/*
    /api/geocode/reverse
*/
pub async fn reverse_geocode(
    state: web::Data<AppState>,
    body: web::Json<ReverseGeocodeRequest>,
) -> Result<HttpResponse, AppError> {
    let (lat, lng) = match (body.lat, body.lng) {
        (Some(lat), Some(lng)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) => {
            (lat, lng)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Valid lat and lng are required".to_string(),
            ))
        }
    };
    let results = maps(&state)?
        .reverse_geocode(lat, lng)
        .await
        .map_err(AppError::Provider)?;

    Ok(HttpResponse::Ok().json(json!({ "results": results })))
}

/*
    /api/roads/snap
*/
pub async fn snap_to_roads(
    state: web::Data<AppState>,
    body: web::Json<SnapToRoadsRequest>,
) -> Result<HttpResponse, AppError> {
    let path = required(&body.path)
        .ok_or_else(|| AppError::BadRequest("Path is required".to_string()))?;
    let snapped = maps(&state)?
        .snap_to_roads(path, body.interpolate)
        .await
        .map_err(AppError::Provider)?;

    Ok(HttpResponse::Ok().json(snapped))
}

/*
    /api/maps/static
    Builds the URL only; nothing is fetched.
*/
pub async fn static_map(
    state: web::Data<AppState>,
    body: web::Json<StaticMapRequest>,
) -> Result<HttpResponse, AppError> {
    let center = required(&body.center)
        .ok_or_else(|| AppError::BadRequest("Center location is required".to_string()))?;
    let key = state
        .config
        .google_api_key
        .as_deref()
        .ok_or(AppError::ServiceUnavailable("Google API key not available"))?;

    let map_url = static_map_url(
        center,
        body.zoom.unwrap_or(DEFAULT_MAP_ZOOM),
        required(&body.size).unwrap_or(DEFAULT_MAP_SIZE),
        &body.markers,
        key,
    )?;
    Ok(HttpResponse::Ok().json(StaticMap { map_url }))
}

fn static_map_url(
    center: &str,
    zoom: u8,
    size: &str,
    markers: &[String],
    key: &str,
) -> Result<String, AppError> {
    let zoom = zoom.to_string();
    let mut params = vec![("center", center), ("zoom", zoom.as_str()), ("size", size)];
    params.extend(markers.iter().map(|m| ("markers", m.as_str())));
    params.push(("key", key));

    Url::parse_with_params(STATIC_MAP_URL, &params)
        .map(String::from)
        .map_err(|e| AppError::Internal(format!("static map url: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_map_url_repeats_markers() {
        let url = static_map_url(
            "Paris, France",
            13,
            "600x400",
            &["color:red|48.85,2.35".to_string(), "label:B|Louvre".to_string()],
            "abc",
        )
        .unwrap();

        let parsed = Url::parse(&url).unwrap();
        let markers: Vec<String> = parsed
            .query_pairs()
            .filter(|(k, _)| k == "markers")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert!(url.starts_with("https://maps.googleapis.com/maps/api/staticmap?center=Paris%2C+France"));
        assert_eq!(markers, vec!["color:red|48.85,2.35", "label:B|Louvre"]);
        assert!(url.contains("zoom=13&size=600x400"));
    }
}
