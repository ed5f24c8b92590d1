mod common;

use actix_web::{http::header, test};
use serde_json::{json, Value};

use common::{StubMaps, StubModel, TestApp, MARKDOWN_ITINERARY};

fn paris_trip() -> Value {
    json!({
        "destination": "Paris, France",
        "start_date": "2026-05-01",
        "end_date": "2026-05-03",
        "duration": 2,
        "people": 2,
        "budget": "moderate",
        "travelTransport": "plane",
        "interests": ["museums", "food"]
    })
}

#[actix_rt::test]
async fn test_generate_itinerary_for_paris() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_trip())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["destination"], "Paris, France");
    assert_eq!(body["duration"], 2);
    assert_eq!(body["start_date"], "2026-05-01");
    assert!(body["generated_at"].is_string());

    let itinerary = body["itinerary"].as_str().unwrap();
    assert!(itinerary.starts_with("Paris Adventure\nDay 1\n"));
    assert!(itinerary.contains("CURRENCY INFORMATION:"));
    assert!(itinerary.contains("Exchange Rate: 1 USD = 0.92 EUR"));
    assert!(!itinerary.contains("**"));
    assert!(!itinerary.contains('#'));
    assert!(itinerary.ends_with("Afternoon: Montmartre"));

    let prompt = test_app.model.last_prompt().unwrap();
    assert!(prompt.contains("Local currency for Paris, France: EUR"));
    assert!(prompt.contains("Location Context:\nAddress: Paris, France"));
    assert!(prompt.contains("Nearby Attractions: Louvre Museum, Eiffel Tower"));
    assert_eq!(test_app.rates.calls.count("latest_rate"), 1);
}

#[actix_rt::test]
async fn test_missing_duration_is_rejected_before_any_provider_call() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut trip = paris_trip();
    trip.as_object_mut().unwrap().remove("duration");

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(trip)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing required fields: duration");
    assert_eq!(test_app.model.prompt_count(), 0);
    assert_eq!(test_app.maps.calls.total(), 0);
    assert_eq!(test_app.rates.calls.total(), 0);
}

#[actix_rt::test]
async fn test_empty_strings_and_zero_count_as_missing() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(json!({
            "destination": "",
            "start_date": "2026-05-01",
            "end_date": "2026-05-03",
            "duration": 2,
            "people": 0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields: destination, people");
}

#[actix_rt::test]
async fn test_malformed_json_returns_failure_shape() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"destination\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[actix_rt::test]
async fn test_generate_without_model_is_unavailable() {
    let test_app = TestApp::new().without_model();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_trip())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Gemini AI is not available. Please check the API key configuration."
    );
    assert_eq!(test_app.maps.calls.total(), 0);
}

#[actix_rt::test]
async fn test_model_failure_is_service_unavailable() {
    let test_app = TestApp::with(StubMaps::default(), StubModel::failing(500), Some(0.92));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_trip())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate itinerary"));
}

#[actix_rt::test]
async fn test_unknown_destination_still_generates_without_context() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut trip = paris_trip();
    trip["destination"] = json!("Nowhereland");

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(trip)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    // Unknown country resolves to USD, so no currency block
    assert!(!body["itinerary"].as_str().unwrap().contains("CURRENCY INFORMATION"));
    assert!(!test_app.model.last_prompt().unwrap().contains("Location Context"));
    assert_eq!(test_app.maps.calls.count("geocode"), 1);
    assert_eq!(test_app.maps.calls.count("timezone"), 0);
    assert_eq!(test_app.maps.calls.count("search_nearby"), 0);
    assert_eq!(test_app.weather.calls.total(), 0);
}

#[actix_rt::test]
async fn test_generate_without_location_services() {
    let test_app = TestApp::new().without_locations();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-itinerary")
        .set_json(paris_trip())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(test_app.maps.calls.total(), 0);
    assert!(!test_app.model.last_prompt().unwrap().contains("Location Context"));
}

#[actix_rt::test]
async fn test_refine_itinerary() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/refine-itinerary")
        .set_json(json!({
            "current_itinerary": "Day 1: Louvre",
            "feedback": "Add a food tour",
            "destination": "Paris, France"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["refined_at"].is_string());
    let itinerary = body["itinerary"].as_str().unwrap();
    assert!(!itinerary.contains("**"));
    assert!(itinerary.contains("Local Currency: EUR"));

    let prompt = test_app.model.last_prompt().unwrap();
    assert!(prompt.contains("ORIGINAL ITINERARY:\nDay 1: Louvre"));
    assert!(prompt.contains("USER FEEDBACK:\nAdd a food tour"));
    assert_eq!(test_app.maps.calls.total(), 0);
}

#[actix_rt::test]
async fn test_refine_requires_all_fields() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/refine-itinerary")
        .set_json(json!({"current_itinerary": MARKDOWN_ITINERARY, "feedback": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required data for refinement");
    assert_eq!(test_app.model.prompt_count(), 0);
}

#[actix_rt::test]
async fn test_refine_without_model_is_unavailable() {
    let test_app = TestApp::new().without_model();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/refine-itinerary")
        .set_json(json!({
            "current_itinerary": "Day 1: Louvre",
            "feedback": "More museums",
            "destination": "Paris, France"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Gemini AI is not available");
}
