pub mod currency_service;
pub mod gemini_service;
pub mod google_maps_service;
pub mod itinerary_generation_service;
pub mod itinerary_text_service;
pub mod location_service;
pub mod prompt_service;
pub mod weather_service;
