//! Prompt construction for the itinerary model.
//!
//! Preference wording comes from small lookup tables and the blocks are
//! concatenated in a fixed order. Nothing here fails: an unset preference just
//! contributes no line.

use crate::models::location::LocationBundle;
use crate::models::trip::{BudgetTier, LodgingPreference, TripRequest};
use crate::services::currency_service::{country_from_destination, resolve_currency};

const CONTEXT_PLACE_LIMIT: usize = 5;

const TRAVEL_TRANSPORT_NOTES: &[(&str, &str)] = &[
    ("plane", "include airport transfer recommendations"),
    ("drive", "include parking information and scenic route suggestions"),
    ("train", "include train station information and connections"),
    ("cruise", "include port information and shore excursions"),
];

const LOCAL_TRANSPORT_NOTES: &[(&str, &str)] = &[
    ("rental_car", "include rental locations, parking, and driving tips"),
    ("public_transport", "include transit passes, routes, and schedules"),
    ("walking", "focus on walkable attractions and neighborhoods"),
    ("rideshare", "include ride-hailing apps and taxi information"),
];

fn budget_wording(tier: BudgetTier) -> Option<&'static str> {
    match tier {
        BudgetTier::Budget => {
            Some("Focus on budget-friendly options, free attractions, and affordable accommodations")
        }
        BudgetTier::Moderate => Some("Include mid-range accommodations and dining options"),
        BudgetTier::Luxury => {
            Some("Include luxury accommodations, fine dining, and premium experiences")
        }
        BudgetTier::Unspecified => None,
    }
}

fn lodging_wording(lodging: LodgingPreference) -> Option<&'static str> {
    match lodging {
        LodgingPreference::Hotel => Some("Recommend hotels with appropriate amenities for the group size"),
        LodgingPreference::Airbnb => {
            Some("Suggest Airbnb or vacation rental properties suitable for the group")
        }
        LodgingPreference::Resort => Some("Focus on resort accommodations with inclusive amenities"),
        LodgingPreference::Hostel => Some("Recommend hostels with private rooms or dorms as appropriate"),
        LodgingPreference::AlreadyBooked => {
            Some("Accommodation is already booked, focus on activities and dining")
        }
        LodgingPreference::Unspecified => None,
    }
}

/// Group wording. Children take precedence over the head-count thresholds.
fn group_wording(people: u32, children: u32) -> &'static [&'static str] {
    if children > 0 {
        &[
            "Plan family-friendly activities suitable for children",
            "Consider child safety, accessibility, and age-appropriate attractions",
        ]
    } else {
        match people {
            0 | 1 => &["Plan activities suitable for solo travelers"],
            2 => &["Plan romantic and couple-friendly activities"],
            3 | 4 => &["Plan activities suitable for small groups and families"],
            _ => &["Plan activities suitable for larger groups, consider group discounts and reservations"],
        }
    }
}

fn transport_line(label: &str, mode: &str, notes: &[(&str, &str)]) -> String {
    match notes.iter().find(|(key, _)| *key == mode) {
        Some((_, note)) => format!("{}: {} ({})", label, mode, note),
        None => format!("{}: {}", label, mode),
    }
}

fn plural(count: u32, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// "2 people (including 1 child)"
pub fn traveler_wording(people: u32, children: u32) -> String {
    let mut text = plural(people, "person", "people");
    if children > 0 {
        text.push_str(&format!(" (including {})", plural(children, "child", "children")));
    }
    text
}

fn bullet(out: &mut String, line: &str) {
    out.push_str("\n- ");
    out.push_str(line);
}

fn preference_lines(trip: &TripRequest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.extend(budget_wording(trip.budget()).map(str::to_string));
    lines.extend(lodging_wording(trip.lodging()).map(str::to_string));
    if let Some(mode) = trip.travel_transport() {
        lines.push(transport_line("Travel method", mode, TRAVEL_TRANSPORT_NOTES));
    }
    if let Some(mode) = trip.local_transport() {
        lines.push(transport_line("Local transportation", mode, LOCAL_TRANSPORT_NOTES));
    }
    lines.extend(
        group_wording(trip.people(), trip.children())
            .iter()
            .map(|l| l.to_string()),
    );
    if let Some(requests) = trip.special_requests() {
        lines.push(format!("Special considerations: {}", requests));
    }
    lines
}

/// Full instruction text for a new itinerary.
pub fn build_prompt(trip: &TripRequest, context: Option<&LocationBundle>) -> String {
    let destination = trip.destination();
    let currency = resolve_currency(country_from_destination(destination));
    let travelers = traveler_wording(trip.people(), trip.children());
    let interests = if trip.interests().is_empty() {
        "general sightseeing".to_string()
    } else {
        trip.interests().join(", ")
    };

    let mut prompt = format!(
        "As a travel planner, create a detailed {}-day travel itinerary for {} from {} to {} for {}.\n",
        trip.duration(),
        destination,
        trip.start_date(),
        trip.end_date(),
        travelers
    );

    prompt.push_str("\nTRAVELER PREFERENCES:");
    bullet(&mut prompt, &format!("Group size: {}", travelers));
    bullet(&mut prompt, &format!("Interests: {}", interests));
    for line in preference_lines(trip) {
        bullet(&mut prompt, &line);
    }
    prompt.push('\n');

    prompt.push_str("\nCURRENCY & PRICING REQUIREMENTS:");
    bullet(&mut prompt, &format!("Local currency for {}: {}", destination, currency));
    bullet(
        &mut prompt,
        &format!(
            "ALL prices must be provided in local currency ({}) with USD conversion in parentheses",
            currency
        ),
    );
    bullet(
        &mut prompt,
        &format!("Format: \"{}100 (~$75 USD)\" for local prices", currency),
    );
    bullet(
        &mut prompt,
        "Include realistic price ranges for restaurants, attractions, transportation, and activities",
    );
    bullet(
        &mut prompt,
        &format!(
            "Consider group size when calculating total costs (multiply individual prices by {})",
            trip.people()
        ),
    );
    bullet(&mut prompt, "Mention any group discounts available for attractions or activities");
    prompt.push('\n');

    prompt.push_str("\nREQUIREMENTS:");
    bullet(&mut prompt, "Provide a day-by-day breakdown (Day 1, Day 2, etc.)");
    bullet(
        &mut prompt,
        &format!(
            "Include specific activities, attractions, and experiences with prices in {} and USD for {}",
            currency, travelers
        ),
    );
    bullet(
        &mut prompt,
        "Suggest actual restaurant names and local cuisine with menu price ranges in both currencies",
    );
    bullet(&mut prompt, "Include timing recommendations (morning, afternoon, evening)");
    bullet(
        &mut prompt,
        &format!("Add transportation tips between locations with costs in {} and USD", currency),
    );
    bullet(&mut prompt, &format!("Include daily budget estimates in both {} and USD", currency));
    prompt.push('\n');

    prompt.push_str("\nLOCATION & SAFETY REQUIREMENTS:");
    bullet(
        &mut prompt,
        "Provide EXACT FULL ADDRESSES for all attractions, restaurants, and hotels",
    );
    bullet(
        &mut prompt,
        "Format addresses as: \"Address: [Complete Street Address, City, Postal Code, Country]\"",
    );
    bullet(&mut prompt, "Add location-specific safety warnings for attractions in high-risk areas");
    bullet(&mut prompt, "Mention cultural insights, local tips, opening hours and seasonal factors");
    bullet(&mut prompt, "Include approximate time needed for each activity");
    prompt.push('\n');

    prompt.push_str("\nFORMAT & STRUCTURE:");
    bullet(&mut prompt, "Use clear headings for each day (Day 1:, Day 2:, etc.)");
    bullet(&mut prompt, "Organize activities by time of day (Morning, Afternoon, Evening)");
    bullet(&mut prompt, "Do NOT use any separators like -- or === in your text");
    bullet(
        &mut prompt,
        "Do not include any *, **, or # characters, use indents and hyphens for cleaner formatting",
    );
    bullet(&mut prompt, "Include weather considerations and timezone information when available");
    prompt.push('\n');

    prompt.push_str("\nREQUIRED SECTION STRUCTURE:\n");
    let sections = [
        format!("Day 1 activities and details with pricing in {} and USD", currency),
        "Day 2 activities and details (if multi-day) with pricing in both currencies".to_string(),
        "Additional days as needed with consistent pricing format".to_string(),
        format!("DAILY BUDGET SUMMARY (estimated total daily costs in {} and USD)", currency),
        "CURRENCY & PAYMENT INFORMATION (payment methods, tipping customs)".to_string(),
        "STRESS RELIEF & WELLNESS (relaxation and mental well-being)".to_string(),
        format!(
            "SAFETY INFORMATION (general safety tips for {}, areas to avoid at night, common scams, \
             emergency numbers, transportation safety, local customs, money and document safety)",
            destination
        ),
    ];
    for (i, section) in sections.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, section));
    }

    prompt.push_str("\nSTRESS RELIEF & WELLNESS REQUIREMENTS:");
    bullet(
        &mut prompt,
        &format!("Provide specific stress-relief activities and locations in {}", destination),
    );
    bullet(
        &mut prompt,
        "Include local spas, wellness centers, parks, or meditation spots with addresses and prices",
    );
    bullet(&mut prompt, "Suggest calming activities for each day and quiet spaces after busy sightseeing");
    bullet(&mut prompt, "Mention jet lag management, hydration and sleep tips");
    prompt.push('\n');

    prompt.push_str(
        "\nEnd with the STRESS RELIEF & WELLNESS section followed by a comprehensive SAFETY INFORMATION section. \
         Write clean, flowing text that is practical, actionable, safe and budget-conscious.",
    );

    if let Some(bundle) = context {
        prompt.push_str(&location_context(bundle));
    }

    prompt
}

/// Context block appended when location data is available.
pub fn location_context(bundle: &LocationBundle) -> String {
    let mut context = String::from("\n\nLocation Context:\n");
    context.push_str(&format!("Address: {}\n", bundle.location.address));
    context.push_str(&format!(
        "Current Weather: {}°C, {}\n",
        bundle.weather.temperature(),
        bundle.weather.condition()
    ));

    let attractions = bundle.attraction_names(CONTEXT_PLACE_LIMIT);
    if !attractions.is_empty() {
        context.push_str(&format!("Nearby Attractions: {}\n", attractions.join(", ")));
    }
    let restaurants = bundle.restaurant_names(CONTEXT_PLACE_LIMIT);
    if !restaurants.is_empty() {
        context.push_str(&format!("Nearby Restaurants: {}\n", restaurants.join(", ")));
    }
    context
}

/// Follow-up prompt that embeds the previous itinerary and the feedback verbatim.
pub fn build_refinement_prompt(current_itinerary: &str, feedback: &str, destination: &str) -> String {
    format!(
        "The user has requested changes to their travel itinerary for {destination}.\n\n\
         ORIGINAL ITINERARY:\n{current_itinerary}\n\n\
         USER FEEDBACK:\n{feedback}\n\n\
         Please update the itinerary based on the user's feedback. Keep the same format and structure, \
         but incorporate the requested changes. Maintain the quality and detail of the original while \
         addressing the specific feedback provided."
    )
}
