use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Raw body of `POST /api/generate-itinerary`, before validation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GenerateItineraryRequest {
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<u32>,
    pub people: Option<u32>,
    pub children: Option<u32>,
    pub budget: Option<String>,
    pub lodging: Option<String>,
    #[serde(rename = "travelTransport")]
    pub travel_transport: Option<String>,
    #[serde(rename = "localTransport")]
    pub local_transport: Option<String>,
    pub interests: Option<Vec<String>>,
    pub special_requests: Option<String>,
}

impl GenerateItineraryRequest {
    /// Required fields that are absent, blank or zero, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.destination) {
            missing.push("destination");
        }
        if is_blank(&self.start_date) {
            missing.push("start_date");
        }
        if is_blank(&self.end_date) {
            missing.push("end_date");
        }
        if self.duration.unwrap_or(0) == 0 {
            missing.push("duration");
        }
        if self.people.unwrap_or(0) == 0 {
            missing.push("people");
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    Moderate,
    Luxury,
    Unspecified,
}

impl BudgetTier {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "budget" => BudgetTier::Budget,
            "moderate" => BudgetTier::Moderate,
            "luxury" => BudgetTier::Luxury,
            _ => BudgetTier::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LodgingPreference {
    Hotel,
    Airbnb,
    Resort,
    Hostel,
    AlreadyBooked,
    Unspecified,
}

impl LodgingPreference {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "hotel" => LodgingPreference::Hotel,
            "airbnb" => LodgingPreference::Airbnb,
            "resort" => LodgingPreference::Resort,
            "hostel" => LodgingPreference::Hostel,
            "already_booked" => LodgingPreference::AlreadyBooked,
            _ => LodgingPreference::Unspecified,
        }
    }
}

/// A validated trip. Fields are private so a `TripRequest` can only come out
/// of [`TripRequest::try_from`].
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    destination: String,
    start_date: String,
    end_date: String,
    duration: u32,
    people: u32,
    children: u32,
    budget: BudgetTier,
    lodging: LodgingPreference,
    travel_transport: Option<String>,
    local_transport: Option<String>,
    interests: Vec<String>,
    special_requests: Option<String>,
}

impl TryFrom<GenerateItineraryRequest> for TripRequest {
    type Error = AppError;

    fn try_from(req: GenerateItineraryRequest) -> Result<Self, Self::Error> {
        let missing = req.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Ok(Self {
            destination: req.destination.unwrap_or_default().trim().to_string(),
            start_date: req.start_date.unwrap_or_default().trim().to_string(),
            end_date: req.end_date.unwrap_or_default().trim().to_string(),
            duration: req.duration.unwrap_or_default(),
            people: req.people.unwrap_or_default(),
            children: req.children.unwrap_or(0),
            budget: req
                .budget
                .as_deref()
                .map_or(BudgetTier::Unspecified, BudgetTier::parse),
            lodging: req
                .lodging
                .as_deref()
                .map_or(LodgingPreference::Unspecified, LodgingPreference::parse),
            travel_transport: non_blank(req.travel_transport),
            local_transport: non_blank(req.local_transport),
            interests: req
                .interests
                .unwrap_or_default()
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            special_requests: non_blank(req.special_requests),
        })
    }
}

impl TripRequest {
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn people(&self) -> u32 {
        self.people
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn budget(&self) -> BudgetTier {
        self.budget
    }

    pub fn lodging(&self) -> LodgingPreference {
        self.lodging
    }

    pub fn travel_transport(&self) -> Option<&str> {
        self.travel_transport.as_deref()
    }

    pub fn local_transport(&self) -> Option<&str> {
        self.local_transport.as_deref()
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn special_requests(&self) -> Option<&str> {
        self.special_requests.as_deref()
    }
}

/// Body of `POST /api/refine-itinerary`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RefineItineraryRequest {
    pub current_itinerary: Option<String>,
    pub feedback: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedItinerary {
    pub success: bool,
    pub itinerary: String,
    pub destination: String,
    pub duration: u32,
    pub start_date: String,
    pub end_date: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct RefinedItinerary {
    pub success: bool,
    pub itinerary: String,
    pub refined_at: String,
}
