//! Doctor search: free-text parsing and result presentation

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AssistantError;

/// Maximum number of listings returned to the user
pub const MAX_RESULTS: usize = 5;

/// Search radius passed to the places API
pub const SEARCH_RADIUS_METERS: u32 = 15_000;

/// Specialty used when none can be extracted
pub const DEFAULT_SPECIALTY: &str = "doctor";

const SPECIALTIES: &[&str] = &[
    "cardiologist",
    "dermatologist",
    "neurologist",
    "pediatrician",
    "paediatrician",
    "gynecologist",
    "gynaecologist",
    "orthopedist",
    "orthopedic",
    "psychiatrist",
    "psychologist",
    "ophthalmologist",
    "oncologist",
    "urologist",
    "nephrologist",
    "endocrinologist",
    "gastroenterologist",
    "pulmonologist",
    "rheumatologist",
    "dentist",
    "physician",
    "surgeon",
    "ent",
];

static SEARCH_VERB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(find|search|locate)\b").expect("valid verb regex"));

static SPECIALTY: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)\b({})s?\b", SPECIALTIES.join("|"));
    Regex::new(&pattern).expect("valid specialty regex")
});

static GENERIC_DOCTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(doctor|specialist)s?\b").expect("valid doctor regex"));

static TRAILING_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^.*\bin\s+(\p{L}[\p{L}\s.'-]*?)\s*[.?!]*$").expect("valid location regex")
});

/// Specialty and optional location parsed from a doctor-search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorQuery {
    pub specialty: String,
    pub location: Option<String>,
}

impl DoctorQuery {
    /// Parse a doctor-search request.
    ///
    /// Returns `None` unless the text contains a search verb followed by a
    /// specialty or a generic "doctor"/"specialist". Extraction misses fall
    /// back to `DEFAULT_SPECIALTY` and no location.
    pub fn parse(text: &str) -> Option<Self> {
        let verb = SEARCH_VERB.find(text)?;
        let rest = &text[verb.end()..];
        if !SPECIALTY.is_match(rest) && !GENERIC_DOCTOR.is_match(rest) {
            return None;
        }

        Some(Self {
            specialty: extract_specialty(rest).unwrap_or_else(|_| DEFAULT_SPECIALTY.to_string()),
            location: extract_location(text).ok(),
        })
    }
}

/// First known specialty keyword, lowercased and singular
pub fn extract_specialty(text: &str) -> Result<String, AssistantError> {
    SPECIALTY
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .ok_or_else(|| AssistantError::ParseMiss(format!("no specialty in {text:?}")))
}

/// Location from a trailing `in {location}` clause.
///
/// Falls back to "Delhi" when the clause is missing but the text mentions it.
pub fn extract_location(text: &str) -> Result<String, AssistantError> {
    if let Some(location) = TRAILING_LOCATION
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|l| !l.is_empty())
    {
        return Ok(location);
    }

    if text.to_lowercase().contains("delhi") {
        return Ok("Delhi".to_string());
    }

    Err(AssistantError::ParseMiss(format!("no location in {text:?}")))
}

/// Where to search for doctors
#[derive(Debug, Clone, PartialEq)]
pub enum SearchArea {
    Named(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl SearchArea {
    /// Text query sent to the places API
    pub fn query_for(&self, specialty: &str) -> String {
        match self {
            SearchArea::Named(location) => format!("{specialty} doctor in {location}"),
            SearchArea::Coordinates { .. } => format!("{specialty} doctor"),
        }
    }

    /// Human-readable name of the area
    pub fn label(&self) -> String {
        match self {
            SearchArea::Named(location) => location.clone(),
            SearchArea::Coordinates { .. } => "your area".to_string(),
        }
    }
}

/// A single places listing
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorResult {
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub open_now: Option<bool>,
}

impl DoctorResult {
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{rating}"),
            None => "No rating available".to_string(),
        }
    }

    pub fn open_now_label(&self) -> &'static str {
        match self.open_now {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "Unknown",
        }
    }
}

/// Message returned when the places API has no matches
pub fn no_results_message(specialty: &str, area: &str) -> String {
    format!("No doctors found for {specialty} in {area}.")
}

/// Message returned when the places API reports an error
pub fn error_message(detail: &str) -> String {
    format!("Error fetching doctors: {detail}")
}

/// Render listings as a numbered plain-text list
pub fn render_results(specialty: &str, area: &str, results: &[DoctorResult]) -> String {
    if results.is_empty() {
        return no_results_message(specialty, area);
    }

    let mut out = format!("Here are the top results for {specialty} in {area}:\n");
    for (i, doctor) in results.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}\n   Address: {}\n   Rating: {}\n   Open now: {}",
            i + 1,
            doctor.name,
            doctor.address,
            doctor.rating_label(),
            doctor.open_now_label()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_specialty_and_location() {
        let query = DoctorQuery::parse("find a cardiologist in Delhi").unwrap();
        assert_eq!(query.specialty, "cardiologist");
        assert_eq!(query.location.as_deref(), Some("Delhi"));
    }

    #[test]
    fn accepts_all_search_verbs() {
        for text in [
            "Search for a dermatologist in Mumbai",
            "LOCATE dermatologists in Mumbai",
            "can you find me a dermatologist specialist in Mumbai?",
        ] {
            let query = DoctorQuery::parse(text).unwrap();
            assert_eq!(query.specialty, "dermatologist");
            assert_eq!(query.location.as_deref(), Some("Mumbai"));
        }
    }

    #[test]
    fn last_in_clause_wins() {
        let query = DoctorQuery::parse("find a surgeon in a hurry in Chennai").unwrap();
        assert_eq!(query.location.as_deref(), Some("Chennai"));
    }

    #[test]
    fn generic_doctor_defaults_specialty() {
        let query = DoctorQuery::parse("find a doctor in Pune").unwrap();
        assert_eq!(query.specialty, DEFAULT_SPECIALTY);
        assert_eq!(query.location.as_deref(), Some("Pune"));
    }

    #[test]
    fn delhi_mention_overrides_pattern_miss() {
        let query = DoctorQuery::parse("find a neurologist near delhi").unwrap();
        assert_eq!(query.location.as_deref(), Some("Delhi"));
    }

    #[test]
    fn missing_location_is_none() {
        let query = DoctorQuery::parse("find a pediatrician").unwrap();
        assert_eq!(query.specialty, "pediatrician");
        assert_eq!(query.location, None);
    }

    #[test]
    fn non_search_text_is_not_a_doctor_query() {
        assert!(DoctorQuery::parse("what does a cardiologist do").is_none());
        assert!(DoctorQuery::parse("find the meaning of life").is_none());
        assert!(DoctorQuery::parse("I need to find my keys").is_none());
    }

    #[test]
    fn specialty_needs_word_boundaries() {
        assert!(extract_specialty("I went to the event").is_err());
        assert_eq!(extract_specialty("see an ENT").unwrap(), "ent");
    }

    #[test]
    fn location_miss_is_parse_miss() {
        let err = extract_location("find a dentist").unwrap_err();
        assert_eq!(err.kind(), "parse_miss");
    }

    #[test]
    fn search_area_queries() {
        let named = SearchArea::Named("Delhi".to_string());
        assert_eq!(named.query_for("cardiologist"), "cardiologist doctor in Delhi");
        assert_eq!(named.label(), "Delhi");

        let coords = SearchArea::Coordinates {
            latitude: 28.6,
            longitude: 77.2,
        };
        assert_eq!(coords.query_for("dentist"), "dentist doctor");
        assert_eq!(coords.label(), "your area");
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let doctor = DoctorResult {
            name: "City Clinic".to_string(),
            address: "1 Main St".to_string(),
            rating: None,
            open_now: None,
        };
        assert_eq!(doctor.rating_label(), "No rating available");
        assert_eq!(doctor.open_now_label(), "Unknown");
    }

    #[test]
    fn renders_numbered_listing() {
        let results = vec![
            DoctorResult {
                name: "Heart Care".to_string(),
                address: "2 Ring Rd".to_string(),
                rating: Some(4.5),
                open_now: Some(true),
            },
            DoctorResult {
                name: "Pulse Clinic".to_string(),
                address: "9 Park Ave".to_string(),
                rating: None,
                open_now: Some(false),
            },
        ];
        let text = render_results("cardiologist", "Delhi", &results);
        assert!(text.starts_with("Here are the top results for cardiologist in Delhi:"));
        assert!(text.contains("1. Heart Care\n   Address: 2 Ring Rd\n   Rating: 4.5\n   Open now: Yes"));
        assert!(text.contains("2. Pulse Clinic"));
        assert!(text.contains("Rating: No rating available"));
    }

    #[test]
    fn empty_listing_renders_no_results() {
        let text = render_results("dentist", "Pune", &[]);
        assert!(text.starts_with("No doctors found"));
    }
}
