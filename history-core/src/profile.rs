//! User profile: birth year, custom life events and school-age settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BIRTH_YEAR: i32 = 1990;
/// Largest birth year that fits in four digits.
pub const MAX_BIRTH_YEAR: i32 = 9999;
pub const MAX_EVENT_AGE: u32 = 100;

/// Errors from profile edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("birth year must be 1 to 4 digits, got {0:?}")]
    InvalidBirthYear(String),

    #[error("age {0} is out of range (0-100)")]
    AgeOutOfRange(u32),

    #[error("life event text is empty")]
    EmptyEvent,

    #[error("no life event at index {0}")]
    NoSuchEvent(usize),
}

/// Something that happened at a given age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub age: u32,
    pub event: String,
}

impl LifeEvent {
    pub fn new(age: u32, event: impl Into<String>) -> Result<Self, ProfileError> {
        let event = Self {
            age,
            event: event.into(),
        };
        event.validate()?;
        Ok(event)
    }

    /// Check the rules [`LifeEvent::new`] enforces, for events read from JSON.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.age > MAX_EVENT_AGE {
            return Err(ProfileError::AgeOutOfRange(self.age));
        }
        if self.event.trim().is_empty() {
            return Err(ProfileError::EmptyEvent);
        }
        Ok(())
    }

    /// Calendar year of the event for someone born in `birth_year`, or
    /// `None` if it does not fit in an `i32`.
    pub fn year(&self, birth_year: i32) -> Option<i32> {
        i32::try_from(self.age)
            .ok()
            .and_then(|age| birth_year.checked_add(age))
    }
}

/// Inclusive age range of a school stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRange {
    pub start_age: i32,
    pub end_age: i32,
}

impl AgeRange {
    pub const fn new(start_age: i32, end_age: i32) -> Self {
        Self { start_age, end_age }
    }

    pub fn contains(&self, age: i32) -> bool {
        (self.start_age..=self.end_age).contains(&age)
    }
}

/// Age ranges used to label the timeline with school stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSettings {
    pub elementary: AgeRange,
    pub middle: AgeRange,
    pub high: AgeRange,
    pub university: AgeRange,
}

impl Default for StudentSettings {
    fn default() -> Self {
        Self {
            elementary: AgeRange::new(7, 12),
            middle: AgeRange::new(13, 15),
            high: AgeRange::new(16, 18),
            university: AgeRange::new(19, 22),
        }
    }
}

/// Stage of life an age falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeGroup {
    EarlyChildhood,
    Elementary,
    MiddleSchool,
    HighSchool,
    University,
    Adult,
}

impl AgeGroup {
    pub fn name(&self) -> &'static str {
        match self {
            AgeGroup::EarlyChildhood => "Early childhood",
            AgeGroup::Elementary => "Elementary school",
            AgeGroup::MiddleSchool => "Middle school",
            AgeGroup::HighSchool => "High school",
            AgeGroup::University => "University",
            AgeGroup::Adult => "Life",
        }
    }
}

impl StudentSettings {
    /// Classify an age. Ages before elementary school are early childhood;
    /// ages outside every configured range (gaps included) are adult life.
    pub fn age_group(&self, age: i32) -> AgeGroup {
        if age < self.elementary.start_age {
            AgeGroup::EarlyChildhood
        } else if self.elementary.contains(age) {
            AgeGroup::Elementary
        } else if self.middle.contains(age) {
            AgeGroup::MiddleSchool
        } else if self.high.contains(age) {
            AgeGroup::HighSchool
        } else if self.university.contains(age) {
            AgeGroup::University
        } else {
            AgeGroup::Adult
        }
    }
}

/// Per-user settings persisted alongside the rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default = "default_birth_year")]
    pub birth_year: i32,
    /// Kept sorted by age.
    #[serde(default)]
    pub life_events: Vec<LifeEvent>,
    #[serde(default)]
    pub student_settings: StudentSettings,
}

fn default_birth_year() -> i32 {
    DEFAULT_BIRTH_YEAR
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            birth_year: DEFAULT_BIRTH_YEAR,
            life_events: Vec::new(),
            student_settings: StudentSettings::default(),
        }
    }
}

impl UserProfile {
    /// Age in a given calendar year.
    pub fn age_in(&self, year: i32) -> i32 {
        year - self.birth_year
    }

    pub fn age_group(&self, age: i32) -> AgeGroup {
        self.student_settings.age_group(age)
    }

    /// Insert an event, keeping events ordered by age. Events of equal age
    /// keep insertion order.
    pub fn add_life_event(&mut self, event: LifeEvent) {
        let at = self.life_events.partition_point(|e| e.age <= event.age);
        self.life_events.insert(at, event);
    }

    pub fn remove_life_event(&mut self, index: usize) -> Result<LifeEvent, ProfileError> {
        if index >= self.life_events.len() {
            return Err(ProfileError::NoSuchEvent(index));
        }
        Ok(self.life_events.remove(index))
    }

    pub fn set_birth_year(&mut self, input: &str) -> Result<(), ProfileError> {
        self.birth_year = parse_birth_year(input)?;
        Ok(())
    }

    /// Restore age order after events were set directly, e.g. from JSON.
    /// Events of equal age keep their relative order.
    pub fn sort_life_events(&mut self) {
        self.life_events.sort_by_key(|e| e.age);
    }

    /// Check a profile that did not come through the editing methods.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(0..=MAX_BIRTH_YEAR).contains(&self.birth_year) {
            return Err(ProfileError::InvalidBirthYear(self.birth_year.to_string()));
        }
        self.life_events.iter().try_for_each(LifeEvent::validate)
    }
}

/// Parse a birth year typed by the user: one to four ASCII digits.
pub fn parse_birth_year(input: &str) -> Result<i32, ProfileError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProfileError::InvalidBirthYear(input.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| ProfileError::InvalidBirthYear(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_event_validation() {
        assert!(LifeEvent::new(0, "born").is_ok());
        assert!(LifeEvent::new(100, "centenarian").is_ok());
        assert_eq!(
            LifeEvent::new(101, "too old"),
            Err(ProfileError::AgeOutOfRange(101))
        );
        assert_eq!(LifeEvent::new(10, "   "), Err(ProfileError::EmptyEvent));
    }

    #[test]
    fn test_events_stay_sorted_by_age() {
        let mut profile = UserProfile::default();
        profile.add_life_event(LifeEvent::new(18, "graduated").unwrap());
        profile.add_life_event(LifeEvent::new(7, "first console").unwrap());
        profile.add_life_event(LifeEvent::new(18, "moved out").unwrap());
        profile.add_life_event(LifeEvent::new(12, "arcade days").unwrap());

        let events: Vec<_> = profile.life_events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(
            events,
            vec!["first console", "arcade days", "graduated", "moved out"]
        );
    }

    #[test]
    fn test_remove_life_event() {
        let mut profile = UserProfile::default();
        profile.add_life_event(LifeEvent::new(10, "a").unwrap());
        assert_eq!(profile.remove_life_event(0).unwrap().event, "a");
        assert_eq!(profile.remove_life_event(0), Err(ProfileError::NoSuchEvent(0)));
    }

    #[test]
    fn test_age_group_boundaries() {
        let settings = StudentSettings::default();
        assert_eq!(settings.age_group(-3), AgeGroup::EarlyChildhood);
        assert_eq!(settings.age_group(6), AgeGroup::EarlyChildhood);
        assert_eq!(settings.age_group(7), AgeGroup::Elementary);
        assert_eq!(settings.age_group(12), AgeGroup::Elementary);
        assert_eq!(settings.age_group(13), AgeGroup::MiddleSchool);
        assert_eq!(settings.age_group(18), AgeGroup::HighSchool);
        assert_eq!(settings.age_group(22), AgeGroup::University);
        assert_eq!(settings.age_group(23), AgeGroup::Adult);
    }

    #[test]
    fn test_custom_settings_gap_is_adult() {
        let settings = StudentSettings {
            university: AgeRange::new(20, 23),
            ..StudentSettings::default()
        };
        assert_eq!(settings.age_group(19), AgeGroup::Adult);
        assert_eq!(settings.age_group(20), AgeGroup::University);
    }

    #[test]
    fn test_event_year_does_not_overflow() {
        let event = LifeEvent::new(10, "late start").unwrap();
        assert_eq!(event.year(1990), Some(2000));
        assert_eq!(event.year(i32::MAX), None);

        let huge = LifeEvent {
            age: u32::MAX,
            event: "forever".to_string(),
        };
        assert_eq!(huge.year(0), None);
    }

    #[test]
    fn test_validate_profile_from_json() {
        assert!(UserProfile::default().validate().is_ok());

        let year_too_big = UserProfile {
            birth_year: 2_147_483_600,
            ..UserProfile::default()
        };
        assert_eq!(
            year_too_big.validate(),
            Err(ProfileError::InvalidBirthYear("2147483600".to_string()))
        );

        let negative = UserProfile {
            birth_year: -1,
            ..UserProfile::default()
        };
        assert!(negative.validate().is_err());

        let old: UserProfile =
            serde_json::from_str(r#"{"lifeEvents":[{"age":500,"event":"x"}]}"#).unwrap();
        assert_eq!(old.validate(), Err(ProfileError::AgeOutOfRange(500)));

        let blank: UserProfile =
            serde_json::from_str(r#"{"lifeEvents":[{"age":5,"event":"  "}]}"#).unwrap();
        assert_eq!(blank.validate(), Err(ProfileError::EmptyEvent));
    }

    #[test]
    fn test_sort_life_events_is_stable() {
        let mut profile: UserProfile = serde_json::from_str(
            r#"{"lifeEvents":[{"age":20,"event":"b"},{"age":3,"event":"a"},{"age":20,"event":"c"}]}"#,
        )
        .unwrap();
        profile.sort_life_events();
        let events: Vec<_> = profile.life_events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(events, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_birth_year() {
        assert_eq!(parse_birth_year("1984"), Ok(1984));
        assert_eq!(parse_birth_year(" 7 "), Ok(7));
        assert!(parse_birth_year("").is_err());
        assert!(parse_birth_year("19845").is_err());
        assert!(parse_birth_year("-190").is_err());
        assert!(parse_birth_year("１９９０").is_err());
    }

    #[test]
    fn test_profile_deserializes_partial_documents() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"lifeEvents":[{"age":10,"event":"got a GB"}]}"#).unwrap();
        assert_eq!(profile.birth_year, DEFAULT_BIRTH_YEAR);
        assert_eq!(profile.life_events.len(), 1);
        assert_eq!(profile.student_settings, StudentSettings::default());

        let value = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(value["birthYear"], 1990);
        assert_eq!(value["studentSettings"]["elementary"]["startAge"], 7);
    }
}
