//! Profile fields collected at the start of a screening, in the order they are asked.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Phone,
    ExperienceYears,
    DesiredPositions,
    Location,
}

impl Field {
    /// Declared order. The collector always targets the first unset entry.
    pub const ALL: [Field; 6] = [
        Field::FullName,
        Field::Email,
        Field::Phone,
        Field::ExperienceYears,
        Field::DesiredPositions,
        Field::Location,
    ];

    pub fn question(self) -> &'static str {
        match self {
            Field::FullName => "What is your full name?",
            Field::Email => "Please share your email address.",
            Field::Phone => "Please share your phone number.",
            Field::ExperienceYears => "How many years of professional experience do you have?",
            Field::DesiredPositions => "Which position(s) are you interested in?",
            Field::Location => "What is your current location (city, country)?",
        }
    }

    /// Returns the re-prompt to show when `value` is not acceptable for this field.
    pub fn validate(self, value: &str) -> Result<(), &'static str> {
        match self {
            Field::Email if !is_email(value) => Err(
                "That does not look like a valid email. Please provide a valid email address.",
            ),
            Field::Phone if !is_phone(value) => Err(
                "That does not look like a valid phone number. Please provide a valid phone number.",
            ),
            _ => Ok(()),
        }
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\-+()\s]{7,}$").expect("valid phone regex"))
}

pub fn is_email(value: &str) -> bool {
    email_re().is_match(value)
}

/// At least 7 characters, only digits, `+`, `-`, parentheses and whitespace.
pub fn is_phone(value: &str) -> bool {
    phone_re().is_match(value)
}

/// Candidate profile. Serialises flat, one key per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_years: Option<String>,
    pub desired_positions: Option<String>,
    pub location: Option<String>,
}

impl ProfileInfo {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// First field in declared order that is still unset.
    pub fn pending(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| self.get(*f).map_or(true, str::is_empty))
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::ExperienceYears => &self.experience_years,
            Field::DesiredPositions => &self.desired_positions,
            Field::Location => &self.location,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::ExperienceYears => &mut self.experience_years,
            Field::DesiredPositions => &mut self.desired_positions,
            Field::Location => &mut self.location,
        }
    }
}

/// Result of feeding one turn to the field collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Nothing was pending when the turn arrived.
    AlreadyComplete,
    /// The turn filled the last pending field.
    Completed,
    /// Ask this field next (also used to re-ask after an empty answer).
    Ask(Field),
    /// Validation failed; the field stays unset.
    Rejected(&'static str),
}

/// Binds `input` to the first unset field. Set fields are never overwritten.
pub fn collect_field(info: &mut ProfileInfo, input: &str) -> FieldOutcome {
    let Some(field) = info.pending() else {
        return FieldOutcome::AlreadyComplete;
    };

    let value = input.trim();
    if value.is_empty() {
        return FieldOutcome::Ask(field);
    }
    if let Err(reprompt) = field.validate(value) {
        return FieldOutcome::Rejected(reprompt);
    }

    *info.slot_mut(field) = Some(value.to_string());

    match info.pending() {
        Some(next) => FieldOutcome::Ask(next),
        None => FieldOutcome::Completed,
    }
}
