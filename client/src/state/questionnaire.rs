//! Health-assessment questionnaire held by the prediction form.
//!
//! Answers are kept exactly as typed or selected. Nothing here scores them.

#[cfg(test)]
#[path = "questionnaire_test.rs"]
mod questionnaire_test;

use serde::Serialize;

use crate::state::toast::Notice;

/// One selectable answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

const GENDER: &[Choice] = &[choice("male", "Male"), choice("female", "Female"), choice("other", "Other")];
const MARITAL_STATUS: &[Choice] =
    &[choice("single", "Single"), choice("married", "Married"), choice("divorced", "Divorced")];
const YES_NO: &[Choice] = &[choice("yes", "Yes"), choice("no", "No")];
const RESIDENCE: &[Choice] = &[choice("urban", "Urban"), choice("rural", "Rural")];
const SMOKING: &[Choice] = &[
    choice("never", "Never Smoked"),
    choice("former", "Former Smoker"),
    choice("current", "Current Smoker"),
];
const WORK: &[Choice] = &[
    choice("private", "Private"),
    choice("self-employed", "Self-employed"),
    choice("government", "Government"),
    choice("student", "Student"),
    choice("retired", "Retired"),
];

/// How a field is entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Select { placeholder: &'static str, choices: &'static [Choice] },
}

/// Questionnaire fields, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
    Gender,
    MaritalStatus,
    HeartDisease,
    Hypertension,
    GlucoseLevel,
    Bmi,
    ResidenceType,
    SmokingStatus,
    WorkType,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Name,
        Field::Age,
        Field::Gender,
        Field::MaritalStatus,
        Field::HeartDisease,
        Field::Hypertension,
        Field::GlucoseLevel,
        Field::Bmi,
        Field::ResidenceType,
        Field::SmokingStatus,
        Field::WorkType,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::MaritalStatus => "Marital Status",
            Self::HeartDisease => "Heart Disease",
            Self::Hypertension => "Hypertension",
            Self::GlucoseLevel => "Average Glucose Level",
            Self::Bmi => "BMI",
            Self::ResidenceType => "Residence Type",
            Self::SmokingStatus => "Smoking Status",
            Self::WorkType => "Work Type",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Name => FieldKind::Text,
            Self::Age | Self::GlucoseLevel | Self::Bmi => FieldKind::Number,
            Self::Gender => FieldKind::Select { placeholder: "Select gender", choices: GENDER },
            Self::MaritalStatus => FieldKind::Select { placeholder: "Select status", choices: MARITAL_STATUS },
            Self::HeartDisease | Self::Hypertension => {
                FieldKind::Select { placeholder: "Select option", choices: YES_NO }
            }
            Self::ResidenceType => FieldKind::Select { placeholder: "Select type", choices: RESIDENCE },
            Self::SmokingStatus => FieldKind::Select { placeholder: "Select status", choices: SMOKING },
            Self::WorkType => FieldKind::Select { placeholder: "Select type", choices: WORK },
        }
    }

    /// Free-entry fields must be filled; selects are optional.
    #[must_use]
    pub fn required(self) -> bool {
        !matches!(self.kind(), FieldKind::Select { .. })
    }
}

/// Collected answers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Questionnaire {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub marital_status: String,
    pub heart_disease: String,
    pub hypertension: String,
    pub glucose_level: String,
    pub bmi: String,
    pub residence_type: String,
    pub smoking_status: String,
    pub work_type: String,
}

impl Questionnaire {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::MaritalStatus => &self.marital_status,
            Field::HeartDisease => &self.heart_disease,
            Field::Hypertension => &self.hypertension,
            Field::GlucoseLevel => &self.glucose_level,
            Field::Bmi => &self.bmi,
            Field::ResidenceType => &self.residence_type,
            Field::SmokingStatus => &self.smoking_status,
            Field::WorkType => &self.work_type,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::MaritalStatus => &mut self.marital_status,
            Field::HeartDisease => &mut self.heart_disease,
            Field::Hypertension => &mut self.hypertension,
            Field::GlucoseLevel => &mut self.glucose_level,
            Field::Bmi => &mut self.bmi,
            Field::ResidenceType => &mut self.residence_type,
            Field::SmokingStatus => &mut self.smoking_status,
            Field::WorkType => &mut self.work_type,
        }
    }

    /// Store an answer. Select fields ignore values outside their choices.
    pub fn set(&mut self, field: Field, value: String) {
        if let FieldKind::Select { choices, .. } = field.kind() {
            if !value.is_empty() && !choices.iter().any(|c| c.value == value) {
                return;
            }
        }
        *self.slot(field) = value;
    }

    /// Check the answers are complete enough to submit.
    ///
    /// # Errors
    ///
    /// Returns an error notice naming the first blank required field, or the
    /// first numeric field that does not parse.
    pub fn validate(&self) -> Result<(), Notice> {
        for field in Field::ALL {
            let value = self.get(field).trim();
            if field.required() && value.is_empty() {
                return Err(Notice::error("Missing answer", format!("Please fill in {}.", field.label())));
            }
            if field.kind() == FieldKind::Number && !value.parse::<f64>().is_ok_and(f64::is_finite) {
                return Err(Notice::error("Invalid answer", format!("{} must be a number.", field.label())));
            }
        }
        Ok(())
    }
}
