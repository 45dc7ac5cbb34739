use super::*;

fn complete() -> Questionnaire {
    let mut q = Questionnaire::default();
    q.set(Field::Name, "Ada Lovelace".to_owned());
    q.set(Field::Age, "36".to_owned());
    q.set(Field::GlucoseLevel, "98.5".to_owned());
    q.set(Field::Bmi, "22.1".to_owned());
    q
}

#[test]
fn fields_follow_form_order() {
    assert_eq!(Field::ALL.first(), Some(&Field::Name));
    assert_eq!(Field::ALL.last(), Some(&Field::WorkType));
    assert_eq!(Field::GlucoseLevel.label(), "Average Glucose Level");
}

#[test]
fn only_free_entry_fields_are_required() {
    assert!(Field::Name.required());
    assert!(Field::Bmi.required());
    assert!(!Field::Gender.required());
    assert!(!Field::WorkType.required());
}

#[test]
fn select_fields_offer_fixed_choices() {
    let FieldKind::Select { choices, .. } = Field::WorkType.kind() else {
        panic!("work type is a select");
    };
    let values: Vec<_> = choices.iter().map(|c| c.value).collect();
    assert_eq!(values, ["private", "self-employed", "government", "student", "retired"]);
}

#[test]
fn set_ignores_unknown_select_values() {
    let mut q = Questionnaire::default();
    q.set(Field::SmokingStatus, "former".to_owned());
    q.set(Field::SmokingStatus, "sometimes".to_owned());
    assert_eq!(q.get(Field::SmokingStatus), "former");
}

#[test]
fn set_keeps_text_exactly_as_typed() {
    let mut q = Questionnaire::default();
    q.set(Field::Name, "  Ada ".to_owned());
    assert_eq!(q.name, "  Ada ");
}

#[test]
fn validate_accepts_complete_answers() {
    assert_eq!(complete().validate(), Ok(()));
}

#[test]
fn validate_reports_first_blank_required_field() {
    let mut q = complete();
    q.set(Field::Age, "  ".to_owned());
    let notice = q.validate().unwrap_err();
    assert_eq!(notice.description, "Please fill in Age.");
}

#[test]
fn validate_rejects_non_numeric_numbers() {
    let mut q = complete();
    q.set(Field::Bmi, "tall".to_owned());
    let notice = q.validate().unwrap_err();
    assert_eq!(notice.description, "BMI must be a number.");
}

#[test]
fn validate_rejects_non_finite_numbers() {
    for raw in ["NaN", "inf", "-infinity", "1e999"] {
        let mut q = complete();
        q.set(Field::GlucoseLevel, raw.to_owned());
        let notice = q.validate().unwrap_err();
        assert_eq!(notice.description, "Average Glucose Level must be a number.", "input {raw}");
    }
}
