//! Field validation for the create/edit flows
//!
//! Pure checks the view layer runs before handing a mutation to the task
//! store; the store itself never validates. Each registered field is
//! checked in order: required-and-nonempty, max length, then the allowed
//! character set. The first violation wins.

/// Validation rule for one field.
pub struct FieldRule {
    pub required: bool,
    pub max_length: usize,
    allowed: fn(char) -> bool,
    pub message: &'static str,
}

fn letters(c: char) -> bool {
    c.is_alphabetic()
}

fn letters_and_spaces(c: char) -> bool {
    c.is_alphabetic() || c.is_whitespace()
}

const TITLE: FieldRule = FieldRule {
    required: true,
    max_length: 50,
    allowed: letters,
    message: "Only letters are allowed.",
};

const DESCRIPTION: FieldRule = FieldRule {
    required: false,
    max_length: 100,
    allowed: letters_and_spaces,
    message: "Only letters and spaces are allowed.",
};

const LOCATION: FieldRule = FieldRule {
    required: false,
    max_length: 30,
    allowed: letters_and_spaces,
    message: "Only letters and spaces are allowed.",
};

/// The rule registered for a field, if any. Unregistered fields pass
/// through [`validate`] unchecked.
pub fn rule_for(field: &str) -> Option<&'static FieldRule> {
    match field {
        "title" => Some(&TITLE),
        "description" => Some(&DESCRIPTION),
        "location" => Some(&LOCATION),
        _ => None,
    }
}

/// Check `(field, value)` pairs in order and return the first violation's
/// message, or `None` when everything passes.
///
/// The character-set check requires at least one character, so an empty
/// value on an optional field fails it.
pub fn validate(fields: &[(&str, &str)]) -> Option<String> {
    for (name, value) in fields {
        let Some(rule) = rule_for(name) else {
            continue;
        };

        if rule.required && value.trim().is_empty() {
            return Some(format!("The \"{}\" field is required.", name));
        }
        if value.chars().count() > rule.max_length {
            return Some(format!(
                "The \"{}\" field must not exceed {} characters.",
                name, rule.max_length
            ));
        }
        if value.is_empty() || !value.chars().all(rule.allowed) {
            return Some(rule.message.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_title_passes() {
        assert_eq!(validate(&[("title", "Groceries")]), None);
    }

    #[test]
    fn test_empty_required_title_is_rejected() {
        let message = validate(&[("title", "")]).expect("empty title should fail");
        assert!(message.contains("title"));
        assert!(message.contains("required"));
    }

    #[test]
    fn test_whitespace_only_title_counts_as_empty() {
        let message = validate(&[("title", "   ")]).expect("blank title should fail");
        assert!(message.contains("required"));
    }

    #[test]
    fn test_title_with_digits_fails_pattern() {
        assert_eq!(
            validate(&[("title", "abc123")]).as_deref(),
            Some("Only letters are allowed.")
        );
    }

    #[test]
    fn test_title_with_spaces_fails_pattern() {
        // Title allows letters only; the looser rule belongs to description.
        assert_eq!(
            validate(&[("title", "Two words")]).as_deref(),
            Some("Only letters are allowed.")
        );
    }

    #[test]
    fn test_overlong_title_fails_max_length() {
        let long = "a".repeat(51);
        let message = validate(&[("title", &long)]).expect("overlong title should fail");
        assert!(message.contains("50"));
    }

    #[test]
    fn test_description_allows_letters_and_spaces() {
        assert_eq!(validate(&[("description", "Buy some milk")]), None);
    }

    #[test]
    fn test_empty_optional_field_fails_pattern() {
        // Carried over from the original rule table: the pattern wants at
        // least one character even on optional fields.
        assert_eq!(
            validate(&[("description", "")]).as_deref(),
            Some("Only letters and spaces are allowed.")
        );
    }

    #[test]
    fn test_location_max_length_is_thirty() {
        let long = "a".repeat(31);
        let message = validate(&[("location", &long)]).expect("overlong location should fail");
        assert!(message.contains("30"));
    }

    #[test]
    fn test_unregistered_fields_pass_through() {
        assert_eq!(validate(&[("date", "2024-01-01"), ("id", "whatever")]), None);
    }

    #[test]
    fn test_first_violation_wins() {
        let result = validate(&[("title", ""), ("description", "123")]);
        assert!(result.unwrap().contains("title"));
    }

    #[test]
    fn test_all_fields_valid_returns_none() {
        assert_eq!(
            validate(&[
                ("title", "Dentist"),
                ("description", "Routine checkup"),
                ("location", "Downtown"),
            ]),
            None
        );
    }

    #[test]
    fn test_non_ascii_letters_are_accepted() {
        assert_eq!(validate(&[("title", "Зарядка")]), None);
    }
}
