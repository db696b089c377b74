use validator::ValidationErrors;

/// Flattens `validator` field errors into the single message string carried by
/// 400 responses.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "name too short"))]
        name: String,
        #[validate(email(message = "invalid email"))]
        email: String,
    }

    #[test]
    fn joins_field_messages() {
        let sample = Sample {
            name: "ab".into(),
            email: "nope".into(),
        };
        let errors = sample.validate().unwrap_err();
        let message = format_validation_errors(&errors);
        assert!(message.contains("name too short"));
        assert!(message.contains("invalid email"));
    }

    #[test]
    fn valid_input_has_no_errors() {
        let sample = Sample {
            name: "abc".into(),
            email: "a@b.com".into(),
        };
        assert!(sample.validate().is_ok());
    }
}
