//! The validation pipeline.
//!
//! The pipeline is an ordered list of [`Stage`]s. Stages run one after the
//! other and the first one that reports any error ends the run; its errors
//! become the [`Rejection`]. Adding a rule type means adding a stage function
//! and an entry in [`STAGES`].

use formulator_core::{FieldError, FieldMap, ResponseCode, Settings};

use crate::validators;

/// The two views of one submission that stages read from.
///
/// `raw` is the decoded submission as received; `cleaned` is its normalized
/// form. Each stage reads the view it is defined over.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    /// The decoded submission, before normalization.
    pub raw: &'a FieldMap,
    /// The normalized submission.
    pub cleaned: &'a FieldMap,
}

/// A stage function.
pub type StageFn = fn(&StageInput<'_>, &Settings) -> Vec<FieldError>;

/// One entry of the pipeline.
#[derive(Clone, Copy)]
pub struct Stage {
    /// Name used in logs.
    pub name: &'static str,
    /// The check itself.
    pub run: StageFn,
    /// Response code reported when this stage fails.
    pub code: ResponseCode,
    /// Whether the stage's errors are returned to the client.
    pub disclose_errors: bool,
}

/// The pipeline, in execution order.
pub const STAGES: &[Stage] = &[
    Stage {
        name: "honeypot",
        run: validators::honeypot,
        code: ResponseCode::InvalidRequest,
        disclose_errors: false,
    },
    Stage {
        name: "required_fields",
        run: validators::required_fields,
        code: ResponseCode::MissingRequiredFields,
        disclose_errors: true,
    },
    Stage {
        name: "email_fields",
        run: validators::email_fields,
        code: ResponseCode::InvalidEmailFields,
        disclose_errors: true,
    },
];

/// A failed validation: the response code and, when disclosed, the errors of
/// the failing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The response code of the failing stage.
    pub code: ResponseCode,
    /// The failing stage's errors. `None` when the stage does not disclose them.
    pub errors: Option<Vec<FieldError>>,
}

/// Runs [`STAGES`] over a submission.
///
/// # Examples
///
/// ```
/// use formulator_core::{FieldMap, ResponseCode, Settings};
/// use formulator_forms::{normalize, validate, StageInput};
///
/// let settings = Settings {
///     required_fields: vec!["email".into()],
///     ..Settings::default()
/// };
/// let raw: FieldMap = [("email", "")].into_iter().collect();
/// let cleaned = normalize(&raw, &settings.form_fields);
///
/// let rejection = validate(&StageInput { raw: &raw, cleaned: &cleaned }, &settings).unwrap_err();
/// assert_eq!(rejection.code, ResponseCode::MissingRequiredFields);
/// ```
pub fn validate(input: &StageInput<'_>, settings: &Settings) -> Result<(), Rejection> {
    run_stages(STAGES, input, settings)
}

/// Runs the given stages in order, stopping at the first failure.
pub fn run_stages(
    stages: &[Stage],
    input: &StageInput<'_>,
    settings: &Settings,
) -> Result<(), Rejection> {
    for stage in stages {
        let errors = (stage.run)(input, settings);
        if errors.is_empty() {
            continue;
        }

        tracing::debug!(
            stage = stage.name,
            code = %stage.code,
            errors = errors.len(),
            "submission rejected"
        );
        return Err(Rejection {
            code: stage.code,
            errors: stage.disclose_errors.then_some(errors),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use formulator_core::ErrorKind;

    use super::*;
    use crate::normalize;

    fn map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs.iter().copied().collect()
    }

    fn contact_settings() -> Settings {
        Settings {
            honeypot_field: Some("no-spam-pls".into()),
            required_fields: vec!["email".into(), "message".into()],
            email_fields: vec!["email".into()],
            ..Settings::default()
        }
    }

    fn check(raw: &FieldMap, settings: &Settings) -> Result<(), Rejection> {
        let cleaned = normalize(raw, &settings.form_fields);
        validate(
            &StageInput {
                raw,
                cleaned: &cleaned,
            },
            settings,
        )
    }

    #[test]
    fn test_valid_submission_passes() {
        let raw = map(&[("email", "a@b.com"), ("message", "hi"), ("no-spam-pls", "")]);
        assert_eq!(check(&raw, &contact_settings()), Ok(()));
    }

    #[test]
    fn test_default_settings_accept_anything() {
        assert_eq!(check(&map(&[]), &Settings::default()), Ok(()));
        assert_eq!(check(&map(&[("x", "y")]), &Settings::default()), Ok(()));
    }

    #[test]
    fn test_honeypot_rejection_hides_errors() {
        let raw = map(&[("email", "a@b.com"), ("message", "hi"), ("no-spam-pls", "bot")]);
        let rejection = check(&raw, &contact_settings()).unwrap_err();
        assert_eq!(rejection.code, ResponseCode::InvalidRequest);
        assert!(rejection.errors.is_none());
    }

    #[test]
    fn test_honeypot_runs_before_required() {
        let raw = map(&[("no-spam-pls", "bot")]);
        let rejection = check(&raw, &contact_settings()).unwrap_err();
        assert_eq!(rejection.code, ResponseCode::InvalidRequest);
    }

    #[test]
    fn test_honeypot_survives_allow_list() {
        let settings = Settings {
            form_fields: vec!["email".into(), "message".into()],
            ..contact_settings()
        };
        let raw = map(&[("email", "a@b.com"), ("message", "hi"), ("no-spam-pls", "")]);
        assert_eq!(check(&raw, &settings), Ok(()));
    }

    #[test]
    fn test_required_rejection_lists_all_missing() {
        let raw = map(&[("no-spam-pls", "")]);
        let rejection = check(&raw, &contact_settings()).unwrap_err();
        assert_eq!(rejection.code, ResponseCode::MissingRequiredFields);

        let errors = rejection.errors.unwrap();
        assert_eq!(
            errors,
            vec![
                FieldError::missing_required("email"),
                FieldError::missing_required("message"),
            ]
        );
    }

    #[test]
    fn test_required_runs_before_email() {
        let raw = map(&[("email", "nope"), ("no-spam-pls", "")]);
        let rejection = check(&raw, &contact_settings()).unwrap_err();
        assert_eq!(rejection.code, ResponseCode::MissingRequiredFields);
        assert_eq!(rejection.errors.map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_email_rejection() {
        let raw = map(&[("email", "nope"), ("message", "hi"), ("no-spam-pls", "")]);
        let rejection = check(&raw, &contact_settings()).unwrap_err();
        assert_eq!(rejection.code, ResponseCode::InvalidEmailFields);

        let errors = rejection.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorKind::InvalidEmail);
        assert_eq!(errors[0].value.as_deref(), Some("nope"));
    }

    #[test]
    fn test_allow_list_filters_required_view() {
        let settings = Settings {
            form_fields: vec!["message".into()],
            required_fields: vec!["email".into()],
            ..Settings::default()
        };
        let raw = map(&[("email", "a@b.com"), ("message", "hi")]);
        let rejection = check(&raw, &settings).unwrap_err();
        assert_eq!(rejection.code, ResponseCode::MissingRequiredFields);
    }

    #[test]
    fn test_custom_stage_list() {
        fn always_fails(_: &StageInput<'_>, _: &Settings) -> Vec<FieldError> {
            vec![FieldError::missing_required("x")]
        }

        let stages = [Stage {
            name: "always_fails",
            run: always_fails,
            code: ResponseCode::MissingRequiredFields,
            disclose_errors: true,
        }];
        let raw = map(&[]);
        let input = StageInput {
            raw: &raw,
            cleaned: &raw,
        };

        let rejection = run_stages(&stages, &input, &Settings::default()).unwrap_err();
        assert_eq!(rejection.errors.map(|e| e.len()), Some(1));
        assert_eq!(run_stages(&[], &input, &Settings::default()), Ok(()));
    }

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = STAGES.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["honeypot", "required_fields", "email_fields"]);
    }
}
