//! Validation helpers shared by the config sections

pub use crate::error::ValidationError;

/// A `[section]` of the config file that can check and merge itself
pub trait ConfigSection: Default {
    /// Every problem found, or `Ok` when the section is usable
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Takes every value from `other`
    fn merge(&mut self, other: Self);

    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within a range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Requires an `http://` or `https://` URL
    pub fn http_url(value: &str, field: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"));
        match rest {
            Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
            _ => Err(ValidationError::with_value(
                field,
                "must be an http(s) URL",
                value,
            )),
        }
    }

    /// Requires `shorter` to be strictly less than `longer`
    pub fn shorter_than<T>(shorter: T, longer: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if shorter < longer {
            Ok(())
        } else {
            Err(ValidationError::with_value(
                field,
                format!("must be shorter than {}", longer),
                shorter,
            ))
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a value is one of the allowed options
    pub fn one_of<T>(value: &T, allowed: &[T], field: &str) -> Result<(), ValidationError>
    where
        T: PartialEq + std::fmt::Display,
    {
        if !allowed.contains(value) {
            let allowed_str = allowed
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(ValidationError::with_value(
                field,
                format!("must be one of: {}", allowed_str),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
