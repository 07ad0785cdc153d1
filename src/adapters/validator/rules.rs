use crate::domain::model::{Envelope, ValidationRules};
use crate::domain::ports::Validator;
use crate::utils::error::{CapError, Result};
use regex::Regex;

/// Validator driven by declarative [`ValidationRules`]: required fields,
/// per-field regex patterns and an optional string-length cap. Patterns are
/// compiled once at construction.
#[derive(Debug)]
pub struct RuleValidator {
    required_fields: Vec<String>,
    patterns: Vec<(String, Regex)>,
    max_field_length: Option<usize>,
}

impl RuleValidator {
    pub fn from_rules(rules: &ValidationRules) -> Result<Self> {
        let mut patterns = Vec::with_capacity(rules.patterns.len());
        for (field, pattern) in &rules.patterns {
            let regex = Regex::new(pattern).map_err(|source| CapError::Pattern {
                field: field.clone(),
                source,
            })?;
            patterns.push((field.clone(), regex));
        }
        patterns.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            required_fields: rules.required_fields.clone(),
            patterns,
            max_field_length: rules.max_field_length,
        })
    }

    fn reject(envelope: &Envelope, reason: String) -> CapError {
        CapError::Validation {
            id: envelope.id.clone(),
            reason,
        }
    }
}

impl Validator for RuleValidator {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn validate(&self, envelope: &Envelope) -> Result<()> {
        for field in &self.required_fields {
            match envelope.data.get(field) {
                None | Some(serde_json::Value::Null) => {
                    return Err(Self::reject(
                        envelope,
                        format!("missing required field `{}`", field),
                    ));
                }
                _ => {}
            }
        }

        for (field, regex) in &self.patterns {
            if let Some(value) = envelope.field_str(field) {
                if !regex.is_match(value) {
                    return Err(Self::reject(
                        envelope,
                        format!("field `{}` does not match pattern `{}`", field, regex),
                    ));
                }
            }
        }

        if let Some(max) = self.max_field_length {
            for (field, value) in &envelope.data {
                if let Some(s) = value.as_str() {
                    if s.len() > max {
                        return Err(Self::reject(
                            envelope,
                            format!("field `{}` exceeds {} bytes", field, max),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Validator that accepts every envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn name(&self) -> &'static str {
        "accept"
    }

    fn validate(&self, _envelope: &Envelope) -> Result<()> {
        Ok(())
    }
}
