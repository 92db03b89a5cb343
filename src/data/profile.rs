//! Homeowner profile: who is filing, where, and what they can spend.
//! Budget is kept as the raw string the user typed; [crate::engine::budget] parses it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub consent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<&'static str>),
    #[error("Please agree to the terms and conditions to continue")]
    ConsentRequired,
}

impl ProfileError {
    /// Field names the error applies to, for per-field validation responses.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::MissingFields(fields) => fields.clone(),
            Self::ConsentRequired => vec!["consent"],
        }
    }
}

/// Required fields are checked before consent, matching the order the form reports them.
pub fn validate_profile(profile: &Profile) -> Result<(), ProfileError> {
    let missing: Vec<&'static str> = [
        ("name", profile.name.as_str()),
        ("address", profile.address.as_str()),
        ("budget", profile.budget.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(ProfileError::MissingFields(missing));
    }
    if !profile.consent {
        return Err(ProfileError::ConsentRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Profile {
        Profile {
            name: "Dana Rivera".to_string(),
            address: "12 Harbor Rd".to_string(),
            budget: "$10,000".to_string(),
            consent: true,
        }
    }

    #[test]
    fn complete_profile_is_valid() {
        assert_eq!(validate_profile(&complete()), Ok(()));
    }

    #[test]
    fn blank_fields_are_reported_together() {
        let profile = Profile {
            name: "   ".to_string(),
            budget: String::new(),
            ..complete()
        };
        let err = validate_profile(&profile).unwrap_err();
        assert_eq!(err, ProfileError::MissingFields(vec!["name", "budget"]));
        assert_eq!(err.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn missing_fields_take_precedence_over_consent() {
        let profile = Profile {
            address: String::new(),
            consent: false,
            ..complete()
        };
        assert_eq!(
            validate_profile(&profile),
            Err(ProfileError::MissingFields(vec!["address"]))
        );

        let no_consent = Profile {
            consent: false,
            ..complete()
        };
        assert_eq!(validate_profile(&no_consent), Err(ProfileError::ConsentRequired));
    }
}
