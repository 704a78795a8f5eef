//! Step validation rules
//!
//! Pure functions, one per wizard step. Each step runs its validator before
//! forward navigation; a failure blocks the transition and carries the
//! message shown to the user.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::form::{DeveloperProfile, Role};

/// Special characters accepted by the password strength rule
pub const PASSWORD_SPECIAL_CHARS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// A validation failure on the current step
///
/// All variants are recoverable: the wizard stays on its step and re-checks
/// on the next navigation attempt.
#[derive(Debug, Error, Diagnostic)]
pub enum ValidationError {
    #[error("Please select a {field} before continuing")]
    #[diagnostic(code(tbsignup::validate::missing_selection))]
    MissingSelection { field: &'static str },

    #[error("Please fill in all fields")]
    #[diagnostic(code(tbsignup::validate::missing_fields))]
    MissingFields,

    #[error("The password is not strong enough")]
    #[diagnostic(
        code(tbsignup::validate::weak_password),
        help("use at least 8 characters with an uppercase letter, a lowercase letter, and a special character")
    )]
    WeakPassword,

    #[error("Please select at least one technology")]
    #[diagnostic(code(tbsignup::validate::empty_selection))]
    EmptySelection,
}

/// Password strength rule: length >= 8, one uppercase, one lowercase, and
/// one character from [`PASSWORD_SPECIAL_CHARS`].
pub fn is_strong_password(password: &str) -> bool {
    let min_length = password.chars().count() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    min_length && has_upper && has_lower && has_special
}

/// Step 1: a role must be selected
pub fn validate_role(role: Option<Role>) -> Result<(), ValidationError> {
    if role.is_none() {
        return Err(ValidationError::MissingSelection { field: "role" });
    }
    Ok(())
}

/// Step 2: all identity fields present and password strong enough
pub fn validate_credentials(
    nom: &str,
    prenom: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if nom.is_empty() || prenom.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_strong_password(password) {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

/// Step 3: a developer profile must be selected
pub fn validate_profile(profile: Option<DeveloperProfile>) -> Result<(), ValidationError> {
    if profile.is_none() {
        return Err(ValidationError::MissingSelection { field: "profile" });
    }
    Ok(())
}

/// Step 4: at least one technology must be selected
pub fn validate_skills(technologies: &[String]) -> Result<(), ValidationError> {
    if technologies.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_accepted() {
        // 8 chars, upper, lower, special
        assert!(is_strong_password("Abc123!@"));
        assert!(is_strong_password("S0mething?longer"));
    }

    #[test]
    fn test_password_missing_requirements_rejected() {
        assert!(!is_strong_password("abcdefgh")); // no upper, no special
        assert!(!is_strong_password("ABCDEFG!")); // no lower
        assert!(!is_strong_password("Abcdefgh")); // no special
        assert!(!is_strong_password("Abc12!@")); // too short
        assert!(!is_strong_password("")); // empty
    }

    #[test]
    fn test_every_special_char_counts() {
        for c in PASSWORD_SPECIAL_CHARS.chars() {
            let password = format!("Abcdefg{}", c);
            assert!(is_strong_password(&password), "rejected special: {}", c);
        }
    }

    #[test]
    fn test_validate_role() {
        assert!(matches!(
            validate_role(None),
            Err(ValidationError::MissingSelection { field: "role" })
        ));
        assert!(validate_role(Some(Role::Student)).is_ok());
        assert!(validate_role(Some(Role::Businessman)).is_ok());
    }

    #[test]
    fn test_validate_credentials_requires_every_field() {
        assert!(matches!(
            validate_credentials("", "Jean", "j@d.fr", "Abc123!@"),
            Err(ValidationError::MissingFields)
        ));
        assert!(matches!(
            validate_credentials("Dupont", "Jean", "j@d.fr", ""),
            Err(ValidationError::MissingFields)
        ));
    }

    #[test]
    fn test_validate_credentials_scenarios() {
        // Accepted: 8 chars, upper, lower, special
        assert!(validate_credentials("Dupont", "Jean", "j@d.fr", "Abc123!@").is_ok());
        // Rejected as weak, not missing
        assert!(matches!(
            validate_credentials("Dupont", "Jean", "j@d.fr", "abcdefgh"),
            Err(ValidationError::WeakPassword)
        ));
    }

    #[test]
    fn test_validate_profile() {
        assert!(matches!(
            validate_profile(None),
            Err(ValidationError::MissingSelection { field: "profile" })
        ));
        assert!(validate_profile(Some(DeveloperProfile::FrontEnd)).is_ok());
    }

    #[test]
    fn test_validate_skills() {
        assert!(matches!(
            validate_skills(&[]),
            Err(ValidationError::EmptySelection)
        ));
        assert!(validate_skills(&["React".to_string()]).is_ok());
    }
}
