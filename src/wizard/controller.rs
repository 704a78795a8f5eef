//! Step sequencing for the signup wizard
//!
//! The controller owns the form record and the current step, and is the only
//! place navigation rules live: validation gates forward movement, back
//! navigation is unconditional down to the entry step, and the two-step
//! entrepreneur path and the partner-school entry shortcut are both decided
//! here rather than in the rendering code.

use miette::Diagnostic;
use thiserror::Error;

use crate::api::gateway::{SessionToken, SubmissionGateway};
use crate::core::form::{FieldUpdate, FormState, Role};
use crate::core::referral::SchoolReferral;
use crate::core::session::SessionStore;
use crate::core::validate::{
    validate_credentials, validate_profile, validate_role, validate_skills, ValidationError,
};

/// One screen of the wizard, in visit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    RoleSelect = 1,
    Credentials = 2,
    ProfileSelect = 3,
    SkillsSelect = 4,
}

impl WizardStep {
    /// 1-based position, used in step headers
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::RoleSelect => Some(WizardStep::Credentials),
            WizardStep::Credentials => Some(WizardStep::ProfileSelect),
            WizardStep::ProfileSelect => Some(WizardStep::SkillsSelect),
            WizardStep::SkillsSelect => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::RoleSelect => None,
            WizardStep::Credentials => Some(WizardStep::RoleSelect),
            WizardStep::ProfileSelect => Some(WizardStep::Credentials),
            WizardStep::SkillsSelect => Some(WizardStep::ProfileSelect),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum WizardError {
    #[error("already at the last step")]
    #[diagnostic(code(tbsignup::wizard::at_last_step))]
    AtLastStep,

    #[error("cannot go back from the first step")]
    #[diagnostic(code(tbsignup::wizard::at_first_step))]
    AtFirstStep,
}

/// Outcome of a validated forward move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Advanced to the next step
    Moved(WizardStep),
    /// The current step completes the form; submission is next
    ReadyToSubmit,
}

/// Holds the form record and the current step, and arbitrates navigation
#[derive(Debug)]
pub struct WizardController {
    step: WizardStep,
    form: FormState,
    referral: Option<SchoolReferral>,
    /// Lowest step reachable via back navigation. Credentials when the
    /// wizard was entered through a school referral, RoleSelect otherwise.
    entry_step: WizardStep,
}

impl WizardController {
    /// Build a controller, applying the school-referral entry rule: a
    /// referral marked `is_from_school` forces the student role and starts
    /// the wizard at Credentials, so RoleSelect is never visited.
    pub fn new(referral: Option<SchoolReferral>) -> Self {
        let from_school = referral.as_ref().is_some_and(|r| r.is_from_school);

        let mut form = FormState::default();
        let entry_step = if from_school {
            form.role = Some(Role::Student);
            WizardStep::Credentials
        } else {
            WizardStep::RoleSelect
        };

        Self {
            step: entry_step,
            form,
            referral,
            entry_step,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn referral(&self) -> Option<&SchoolReferral> {
        self.referral.as_ref()
    }

    /// Whether the signup goes through the partner-school endpoint
    pub fn is_partner_signup(&self) -> bool {
        self.referral.as_ref().is_some_and(|r| r.is_from_school)
    }

    /// Merge a field edit into the form. No validation happens here;
    /// validation runs on navigation.
    pub fn set_field(&mut self, update: FieldUpdate) {
        self.form.apply(update);
    }

    /// Move to the next step without validating
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(next)
            }
            None => Err(WizardError::AtLastStep),
        }
    }

    pub fn can_retreat(&self) -> bool {
        self.step > self.entry_step
    }

    /// Move to the previous step. Unconditional, except that a wizard
    /// entered via referral bottoms out at Credentials.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        if !self.can_retreat() {
            return Err(WizardError::AtFirstStep);
        }
        match self.step.previous() {
            Some(prev) => {
                self.step = prev;
                Ok(prev)
            }
            None => Err(WizardError::AtFirstStep),
        }
    }

    /// Run the current step's validator against the form
    pub fn validate_current(&self) -> Result<(), ValidationError> {
        match self.step {
            WizardStep::RoleSelect => validate_role(self.form.role),
            WizardStep::Credentials => validate_credentials(
                &self.form.nom,
                &self.form.prenom,
                &self.form.email,
                &self.form.password,
            ),
            WizardStep::ProfileSelect => validate_profile(self.form.type_developpeur),
            WizardStep::SkillsSelect => validate_skills(&self.form.technologies),
        }
    }

    /// Validate the current step, then either advance or report that the
    /// form is complete. Entrepreneurs finish after Credentials; students
    /// continue through ProfileSelect and SkillsSelect.
    pub fn forward(&mut self) -> Result<Progress, ValidationError> {
        self.validate_current()?;

        if self.step == WizardStep::Credentials && self.form.role == Some(Role::Businessman) {
            return Ok(Progress::ReadyToSubmit);
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Progress::Moved(next))
            }
            None => Ok(Progress::ReadyToSubmit),
        }
    }

    /// Submit the form through the gateway. On success the session token is
    /// persisted and any pending referral is cleared; on failure nothing
    /// changes and the wizard stays on its current step.
    pub fn submit(
        &self,
        gateway: &SubmissionGateway,
        store: &SessionStore,
    ) -> miette::Result<SessionToken> {
        let token = gateway.submit(&self.form, self.referral.as_ref())?;
        store.store_access_token(token.as_str())?;
        if self.referral.is_some() {
            store.clear_referral()?;
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::DeveloperProfile;
    use crate::core::referral::SchoolInfo;

    fn referral() -> SchoolReferral {
        SchoolReferral::new(
            "TOKEN42",
            SchoolInfo {
                name: "42 Lyon".to_string(),
                description: None,
            },
        )
    }

    fn fill_credentials(ctl: &mut WizardController) {
        ctl.set_field(FieldUpdate::Nom("Dupont".to_string()));
        ctl.set_field(FieldUpdate::Prenom("Jean".to_string()));
        ctl.set_field(FieldUpdate::Email("j@d.fr".to_string()));
        ctl.set_field(FieldUpdate::Password("Abc123!@".to_string()));
    }

    #[test]
    fn test_starts_at_role_select() {
        let ctl = WizardController::new(None);
        assert_eq!(ctl.step(), WizardStep::RoleSelect);
        assert!(ctl.form().role.is_none());
        assert!(!ctl.can_retreat());
    }

    #[test]
    fn test_forward_blocked_without_role() {
        let mut ctl = WizardController::new(None);
        assert!(matches!(
            ctl.forward(),
            Err(ValidationError::MissingSelection { field: "role" })
        ));
        // Blocked navigation leaves the step unchanged
        assert_eq!(ctl.step(), WizardStep::RoleSelect);
    }

    #[test]
    fn test_student_walks_all_four_steps() {
        let mut ctl = WizardController::new(None);
        ctl.set_field(FieldUpdate::Role(Role::Student));
        assert_eq!(ctl.forward().unwrap(), Progress::Moved(WizardStep::Credentials));

        fill_credentials(&mut ctl);
        assert_eq!(
            ctl.forward().unwrap(),
            Progress::Moved(WizardStep::ProfileSelect)
        );

        ctl.set_field(FieldUpdate::Profile(DeveloperProfile::FrontEnd));
        assert_eq!(
            ctl.forward().unwrap(),
            Progress::Moved(WizardStep::SkillsSelect)
        );

        ctl.set_field(FieldUpdate::Technologies(vec!["React".to_string()]));
        assert_eq!(ctl.forward().unwrap(), Progress::ReadyToSubmit);
    }

    #[test]
    fn test_businessman_finishes_after_credentials() {
        let mut ctl = WizardController::new(None);
        ctl.set_field(FieldUpdate::Role(Role::Businessman));
        ctl.forward().unwrap();

        fill_credentials(&mut ctl);
        assert_eq!(ctl.forward().unwrap(), Progress::ReadyToSubmit);
        // Profile and skills were never collected
        assert!(ctl.form().type_developpeur.is_none());
        assert!(ctl.form().technologies.is_empty());
    }

    #[test]
    fn test_weak_password_blocks_credentials() {
        let mut ctl = WizardController::new(None);
        ctl.set_field(FieldUpdate::Role(Role::Student));
        ctl.forward().unwrap();

        ctl.set_field(FieldUpdate::Nom("Dupont".to_string()));
        ctl.set_field(FieldUpdate::Prenom("Jean".to_string()));
        ctl.set_field(FieldUpdate::Email("j@d.fr".to_string()));
        ctl.set_field(FieldUpdate::Password("abcdefgh".to_string()));
        assert!(matches!(ctl.forward(), Err(ValidationError::WeakPassword)));
        assert_eq!(ctl.step(), WizardStep::Credentials);
    }

    #[test]
    fn test_empty_skills_block_submission() {
        let mut ctl = WizardController::new(None);
        ctl.set_field(FieldUpdate::Role(Role::Student));
        ctl.forward().unwrap();
        fill_credentials(&mut ctl);
        ctl.forward().unwrap();
        ctl.set_field(FieldUpdate::Profile(DeveloperProfile::BackEnd));
        ctl.forward().unwrap();

        assert!(matches!(ctl.forward(), Err(ValidationError::EmptySelection)));
        assert_eq!(ctl.step(), WizardStep::SkillsSelect);
    }

    #[test]
    fn test_retreat_skips_validation() {
        let mut ctl = WizardController::new(None);
        ctl.set_field(FieldUpdate::Role(Role::Student));
        ctl.forward().unwrap();

        // Credentials are empty but back still works
        assert_eq!(ctl.retreat().unwrap(), WizardStep::RoleSelect);
        assert!(matches!(ctl.retreat(), Err(WizardError::AtFirstStep)));
    }

    #[test]
    fn test_advance_stops_at_last_step() {
        let mut ctl = WizardController::new(None);
        ctl.advance().unwrap();
        ctl.advance().unwrap();
        ctl.advance().unwrap();
        assert_eq!(ctl.step(), WizardStep::SkillsSelect);
        assert!(matches!(ctl.advance(), Err(WizardError::AtLastStep)));
    }

    #[test]
    fn test_referral_enters_at_credentials_as_student() {
        let ctl = WizardController::new(Some(referral()));
        assert_eq!(ctl.step(), WizardStep::Credentials);
        assert_eq!(ctl.form().role, Some(Role::Student));
        assert!(ctl.is_partner_signup());
    }

    #[test]
    fn test_referral_back_navigation_bottoms_out_at_credentials() {
        let mut ctl = WizardController::new(Some(referral()));
        assert!(!ctl.can_retreat());
        assert!(matches!(ctl.retreat(), Err(WizardError::AtFirstStep)));

        fill_credentials(&mut ctl);
        ctl.forward().unwrap();
        assert_eq!(ctl.retreat().unwrap(), WizardStep::Credentials);
        // RoleSelect stays unreachable
        assert!(matches!(ctl.retreat(), Err(WizardError::AtFirstStep)));
    }

    #[test]
    fn test_referral_not_from_school_behaves_like_direct_signup() {
        let mut r = referral();
        r.is_from_school = false;
        let ctl = WizardController::new(Some(r));
        assert_eq!(ctl.step(), WizardStep::RoleSelect);
        assert!(ctl.form().role.is_none());
        assert!(!ctl.is_partner_signup());
    }

    #[test]
    fn test_set_field_never_validates() {
        let mut ctl = WizardController::new(None);
        ctl.set_field(FieldUpdate::Password("weak".to_string()));
        assert_eq!(ctl.form().password, "weak");
    }
}
