//! Interactive rendering for each wizard step
//!
//! One function per step. Values supplied on the command line (the
//! [`Prefill`]) are taken as-is and the step completes without prompting;
//! otherwise the step renders its prompts with dialoguer. Steps only
//! collect input into the controller; validation and sequencing stay in
//! the controller.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Password, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::form::{DeveloperProfile, FieldUpdate, Role};
use crate::wizard::controller::{WizardController, WizardStep};

/// What the user asked for after filling in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Back,
    Forward,
}

/// Field values supplied as command-line flags
///
/// A step whose fields are all prefilled is scripted: it never prompts, and
/// a validation failure on it aborts the run instead of re-prompting.
#[derive(Debug, Default, Clone)]
pub struct Prefill {
    pub role: Option<Role>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile: Option<DeveloperProfile>,
    pub technologies: Vec<String>,
}

impl Prefill {
    /// Whether every field of the given step was supplied up front
    pub fn covers(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::RoleSelect => self.role.is_some(),
            WizardStep::Credentials => {
                self.nom.is_some()
                    && self.prenom.is_some()
                    && self.email.is_some()
                    && self.password.is_some()
            }
            WizardStep::ProfileSelect => self.profile.is_some(),
            WizardStep::SkillsSelect => !self.technologies.is_empty(),
        }
    }
}

fn print_header(title: &str, tag: Option<String>) {
    println!();
    match tag {
        Some(tag) => println!(
            "{} {} {}",
            style("◆").cyan(),
            style(title).bold(),
            style(format!("[{}]", tag)).dim()
        ),
        None => println!("{} {}", style("◆").cyan(), style(title).bold()),
    }
    println!("{}", style("─".repeat(50)).dim());
}

/// Student signups show their position on the three-screen path; the
/// entrepreneur path has no tag, matching its two-step flow.
fn step_tag(ctl: &WizardController) -> Option<String> {
    if ctl.form().role != Some(Role::Student) {
        return None;
    }
    match ctl.step() {
        WizardStep::RoleSelect => None,
        // RoleSelect does not count toward the three student screens
        step => Some(format!("step {}/3", step.number() - 1)),
    }
}

/// Banner shown on every screen of a partner-school signup
fn print_school_banner(ctl: &WizardController) {
    let Some(referral) = ctl.referral().filter(|r| r.is_from_school) else {
        return;
    };
    println!(
        "{} Partner school signup — {}",
        style("🎓").cyan(),
        style(&referral.school.name).bold()
    );
    if let Some(ref description) = referral.school.description {
        println!("{}", style(description).dim());
    }
    println!();
}

/// Trailing navigation prompt. Hidden when back navigation is not
/// available (first visited step).
fn nav(theme: &ColorfulTheme, ctl: &WizardController, forward_label: &str) -> Result<StepAction> {
    if !ctl.can_retreat() {
        return Ok(StepAction::Forward);
    }
    let items = [forward_label, "Back"];
    let selection = Select::with_theme(theme)
        .with_prompt("Continue")
        .items(&items)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok(if selection == 1 {
        StepAction::Back
    } else {
        StepAction::Forward
    })
}

/// Step 1: choose between the student and entrepreneur paths
pub fn role_select(
    theme: &ColorfulTheme,
    ctl: &mut WizardController,
    pre: &Prefill,
) -> Result<StepAction> {
    if let Some(role) = pre.role {
        ctl.set_field(FieldUpdate::Role(role));
        return Ok(StepAction::Forward);
    }

    print_header("What kind of person are you?", None);
    let items = [
        "Student — challenge yourself and gain experience on real team projects",
        "Entrepreneur — bring your idea to life with a junior developer team",
    ];
    let default = match ctl.form().role {
        Some(Role::Businessman) => 1,
        _ => 0,
    };
    let selection = Select::with_theme(theme)
        .with_prompt("Account type")
        .items(&items)
        .default(default)
        .interact()
        .into_diagnostic()?;

    let role = if selection == 0 {
        Role::Student
    } else {
        Role::Businessman
    };
    ctl.set_field(FieldUpdate::Role(role));
    Ok(StepAction::Forward)
}

/// Step 2: identity fields and password
pub fn credentials(
    theme: &ColorfulTheme,
    ctl: &mut WizardController,
    pre: &Prefill,
) -> Result<StepAction> {
    if pre.covers(WizardStep::Credentials) {
        // covers() checked all four are present
        ctl.set_field(FieldUpdate::Nom(pre.nom.clone().unwrap_or_default()));
        ctl.set_field(FieldUpdate::Prenom(pre.prenom.clone().unwrap_or_default()));
        ctl.set_field(FieldUpdate::Email(pre.email.clone().unwrap_or_default()));
        ctl.set_field(FieldUpdate::Password(pre.password.clone().unwrap_or_default()));
        return Ok(StepAction::Forward);
    }

    print_header("Sign up", step_tag(ctl));
    print_school_banner(ctl);

    let nom: String = Input::with_theme(theme)
        .with_prompt("Last name")
        .with_initial_text(ctl.form().nom.clone())
        .interact_text()
        .into_diagnostic()?;
    let prenom: String = Input::with_theme(theme)
        .with_prompt("First name")
        .with_initial_text(ctl.form().prenom.clone())
        .interact_text()
        .into_diagnostic()?;
    let email: String = Input::with_theme(theme)
        .with_prompt("Email")
        .with_initial_text(ctl.form().email.clone())
        .interact_text()
        .into_diagnostic()?;

    println!(
        "{}",
        style("At least 8 characters, with an uppercase letter, a lowercase letter, and a special character").dim()
    );
    let password = Password::with_theme(theme)
        .with_prompt("Password")
        .interact()
        .into_diagnostic()?;

    ctl.set_field(FieldUpdate::Nom(nom));
    ctl.set_field(FieldUpdate::Prenom(prenom));
    ctl.set_field(FieldUpdate::Email(email));
    ctl.set_field(FieldUpdate::Password(password));

    let forward_label = if ctl.form().role == Some(Role::Businessman) {
        "Sign up"
    } else {
        "Next"
    };
    nav(theme, ctl, forward_label)
}

/// Step 3: developer profile (students only)
pub fn profile_select(
    theme: &ColorfulTheme,
    ctl: &mut WizardController,
    pre: &Prefill,
) -> Result<StepAction> {
    if let Some(profile) = pre.profile {
        ctl.set_field(FieldUpdate::Profile(profile));
        return Ok(StepAction::Forward);
    }

    print_header("What is your profile?", step_tag(ctl));
    print_school_banner(ctl);

    let items: Vec<String> = DeveloperProfile::ALL.iter().map(ToString::to_string).collect();
    let default = ctl
        .form()
        .type_developpeur
        .and_then(|current| DeveloperProfile::ALL.iter().position(|p| *p == current))
        .unwrap_or(0);
    let selection = Select::with_theme(theme)
        .with_prompt("Profile")
        .items(&items)
        .default(default)
        .interact()
        .into_diagnostic()?;

    ctl.set_field(FieldUpdate::Profile(DeveloperProfile::ALL[selection]));
    nav(theme, ctl, "Next")
}

/// Step 4: technology skills for the chosen profile
pub fn skills_select(
    theme: &ColorfulTheme,
    ctl: &mut WizardController,
    pre: &Prefill,
) -> Result<StepAction> {
    if !pre.technologies.is_empty() {
        ctl.set_field(FieldUpdate::Technologies(pre.technologies.clone()));
        return Ok(StepAction::Forward);
    }

    print_header("What are your skills?", step_tag(ctl));
    print_school_banner(ctl);

    let catalog: &[&str] = ctl
        .form()
        .type_developpeur
        .map(|p| p.technologies())
        .unwrap_or(&[]);
    let checked: Vec<bool> = catalog
        .iter()
        .map(|t| ctl.form().technologies.iter().any(|s| s == t))
        .collect();

    let picks = MultiSelect::with_theme(theme)
        .with_prompt("Technologies (space to toggle, enter to confirm)")
        .items(catalog)
        .defaults(&checked)
        .interact()
        .into_diagnostic()?;

    let technologies: Vec<String> = picks.into_iter().map(|i| catalog[i].to_string()).collect();
    ctl.set_field(FieldUpdate::Technologies(technologies));
    nav(theme, ctl, "Sign up")
}
