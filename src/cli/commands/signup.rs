//! `tbsignup signup` command - run the signup wizard
//!
//! Every form field has a matching flag, so the wizard can run fully
//! scripted; fields left out are prompted for interactively.

use clap::ValueEnum;
use console::style;
use dialoguer::theme::ColorfulTheme;
use miette::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::api::SubmissionGateway;
use crate::cli::GlobalOpts;
use crate::core::form::{DeveloperProfile, FormState, Role};
use crate::core::referral::SchoolReferral;
use crate::core::{Config, SessionStore};
use crate::wizard::steps::{self, Prefill, StepAction};
use crate::wizard::{Progress, WizardController, WizardStep};

#[derive(clap::Args, Debug)]
pub struct SignupArgs {
    /// Account role
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,

    /// Last name
    #[arg(long)]
    pub nom: Option<String>,

    /// First name
    #[arg(long)]
    pub prenom: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted for securely when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Developer profile (students only)
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Technology skill, repeatable (students only)
    #[arg(long = "tech")]
    pub tech: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Student,
    #[value(alias = "entrepreneur")]
    Businessman,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Student => Role::Student,
            RoleArg::Businessman => Role::Businessman,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    #[value(alias = "frontend")]
    FrontEnd,
    #[value(alias = "backend")]
    BackEnd,
    #[value(alias = "fullstack")]
    FullStack,
    Designer,
}

impl From<ProfileArg> for DeveloperProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::FrontEnd => DeveloperProfile::FrontEnd,
            ProfileArg::BackEnd => DeveloperProfile::BackEnd,
            ProfileArg::FullStack => DeveloperProfile::FullStack,
            ProfileArg::Designer => DeveloperProfile::Designer,
        }
    }
}

impl From<&SignupArgs> for Prefill {
    fn from(args: &SignupArgs) -> Self {
        Prefill {
            role: args.role.map(Role::from),
            nom: args.nom.clone(),
            prenom: args.prenom.clone(),
            email: args.email.clone(),
            password: args.password.clone(),
            profile: args.profile.map(DeveloperProfile::from),
            technologies: args.tech.clone(),
        }
    }
}

pub fn run(args: SignupArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let api_url = global
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url());

    let store = SessionStore::discover(global.data_dir.clone())?;
    let referral = store.load_referral()?;
    let gateway = SubmissionGateway::new(api_url.as_str());
    let mut controller = WizardController::new(referral);

    if global.verbose {
        eprintln!("{}", style(format!("api: {}", api_url)).dim());
        eprintln!(
            "{}",
            style(format!("session store: {}", store.root().display())).dim()
        );
    }

    let prefill = Prefill::from(&args);
    let theme = ColorfulTheme::default();

    loop {
        let step = controller.step();
        let action = match step {
            WizardStep::RoleSelect => steps::role_select(&theme, &mut controller, &prefill)?,
            WizardStep::Credentials => steps::credentials(&theme, &mut controller, &prefill)?,
            WizardStep::ProfileSelect => steps::profile_select(&theme, &mut controller, &prefill)?,
            WizardStep::SkillsSelect => steps::skills_select(&theme, &mut controller, &prefill)?,
        };

        match action {
            StepAction::Back => {
                controller.retreat()?;
            }
            StepAction::Forward => match controller.forward() {
                Ok(Progress::Moved(_)) => {}
                Ok(Progress::ReadyToSubmit) => {
                    if !global.quiet {
                        println!();
                        println!("{}", review_table(controller.form(), controller.referral()));
                    }
                    let _token = controller.submit(&gateway, &store)?;
                    break;
                }
                Err(err) => {
                    // A scripted step cannot be corrected interactively
                    if prefill.covers(step) {
                        return Err(err.into());
                    }
                    eprintln!("{} {}", style("✗").red(), style(err.to_string()).red());
                }
            },
        }
    }

    if !global.quiet {
        println!();
        println!("{} Account created!", style("✓").green());
        println!(
            "Your session is ready. Open {} to get started.",
            style(config.app_url()).bold()
        );
    }

    Ok(())
}

/// Summary of the collected answers, shown before submission
fn review_table(form: &FormState, referral: Option<&SchoolReferral>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    if let Some(role) = form.role {
        builder.push_record(["Role".to_string(), role.to_string()]);
    }
    builder.push_record(["Name".to_string(), format!("{} {}", form.prenom, form.nom)]);
    builder.push_record(["Email".to_string(), form.email.clone()]);
    builder.push_record(["Password", "********"]);
    if let Some(profile) = form.type_developpeur {
        builder.push_record(["Profile".to_string(), profile.to_string()]);
    }
    if !form.technologies.is_empty() {
        builder.push_record(["Technologies".to_string(), form.technologies.join(", ")]);
    }
    if let Some(r) = referral.filter(|r| r.is_from_school) {
        builder.push_record(["School".to_string(), r.school.name.clone()]);
    }

    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_table_masks_password() {
        let form = FormState {
            role: Some(Role::Student),
            nom: "Dupont".to_string(),
            prenom: "Jean".to_string(),
            email: "j@d.fr".to_string(),
            password: "Abc123!@".to_string(),
            type_developpeur: Some(DeveloperProfile::FrontEnd),
            technologies: vec!["React".to_string()],
        };
        let table = review_table(&form, None);
        assert!(table.contains("Jean Dupont"));
        assert!(table.contains("React"));
        assert!(!table.contains("Abc123!@"));
    }

    #[test]
    fn test_prefill_from_args() {
        let args = SignupArgs {
            role: Some(RoleArg::Businessman),
            nom: Some("Martin".to_string()),
            prenom: None,
            email: None,
            password: None,
            profile: Some(ProfileArg::FullStack),
            tech: vec!["SQL".to_string()],
        };
        let pre = Prefill::from(&args);
        assert_eq!(pre.role, Some(Role::Businessman));
        assert_eq!(pre.profile, Some(DeveloperProfile::FullStack));
        assert_eq!(pre.technologies, vec!["SQL"]);
        assert!(pre.nom.is_some() && pre.prenom.is_none());
    }
}
