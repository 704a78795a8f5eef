//! `tbsignup referral` command - manage the partner-school referral
//!
//! The CLI counterpart of following a partner-school invitation link:
//! `import` stores the referral the next signup run will pick up, `show`
//! inspects it, `clear` discards it.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::referral::{SchoolInfo, SchoolReferral};
use crate::core::SessionStore;

#[derive(Subcommand, Debug)]
pub enum ReferralCommands {
    /// Store a referral from a partner-school invitation
    Import(ImportArgs),

    /// Show the pending referral
    Show,

    /// Discard the pending referral
    Clear,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Registration token from the invitation
    #[arg(long, short = 't')]
    pub token: String,

    /// Partner school name
    #[arg(long, short = 's')]
    pub school: String,

    /// School description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

pub fn run(cmd: ReferralCommands, global: &GlobalOpts) -> Result<()> {
    let store = SessionStore::discover(global.data_dir.clone())?;
    match cmd {
        ReferralCommands::Import(args) => run_import(args, &store, global),
        ReferralCommands::Show => run_show(&store),
        ReferralCommands::Clear => run_clear(&store, global),
    }
}

fn run_import(args: ImportArgs, store: &SessionStore, global: &GlobalOpts) -> Result<()> {
    let referral = SchoolReferral::new(
        args.token,
        SchoolInfo {
            name: args.school,
            description: args.description,
        },
    );
    store.save_referral(&referral)?;

    if !global.quiet {
        println!(
            "{} Stored referral from {}",
            style("✓").green(),
            style(&referral.school.name).bold()
        );
        println!("The next `tbsignup signup` run will use the partner registration flow.");
    }
    Ok(())
}

fn run_show(store: &SessionStore) -> Result<()> {
    let Some(referral) = store.load_referral()? else {
        println!("No partner-school referral is stored.");
        return Ok(());
    };

    println!("{} {}", style("School:").bold(), referral.school.name);
    if let Some(ref description) = referral.school.description {
        println!("{} {}", style("Description:").bold(), description);
    }
    println!("{} {}", style("Token:").bold(), referral.token);
    if let Some(saved_at) = referral.saved_at {
        println!(
            "{} {}",
            style("Saved:").bold(),
            saved_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
    if !referral.is_from_school {
        println!(
            "{}",
            style("Not marked as a school signup; the standard flow will be used.").dim()
        );
    }
    Ok(())
}

fn run_clear(store: &SessionStore, global: &GlobalOpts) -> Result<()> {
    store.clear_referral()?;
    if !global.quiet {
        println!("{} Referral cleared", style("✓").green());
    }
    Ok(())
}
