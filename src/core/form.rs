//! The signup form record
//!
//! `FormState` accumulates the answers collected across the wizard's steps.
//! Field names follow the TeamBrains API wire format (`nom`, `prenom`,
//! `typeDeveloppeur`), which the serde renames preserve.

use serde::{Deserialize, Serialize};

/// Account role chosen on the first step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Joins projects to gain experience
    Student,
    /// Brings a project and recruits a team
    Businessman,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Businessman => write!(f, "businessman"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "businessman" | "entrepreneur" => Ok(Role::Businessman),
            _ => Err(format!("Invalid role: {}. Use student or businessman", s)),
        }
    }
}

/// Developer profile chosen on the third step (students only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeveloperProfile {
    FrontEnd,
    BackEnd,
    FullStack,
    Designer,
}

impl DeveloperProfile {
    pub const ALL: [DeveloperProfile; 4] = [
        DeveloperProfile::FrontEnd,
        DeveloperProfile::BackEnd,
        DeveloperProfile::FullStack,
        DeveloperProfile::Designer,
    ];

    /// Technologies offered on the skills step for this profile
    pub fn technologies(&self) -> &'static [&'static str] {
        match self {
            DeveloperProfile::FrontEnd => &["HTML", "CSS", "JavaScript", "React", "Vue"],
            DeveloperProfile::BackEnd => {
                &["Node.js", "Python", "Java", "PHP", "Ruby", "MongoDB", "SQL"]
            }
            DeveloperProfile::FullStack => &[
                "HTML", "CSS", "JavaScript", "Node.js", "React", "MongoDB", "SQL", "Ruby", "PHP",
                "Java", "Python", "Vue",
            ],
            DeveloperProfile::Designer => {
                &["Figma", "Sketch", "Adobe XD", "Photoshop", "Illustrator"]
            }
        }
    }
}

impl std::fmt::Display for DeveloperProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeveloperProfile::FrontEnd => write!(f, "FrontEnd"),
            DeveloperProfile::BackEnd => write!(f, "BackEnd"),
            DeveloperProfile::FullStack => write!(f, "FullStack"),
            DeveloperProfile::Designer => write!(f, "Designer"),
        }
    }
}

impl std::str::FromStr for DeveloperProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "").as_str() {
            "frontend" => Ok(DeveloperProfile::FrontEnd),
            "backend" => Ok(DeveloperProfile::BackEnd),
            "fullstack" => Ok(DeveloperProfile::FullStack),
            "designer" => Ok(DeveloperProfile::Designer),
            _ => Err(format!(
                "Invalid profile: {}. Use FrontEnd, BackEnd, FullStack, or Designer",
                s
            )),
        }
    }
}

/// Answers accumulated across the wizard's steps
///
/// Lives for the whole wizard session and is only read at submission time.
#[derive(Debug, Default, Clone)]
pub struct FormState {
    pub role: Option<Role>,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub password: String,
    pub type_developpeur: Option<DeveloperProfile>,
    pub technologies: Vec<String>,
}

/// A single field mutation, one variant per form field
///
/// Steps funnel every edit through this union so the controller merges
/// values without inspecting which step produced them.
#[derive(Debug, Clone)]
pub enum FieldUpdate {
    Role(Role),
    Nom(String),
    Prenom(String),
    Email(String),
    Password(String),
    Profile(DeveloperProfile),
    Technologies(Vec<String>),
}

impl FormState {
    /// Merge a single field update. Performs no validation.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Role(role) => self.role = Some(role),
            FieldUpdate::Nom(nom) => self.nom = nom,
            FieldUpdate::Prenom(prenom) => self.prenom = prenom,
            FieldUpdate::Email(email) => self.email = email,
            FieldUpdate::Password(password) => self.password = password,
            FieldUpdate::Profile(profile) => self.type_developpeur = Some(profile),
            FieldUpdate::Technologies(techs) => {
                // Set semantics: keep first occurrence, preserve order
                let mut seen = Vec::with_capacity(techs.len());
                for tech in techs {
                    if !seen.contains(&tech) {
                        seen.push(tech);
                    }
                }
                self.technologies = seen;
            }
        }
    }
}
