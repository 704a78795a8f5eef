//! Submission gateway to the TeamBrains authentication API
//!
//! Translates the completed form into one of two registration requests: the
//! partner endpoint when the signup carries a school referral, the standard
//! signup endpoint otherwise. Payload construction is pure so the wire
//! shapes can be checked without a server.

use miette::Diagnostic;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::form::{DeveloperProfile, FormState, Role};
use crate::core::referral::SchoolReferral;

const PARTNER_REGISTER_PATH: &str = "/api/partnership/student/register";
const SIGNUP_PATH: &str = "/auth/signup";

/// Session token returned by a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SubmissionError {
    #[error("could not reach the registration service: {0}")]
    #[diagnostic(
        code(tbsignup::api::transport),
        help("check your network connection and the api_url setting")
    )]
    Transport(#[from] reqwest::Error),

    /// The service refused the registration; carries the remote message
    /// when the response body had one
    #[error("{message}")]
    #[diagnostic(code(tbsignup::api::rejected))]
    Rejected { message: String },

    #[error("the registration service returned an unexpected response")]
    #[diagnostic(code(tbsignup::api::malformed_response))]
    MalformedResponse,
}

/// Body for POST /api/partnership/student/register
#[derive(Debug, Serialize)]
struct PartnerRegistration<'a> {
    token: &'a str,
    nom: &'a str,
    prenom: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(rename = "typeDeveloppeur", skip_serializing_if = "Option::is_none")]
    type_developpeur: Option<DeveloperProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technologies: Option<&'a [String]>,
}

/// Envelope for POST /auth/signup
#[derive(Debug, Serialize)]
struct SignupEnvelope<'a> {
    data: SignupData<'a>,
}

#[derive(Debug, Serialize)]
struct SignupData<'a> {
    nom: &'a str,
    prenom: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(rename = "typeDeveloppeur", skip_serializing_if = "Option::is_none")]
    type_developpeur: Option<DeveloperProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technologies: Option<&'a [String]>,
}

fn partner_payload<'a>(form: &'a FormState, referral: &'a SchoolReferral) -> PartnerRegistration<'a> {
    PartnerRegistration {
        token: &referral.token,
        nom: &form.nom,
        prenom: &form.prenom,
        email: &form.email,
        password: &form.password,
        type_developpeur: form.type_developpeur,
        technologies: (!form.technologies.is_empty()).then_some(form.technologies.as_slice()),
    }
}

fn signup_payload(form: &FormState) -> SignupEnvelope<'_> {
    SignupEnvelope {
        data: SignupData {
            nom: &form.nom,
            prenom: &form.prenom,
            email: &form.email,
            password: &form.password,
            role: form.role,
            type_developpeur: form.type_developpeur,
            technologies: (!form.technologies.is_empty()).then_some(form.technologies.as_slice()),
        },
    }
}

/// Boundary component translating the form into a registration request
#[derive(Debug)]
pub struct SubmissionGateway {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SubmissionGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::blocking::Client::new(),
            base_url,
        }
    }

    /// Send the form to the appropriate endpoint. No retry: a failure is
    /// reported once and the caller decides whether to resubmit.
    pub fn submit(
        &self,
        form: &FormState,
        referral: Option<&SchoolReferral>,
    ) -> Result<SessionToken, SubmissionError> {
        match referral {
            Some(r) if r.is_from_school => self.submit_partner(form, r),
            _ => self.submit_signup(form),
        }
    }

    fn submit_partner(
        &self,
        form: &FormState,
        referral: &SchoolReferral,
    ) -> Result<SessionToken, SubmissionError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, PARTNER_REGISTER_PATH))
            .json(&partner_payload(form, referral))
            .send()?;
        Self::parse_response(response, "access_token")
    }

    fn submit_signup(&self, form: &FormState) -> Result<SessionToken, SubmissionError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, SIGNUP_PATH))
            .json(&signup_payload(form))
            .send()?;
        Self::parse_response(response, "accessToken")
    }

    /// Extract the token field on success, or the remote error message on
    /// failure. Error bodies that are not JSON fall back to a generic
    /// message carrying the HTTP status.
    fn parse_response(
        response: reqwest::blocking::Response,
        token_field: &str,
    ) -> Result<SessionToken, SubmissionError> {
        let status = response.status();
        let text = response.text()?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("registration failed (HTTP {})", status.as_u16()));
            return Err(SubmissionError::Rejected { message });
        }

        body.get(token_field)
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .map(|t| SessionToken(t.to_string()))
            .ok_or(SubmissionError::MalformedResponse)
    }
}
