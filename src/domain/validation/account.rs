use serde::Deserialize;

use crate::domain::account::{Email, Username};
use crate::domain::foundation::Role;

use super::ValidationReport;

pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Clone, Default, Deserialize)]
pub struct SignUpInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl std::fmt::Debug for SignUpInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct SignUp {
    pub username: Username,
    pub fullname: Username,
    pub email: Email,
    pub password: String,
    pub role: Role,
}

fn check_password(report: &mut ValidationReport, password: &str) -> Option<String> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        report.add("password", "password must be at least 6 characters long");
        None
    } else {
        Some(password.to_string())
    }
}

pub fn validate_sign_up(input: &SignUpInput) -> Result<SignUp, ValidationReport> {
    let mut report = ValidationReport::new();
    let username = report.check(Username::try_new("username", input.username.clone()));
    let fullname = report.check(Username::try_new("fullname", input.fullname.clone()));
    let email = report.check(Email::try_new(input.email.clone()));
    let password = check_password(&mut report, &input.password);
    let role = report.check(input.role.trim().parse::<Role>());

    match (username, fullname, email, password, role) {
        (Some(username), Some(fullname), Some(email), Some(password), Some(role)) => Ok(SignUp {
            username,
            fullname,
            email,
            password,
            role,
        }),
        _ => Err(report),
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

pub fn validate_login(input: &LoginInput) -> Result<Credentials, ValidationReport> {
    let mut report = ValidationReport::new();
    let email = report.check(Email::try_new(input.email.clone()));
    let password = check_password(&mut report, &input.password);
    match (email, password) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err(report),
    }
}
