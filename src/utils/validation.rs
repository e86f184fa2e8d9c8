use crate::config::ValidationConfig;
use crate::types::error::AppError;
use crate::types::user::{RUserEdit, RUserLogin, RUserRegister};

/// Field rules for incoming payloads, built once from `ValidationConfig`.
#[derive(Clone, Debug)]
pub struct RequestValidator {
    config: ValidationConfig,
}

impl RequestValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn validate_register(&self, req: &RUserRegister) -> Result<(), AppError> {
        let mut problems = Vec::new();
        self.check_phone(&req.phone_number, &mut problems);
        self.check_name(&req.full_name, &mut problems);
        self.check_password(&req.password, &mut problems);
        finish(problems)
    }

    pub fn validate_login(&self, req: &RUserLogin) -> Result<(), AppError> {
        let mut problems = Vec::new();
        self.check_phone(&req.phone_number, &mut problems);
        if req.password.is_empty() {
            problems.push("password is required".to_string());
        }
        finish(problems)
    }

    pub fn validate_edit(&self, req: &RUserEdit) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if req.phone_number.is_none() && req.full_name.is_none() {
            problems.push("phoneNumber or fullName is required".to_string());
        }
        if let Some(phone) = &req.phone_number {
            self.check_phone(phone, &mut problems);
        }
        if let Some(name) = &req.full_name {
            self.check_name(name, &mut problems);
        }
        finish(problems)
    }

    fn check_phone(&self, phone: &str, problems: &mut Vec<String>) {
        let c = &self.config;
        let len = phone.chars().count();
        if !phone.starts_with(&c.phone_prefix) {
            problems.push(format!("phoneNumber must start with {}", c.phone_prefix));
        }
        if len < c.phone_min_len || len > c.phone_max_len {
            problems.push(format!(
                "phoneNumber must be {}-{} characters",
                c.phone_min_len, c.phone_max_len
            ));
        }
        let digits = phone.strip_prefix('+').unwrap_or(phone);
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            problems.push("phoneNumber must contain only digits".to_string());
        }
    }

    fn check_name(&self, name: &str, problems: &mut Vec<String>) {
        let c = &self.config;
        let len = name.chars().count();
        if len < c.name_min_len || len > c.name_max_len {
            problems.push(format!(
                "fullName must be {}-{} characters",
                c.name_min_len, c.name_max_len
            ));
        }
    }

    fn check_password(&self, password: &str, problems: &mut Vec<String>) {
        let c = &self.config;
        let len = password.chars().count();
        if len < c.password_min_len || len > c.password_max_len {
            problems.push(format!(
                "password must be {}-{} characters",
                c.password_min_len, c.password_max_len
            ));
        }
        if !self.is_composed(password) {
            problems.push(
                "password needs a digit, a lowercase letter, an uppercase letter and a symbol"
                    .to_string(),
            );
        }
    }

    fn is_composed(&self, password: &str) -> bool {
        let (mut digit, mut lower, mut upper, mut symbol) = (false, false, false, false);
        for ch in password.chars() {
            if ch.is_ascii_digit() {
                digit = true;
            } else if ch.is_lowercase() {
                lower = true;
            } else if ch.is_uppercase() {
                upper = true;
            } else if self.config.password_symbols.contains(ch) {
                symbol = true;
            }
        }
        digit && lower && upper && symbol
    }
}

fn finish(problems: Vec<String>) -> Result<(), AppError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!("invalid data: {}", problems.join("; "))))
    }
}
