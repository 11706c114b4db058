//! # Form Handling Module
//!
//! ## Purpose
//! Validation for the contact and newsletter forms. Submissions are not
//! persisted or delivered anywhere; a valid submission clears the form and
//! shows a success toast, an invalid one shows an error toast and leaves
//! the input intact.
//!
//! ## Input/Output Specification
//! - **Input**: Submitted field values
//! - **Output**: `FormOutcome` carrying the toast to show and whether the
//!   form resets
//! - **Validation**: Presence checks, then a structural email shape check

use crate::state::ToastLevel;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Accepts "text, @, text, dot, text" with no whitespace. Intentionally a
/// shape check, not an address-validity check.
fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|_| unreachable!())
    })
}

/// Whether an email value passes the structural shape check
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Result of validating a submission
#[derive(Debug, Clone, PartialEq)]
pub struct FormOutcome {
    /// Toast message, always in the site language
    pub message: String,
    pub level: ToastLevel,
    /// Whether the form clears its fields
    pub reset_form: bool,
}

impl FormOutcome {
    fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            level: ToastLevel::Success,
            reset_form: true,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            level: ToastLevel::Error,
            reset_form: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == ToastLevel::Success
    }
}

/// Contact form fields
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Validate in order: presence of all fields, then email shape.
    pub fn validate(&self) -> FormOutcome {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return FormOutcome::error("Por favor, preencha todos os campos.");
        }

        if !is_valid_email(email) {
            return FormOutcome::error("Por favor, insira um email válido.");
        }

        FormOutcome::success(
            "Mensagem enviada com sucesso! Entraremos em contacto em breve.",
        )
    }
}

/// Newsletter form fields
#[derive(Debug, Clone, Deserialize)]
pub struct NewsletterSubmission {
    #[serde(default)]
    pub email: String,
}

impl NewsletterSubmission {
    pub fn validate(&self) -> FormOutcome {
        let email = self.email.trim();

        if email.is_empty() {
            return FormOutcome::error("Por favor, insira o seu email.");
        }

        if !is_valid_email(email) {
            return FormOutcome::error("Por favor, insira um email válido.");
        }

        FormOutcome::success("Subscrição realizada com sucesso!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_email_shape_check() {
        assert!(is_valid_email("ana@exemplo.pt"));
        assert!(is_valid_email("a.b+c@sub.dominio.com"));
        assert!(!is_valid_email("sem-arroba.pt"));
        assert!(!is_valid_email("dois@@exemplo.pt"));
        assert!(!is_valid_email("espaço no@exemplo.pt"));
        assert!(!is_valid_email("sem-ponto@dominio"));
    }

    #[test]
    fn test_contact_requires_all_fields() {
        let outcome = contact("", "ana@exemplo.pt", "Olá").validate();
        assert_eq!(outcome.message, "Por favor, preencha todos os campos.");
        assert!(!outcome.reset_form);

        let outcome = contact("Ana", "ana@exemplo.pt", "   ").validate();
        assert_eq!(outcome.message, "Por favor, preencha todos os campos.");
    }

    #[test]
    fn test_contact_rejects_bad_email() {
        let outcome = contact("Ana", "ana-exemplo.pt", "Olá").validate();
        assert_eq!(outcome.message, "Por favor, insira um email válido.");
        assert_eq!(outcome.level, ToastLevel::Error);
    }

    #[test]
    fn test_contact_success_resets_form() {
        let outcome = contact("Ana", "ana@exemplo.pt", "Gostei do episódio.").validate();
        assert!(outcome.is_success());
        assert!(outcome.reset_form);
        assert_eq!(
            outcome.message,
            "Mensagem enviada com sucesso! Entraremos em contacto em breve."
        );
    }

    #[test]
    fn test_newsletter_messages() {
        let empty = NewsletterSubmission {
            email: String::new(),
        };
        assert_eq!(empty.validate().message, "Por favor, insira o seu email.");

        let bad = NewsletterSubmission {
            email: "não-é-email".to_string(),
        };
        assert_eq!(bad.validate().message, "Por favor, insira um email válido.");

        let good = NewsletterSubmission {
            email: "ana@exemplo.pt".to_string(),
        };
        let outcome = good.validate();
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "Subscrição realizada com sucesso!");
    }
}
