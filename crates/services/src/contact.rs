//! Contact form.
//!
//! There is no mail backend: a valid submission is acknowledged locally and
//! nothing leaves the machine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Please fill in the {field} field")]
    MissingField { field: &'static str },

    #[error("\"{email}\" does not look like an email address")]
    InvalidEmail { email: String },
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField { field });
            }
        }

        let email = self.email.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && !domain.is_empty());
        if !valid {
            return Err(ContactError::InvalidEmail {
                email: email.to_string(),
            });
        }
        Ok(())
    }

    /// Validate and acknowledge. No network call is made.
    pub fn submit(&self) -> Result<Acknowledgement, ContactError> {
        self.validate()?;
        tracing::info!(
            message_chars = self.message.chars().count(),
            "contact form acknowledged (no delivery backend configured)"
        );
        Ok(Acknowledgement {
            text: format!(
                "Thanks, {}! Your message was noted. This form has no delivery backend yet, \
                 so please also reach out on GitHub or LinkedIn.",
                self.name.trim()
            ),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
