use serde::Deserialize;
use tracing::info;

use super::waitlist_service::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub email: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("message is empty")]
    EmptyMessage,
}

/// There is no mailbox integration yet; valid submissions go to the log
/// where they are picked up manually.
pub fn submit_contact(request: &ContactRequest) -> Result<(), ContactError> {
    let email = request.email.trim();
    if !is_valid_email(email) {
        return Err(ContactError::InvalidEmail);
    }
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ContactError::EmptyMessage);
    }

    info!("Contact form submission from {}: {}", email, message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn valid_submission_is_accepted() {
        assert!(submit_contact(&request("parent@example.com", "Hi there")).is_ok());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let err = submit_contact(&request("not-an-email", "Hi")).unwrap_err();
        assert!(matches!(err, ContactError::InvalidEmail));
    }

    #[test]
    fn blank_message_is_rejected() {
        let err = submit_contact(&request("parent@example.com", "   ")).unwrap_err();
        assert!(matches!(err, ContactError::EmptyMessage));
    }
}
