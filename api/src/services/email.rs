//! Email service module for handling email-related functionality.
//!
//! Messages are composed here and sent through the `Mailer` constructed at
//! process startup and carried in `AppState`; nothing in this module owns a
//! transport or reads credentials on its own.

use lettre::message::{Message, MultiPart, SinglePart, header};
use util::{config, mailer::Mailer};

/// Service for handling email-related operations.
pub struct EmailService;

impl EmailService {
    /// Sends a password reset email to the specified email address.
    ///
    /// The email includes both plain text and HTML versions with a reset link
    /// and an expiration notice.
    pub async fn send_password_reset_email(
        mailer: &Mailer,
        to_email: &str,
        reset_token: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let frontend_url = config::frontend_url();
        let from_name = config::email_from_name();
        let expiry_minutes = config::reset_token_expiry_minutes();
        let reset_link = format!("{}/reset-password?token={}", frontend_url, reset_token);

        let email = Message::builder()
            .from(mailer.from_mailbox())
            .to(to_email.parse()?)
            .subject("Reset Your Password")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(format!(
                                "Hello,\n\n\
                                You have requested to reset your password. Click the link below to proceed:\n\n\
                                {}\n\n\
                                This link will expire in {} minutes.\n\n\
                                If you did not request this password reset, please ignore this email.\n\n\
                                Best regards,\n\
                                {}",
                                reset_link, expiry_minutes, from_name
                            )),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(format!(
                                "<p>Hello,</p>\
                                <p>You have requested to reset your password. Click the button below to proceed:</p>\
                                <p><a href=\"{}\" style=\"display:inline-block;padding:10px 20px;\
                                background-color:#1a73e8;color:#ffffff;text-decoration:none;\
                                border-radius:4px;\">Reset Password</a></p>\
                                <p>This link will expire in {} minutes.</p>\
                                <p>If you did not request this password reset, please ignore this email.</p>\
                                <p>Best regards,<br>{}</p>",
                                reset_link, expiry_minutes, from_name
                            )),
                    ),
            )?;

        mailer.send(email).await?;
        Ok(())
    }
}
