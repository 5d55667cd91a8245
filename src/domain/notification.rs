use super::{html, ContactEmail, ContactSubmission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub email: ContactEmail,
    pub name: String,
}

impl Mailbox {
    pub fn new(email: ContactEmail, name: String) -> Self {
        Self { email, name }
    }
}

/// A single transactional email.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub sender: Mailbox,
    pub recipient: Mailbox,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

impl EmailMessage {
    /// Tells the site operator about a new submission. The operator is both sender and
    /// recipient.
    pub fn contact_notification(submission: &ContactSubmission, operator: &Mailbox) -> Self {
        let subject = format!(
            "You have a new message from {} {}",
            submission.first_name, submission.last_name
        );
        let newsletter = if submission.newsletter { "Yes" } else { "No" };
        let escape = html::escape;

        let html_content = format!(
            "<h2>New Contact Form Submission</h2>\
            <p><strong>First Name:</strong> {}</p>\
            <p><strong>Last Name:</strong> {}</p>\
            <p><strong>Email:</strong> {}</p>\
            <p><strong>Newsletter Subscription:</strong> {}</p>\
            <p><strong>Phone:</strong> {}</p>\
            <p><strong>Services Interested In:</strong> {}</p>\
            <p><strong>How They Found Us:</strong> {}</p>\
            <p><strong>Message:</strong><br />{}</p>",
            submission.first_name.html(),
            submission.last_name.html(),
            escape(submission.email.as_ref()),
            newsletter,
            escape(submission.phone_or_default()),
            escape(&submission.services_summary()),
            escape(submission.referral_or_default()),
            submission.message.html(),
        );
        let text_content = format!(
            "New Contact Form Submission\n\n\
            First Name: {}\n\
            Last Name: {}\n\
            Email: {}\n\
            Newsletter Subscription: {}\n\
            Phone: {}\n\
            Services Interested In: {}\n\
            How They Found Us: {}\n\n\
            Message:\n{}\n",
            submission.first_name,
            submission.last_name,
            submission.email,
            newsletter,
            submission.phone_or_default(),
            submission.services_summary(),
            submission.referral_or_default(),
            submission.message.as_ref(),
        );

        Self {
            sender: operator.clone(),
            recipient: operator.clone(),
            subject,
            html_content,
            text_content,
        }
    }
}
