mod contact_email;
mod contact_message;
mod form_errors;
mod html;
mod notification;
mod person_name;
mod submission;
mod subscription;

pub use contact_email::ContactEmail;
pub use contact_message::ContactMessage;
pub use form_errors::FormErrors;
pub use notification::{EmailMessage, Mailbox};
pub use person_name::PersonName;
pub use submission::{ContactSubmission, SubmissionInput};
pub use subscription::{SubscriptionRequest, SubscriptionStatus};
