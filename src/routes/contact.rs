mod get;
mod page;
mod post;

pub use get::contact_form;
pub use post::{process_submission, submit_contact_form, ContactError};
