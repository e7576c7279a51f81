//! In-process services backing the portfolio page.

pub mod contact;
pub mod project_store;

pub use contact::{Acknowledgement, ContactError, ContactForm};
pub use project_store::ProjectStore;
