//! Verbalisation: turning goals into questions.
//!
//! - [`TemplateStore`]: templates keyed by `<scope:goal[:attribute]>`
//! - [`VerbalisationResolver`]: pattern lookup, arity filtering, random
//!   choice, repeat suppression and argument substitution
//! - [`loader`]: template file parsing

pub mod loader;
mod resolver;
mod store;

pub use loader::{load_templates, parse_templates};
pub use resolver::{substitute, Verbalisation, VerbalisationRequest, VerbalisationResolver};
pub use store::{Template, TemplateStore};
