//! Form validation.
//!
//! A [`Schema`] turns a form's value bag into per-field messages. The
//! [`Validator`] builder provides the common rules; any closure with the
//! right signature is a schema too.
//!
//! # Example
//!
//! ```
//! use backoffice_engine::validation::Validator;
//!
//! let schema = Validator::new()
//!     .field("username")
//!         .required("Username is required")
//!         .min_length(3, "Username must be at least 3 characters")
//!     .field("email")
//!         .required("Email is required")
//!         .email("Please enter a valid email")
//!     .field("accept_terms")
//!         .checked("You must accept the terms")
//!     .build();
//! # let _ = schema;
//! ```

mod errors;
mod schema;
mod validator;

pub use errors::FieldErrors;
pub use schema::Schema;
pub use validator::{FieldBuilder, Validator};
