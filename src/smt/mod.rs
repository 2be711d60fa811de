#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Bounded integers, all-distinct and linear constraints, bit-blasted onto
//! the CDCL solver in [`crate::sat`].

pub mod error;
pub mod int_var;
pub mod linear;
pub mod model;
pub mod session;

pub use error::{SmtError, SmtResult};
pub use int_var::IntVar;
pub use model::Model;
pub use session::{CheckResult, EngineOptions, Session};
