//! Command functions - the operations a UI adapter invokes.
//!
//! Every command goes through a [`Session`], which owns the credential and the
//! session's [`RecordStore`](crate::store::RecordStore). Commands return a
//! `Result` and leave prior state untouched on failure.

mod budget;
mod dashboard;
mod expense;
mod session;

pub use dashboard::Dashboard;
pub use session::Session;
