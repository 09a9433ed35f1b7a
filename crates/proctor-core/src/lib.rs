//! proctor-core — Assessment domain model: questions, catalogs, exams.
//!
//! This crate defines the question variants, the exam lifecycle state
//! machine, the notification bus, and the collaborator traits the rest of
//! the proctor system builds on.

pub mod bus;
pub mod catalog;
pub mod error;
pub mod exam;
pub mod journal;
pub mod model;
pub mod parser;
pub mod question;
pub mod traits;
