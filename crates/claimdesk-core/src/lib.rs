//! Core types and editing rules for claimdesk claim intake.
//!
//! This crate is deliberately free of HTTP and async dependencies. Every
//! operation is a pure transformation from the current slot values to a
//! complete replacement value; the caller owns the claim and merges the
//! replacement back in.

pub mod action;
pub mod claim;
pub mod dates;
pub mod editor;
pub mod error;
pub mod id;
pub mod participant;
pub mod section;
pub mod services;

pub use error::{Error, Result};
