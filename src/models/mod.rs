//! Database models shared across the CRM repository.

pub mod account;
pub mod config;
pub mod contact;
pub mod organization;
pub mod user;
