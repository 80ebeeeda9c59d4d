//! Domain aggregates exposed by the CRM service layer.

pub mod account;
pub mod auth;
pub mod contact;
pub mod contact_info;
pub mod filter;
pub mod organization;
pub mod types;
pub mod user;
