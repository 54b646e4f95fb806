//! API handlers module

pub mod abstracts;
pub mod auth;
pub mod faculty;
pub mod health;
pub mod projects;
pub mod requests;
pub mod selection;
