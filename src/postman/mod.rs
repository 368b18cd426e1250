//! Postman document model and naming rules

pub mod models;
pub mod naming;
