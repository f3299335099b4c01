//! Middleware del gateway

pub mod cors;
