//! Services composing the forecast pipeline with the surrounding reports.

pub mod services;
