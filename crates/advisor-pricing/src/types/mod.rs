//! Core types for the credit advisor

pub mod suggestion;
