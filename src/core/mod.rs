//! Core functionality for the batch service

pub mod batch;
