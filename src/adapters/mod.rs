//! Adapters for external systems.

pub mod rest;
