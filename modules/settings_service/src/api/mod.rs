//! API layer - adapters exposing the domain service

pub mod native;
