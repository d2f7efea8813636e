//! # FaceFinder Client Library
//!
//! Core library for the FaceFinder photo collection and face search client.
//! It validates form input against rule strings, keeps the session state,
//! and talks to the backend API.
//!
//! ## Modules
//!
//! - [`validation`] - Rule-based field validator and inline input rules
//! - [`auth`] - Session state with pluggable credential persistence
//! - [`http`] - JSON API client with bearer auth and 401 handling
//! - [`model`] - Collections, searches and their status display tables

pub mod auth;
pub mod http;
pub mod model;
pub mod validation;
