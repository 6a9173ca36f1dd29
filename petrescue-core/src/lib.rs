//! Core types and client-side logic for PetRescue animal case reports.
//!
//! Everything in this crate is pure and framework-independent so it can be
//! shared by the Dioxus web app, the CLI, and their tests:
//! - `case`: wire types for cases, create/update payloads and image uploads
//! - `status`: the closed `CaseStatus` enum and its transition table
//! - `geo`: validated coordinates, map centering
//! - `heat_zone`: proximity clustering of active cases for the map overlay
//! - `refresh`: the invalidation counter shared by the views

pub mod case;
pub mod decor;
pub mod error;
pub mod geo;
pub mod heat_zone;
pub mod image;
pub mod locate;
pub mod refresh;
pub mod stats;
pub mod status;

pub use case::{AnimalCase, CaseUpdate, NewCase, UploadedImage};
pub use error::ValidationError;
pub use geo::{Coordinates, LatLng};
pub use status::{CaseStatus, StatusFilter};
