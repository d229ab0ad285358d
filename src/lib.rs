//! Highlight engine for a reading app.
//!
//! Raw article text is normalized once; every highlight is an offset range
//! into that normalized text. Ranges are persisted per article by
//! [`store::AnnotationStore`], turned into styled runs by [`render`], and
//! created from widget selections through [`selection`].

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod render;
pub mod selection;
pub mod store;
pub mod text;
