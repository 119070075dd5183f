//! roomgrid library
//!
//! Data and persistence core of an indoor room-plan editor: a 3-D grid of
//! fixed-size segments carrying materials and multilingual content, the
//! tab-separated text codec that saves and restores the grid, and the
//! magic-headered zip container that packs a whole project directory into
//! a single distributable file.

pub mod config;
pub mod constants;
pub mod error;
pub mod files;
pub mod models;
pub mod parser;
pub mod services;
