//! Metro route planner server.
//!
//! Loads the station connection table into an immutable graph and answers
//! "what is the quickest way from this station to that one?", counting a
//! fixed penalty for every change of line.

pub mod cache;
pub mod config;
pub mod domain;
pub mod engine;
pub mod graph;
pub mod planner;
pub mod source;
pub mod web;
