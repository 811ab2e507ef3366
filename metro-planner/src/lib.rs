//! Inter-city metro trip planner.
//!
//! A web application that answers: "If I leave station X at this time,
//! which way do I go to reach station Y, and when will I get there?"

pub mod config;
pub mod domain;
pub mod planner;
pub mod web;
