//! Driving distance calculator server.
//!
//! A web application that answers: "how far is it to drive from these
//! postcodes to each of our agency locations, and how long will it take?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod orchestrator;
pub mod routing;
pub mod upload;
pub mod web;
