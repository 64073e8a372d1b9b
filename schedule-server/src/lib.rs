//! Schedule page server.
//!
//! Hosts the client-state logic of a transit route's schedule page: which
//! sub-view to render for a page component, the per-page-view UI store, and
//! keeping the store and the address bar in sync.

pub mod config;
pub mod domain;
pub mod loader;
pub mod pages;
pub mod schedule;
pub mod sessions;
pub mod store;
pub mod web;
