//! Press Server
//!
//! Authorization core of a self-hosted publishing platform: role hierarchy
//! checks combined with the capabilities installed apps declare.

pub mod apps;
pub mod authorizer;
pub mod config;
pub mod db;
pub mod observability;
pub mod permissions;
