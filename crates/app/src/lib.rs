//! Forchetta application domain, persistence and client cart model.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod settings;
pub mod store;

#[cfg(test)]
mod test;

mod uuids;
