//! Meal Handlers

pub(crate) mod common;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod delete_scoped;
pub(crate) mod get;
pub(crate) mod import;
pub(crate) mod index;
pub(crate) mod update;
