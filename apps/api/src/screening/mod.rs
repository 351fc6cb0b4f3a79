pub mod fields;
pub mod generator;
pub mod handlers;
pub mod questions;
pub mod record;
pub mod registry;
pub mod session;
pub mod stack;
pub mod walker;
