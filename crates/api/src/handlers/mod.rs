//! Request handlers, one module per resource group.

pub mod assets;
pub mod bulk;
pub mod catalog;
pub mod chat;
pub mod public;
pub mod tools;
