//! The personal knowledge base.
//!
//! Notes are created with a generated ID, listed in full and deleted by ID.
//! Notes cannot be edited once created.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{KnowledgeBaseState, Note};
pub use create_endpoint::{create_item, create_item_endpoint};
pub use delete_endpoint::{delete_item, delete_item_endpoint};
pub use list_endpoint::{get_items, get_items_endpoint};
