//! Client side: driver capability traits and the repository façade over them.
mod driver;
mod repository;

pub use driver::{AsyncDocumentDriver, DocumentDriver, Entity, FindOptions};
pub use repository::Repository;
