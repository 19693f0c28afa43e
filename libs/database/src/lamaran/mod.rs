pub mod lamaran_db_ops;
mod lamaran_storage;

pub use lamaran_storage::*;
