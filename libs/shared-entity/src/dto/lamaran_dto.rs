pub use database_entity::dto::{AFLamaran, LamaranParams};

pub const LAMARAN_SAVED_MESSAGE: &str = "Lamaran berhasil disimpan!";
