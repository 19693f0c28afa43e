pub mod health;
pub mod lamaran;

pub use health::health_scope;
pub use lamaran::lamaran_scope;
