pub mod connection;
pub mod lamaran;
pub mod pg_row;
