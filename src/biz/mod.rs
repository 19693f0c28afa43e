pub mod lamaran;
