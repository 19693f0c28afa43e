pub mod validate;
pub mod writer;

pub use validate::validate_lamaran;
pub use writer::LamaranWriter;
