pub mod health_dto;
pub mod lamaran_dto;
