pub mod dto;
pub mod response;

#[cfg(feature = "cloud")]
mod response_actix;
