mod mem_store;
mod test_server;

pub use mem_store::*;
pub use test_server::*;
