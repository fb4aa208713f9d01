//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::MemoryPhoneRepository;
pub use postgres::PgPhoneRepository;
