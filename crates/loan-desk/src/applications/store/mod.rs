//! Concrete `ApplicationRepository` backends.

mod json_file;
mod memory;

pub use json_file::JsonFileApplicationRepository;
pub use memory::InMemoryApplicationRepository;
