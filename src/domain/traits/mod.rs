mod repository;

pub use repository::DirectoryStore;
