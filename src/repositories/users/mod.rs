pub mod user_store;
pub mod user_repo;
pub mod memory_user_repo;

pub use user_store::UserStore;
pub use user_repo::UserRepository;
pub use memory_user_repo::InMemoryUserRepository;
