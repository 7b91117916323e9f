pub mod hashmap_verification_token_store;
pub mod in_memory_user_repository;
pub mod password_hashing;
pub mod postgres_user_repository;
pub mod redis_verification_token_store;

pub use hashmap_verification_token_store::HashMapVerificationTokenStore;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_user_repository::{MIGRATOR, PostgresUserRepository};
pub use redis_verification_token_store::RedisVerificationTokenStore;
