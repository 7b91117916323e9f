pub mod email;
pub mod error;
pub mod password;
pub mod person_name;
pub mod result;
pub mod token;
pub mod user;
