pub mod current_user;
pub mod login;
pub mod logout;
pub mod signup;
pub mod verify_email;

#[cfg(test)]
mod test_support;
