mod flow;
mod helpers;
mod login;
mod signup;
