pub mod scenarios;
pub mod session;
