pub mod auth;
pub mod db;
pub mod serve;
pub mod user;
