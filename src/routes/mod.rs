pub mod classify;
pub mod health;
pub mod pages;
pub mod permissions;
