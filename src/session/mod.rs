pub mod export;
pub mod manager;
