pub mod agent;
pub mod config;
pub mod env;
pub mod game;
pub mod helper;
pub mod model;
pub mod session;
