pub mod account;
pub mod api;
pub mod broadcast;
pub mod busy;
pub mod config;
pub mod factory;
pub mod mapper;
pub mod model;
pub mod msg;
pub mod proposals;
pub mod response;
pub mod transport;
pub mod utils;
pub mod validators;
pub mod wallet;
pub mod wire;

pub type Result<O> = anyhow::Result<O>;
