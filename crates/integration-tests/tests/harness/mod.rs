#![allow(dead_code)]

pub mod config;
pub mod mock_zai;
pub mod server;
