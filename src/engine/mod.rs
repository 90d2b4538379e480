mod async_engine;

pub use async_engine::AsyncEngine;
