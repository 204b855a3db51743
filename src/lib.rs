pub mod archive;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod geometry;
pub mod particles;
pub mod state;
