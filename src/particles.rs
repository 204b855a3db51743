pub mod import;
pub mod placement;
