pub mod document;
pub mod placement;
pub mod screens;
pub mod signature;
