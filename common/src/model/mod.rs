pub mod average;
pub mod module;
pub mod professor;
