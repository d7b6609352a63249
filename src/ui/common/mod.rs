//! Common reusable UI components

pub mod spinner;

pub use spinner::{ModelLoading, Spinner};
