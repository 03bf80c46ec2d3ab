pub mod simulated;
pub mod ui;
