pub mod help;
pub mod history;
pub mod main;
pub mod settings;
