//! Command implementations

pub mod completions;
pub mod help_ini;
pub mod install_deps;
pub mod list;
