pub mod activate;
pub mod compile;
pub mod completions;
pub mod schema;
pub mod script;
