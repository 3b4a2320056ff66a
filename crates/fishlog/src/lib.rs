// Module structure for the fishlog crate.

// Core engine
pub mod parser;

// Presentation
pub mod report;

// Runtime
pub mod conf;
pub mod state;
pub mod runtime;
