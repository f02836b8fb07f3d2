mod expander;

pub use expander::PathExpander;
