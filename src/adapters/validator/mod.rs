pub mod rules;

pub use rules::{AcceptAll, RuleValidator};
