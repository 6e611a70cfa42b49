//! The material used to define Defeasible Logic Programs and their arguments.

mod argument;
pub use argument::Argument;

mod completion;
pub use completion::ArgumentCompletion;

mod derivation;

mod literal;
pub use literal::Atom;
pub use literal::Literal;
pub use literal::Term;

mod program;
pub use program::DefeasibleLogicProgram;

mod rule;
pub use rule::Rule;
pub use rule::RuleKind;

#[cfg(test)]
pub(crate) mod test_programs;
