use super::{Argument, DefeasibleLogicProgram, Literal};

pub(crate) fn lit(s: &str) -> Literal {
    Literal::try_from(s).unwrap()
}

pub(crate) fn tweety_program() -> DefeasibleLogicProgram {
    let mut program = DefeasibleLogicProgram::default();
    program.add_fact(lit("bird(tweety)")).unwrap();
    program.add_fact(lit("penguin(tweety)")).unwrap();
    program.add_strict_rule(lit("bird(X)"), vec![lit("penguin(X)")]);
    program.add_defeasible_rule(lit("flies(X)"), vec![lit("bird(X)")]);
    program.add_defeasible_rule(lit("~flies(X)"), vec![lit("penguin(X)")]);
    program.ground()
}

pub(crate) fn single_argument(program: &DefeasibleLogicProgram, conclusion: &str) -> Argument {
    let mut arguments = program.arguments_for(&lit(conclusion));
    assert_eq!(1, arguments.len(), "expected a single argument for {}", conclusion);
    arguments.remove(0)
}
