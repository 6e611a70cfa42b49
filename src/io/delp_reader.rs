use super::{warning_result::WarningResult, ProgramReader, WarningHandler};
use crate::delp::{DefeasibleLogicProgram, Literal, Rule, RuleKind};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

lazy_static! {
    static ref RULE_PATTERN: Regex = Regex::new(r"^\s*([^<-]+?)\s*(<-|-<)\s*(.*?)\s*$").unwrap();
}

enum Statement {
    Fact(Literal),
    Rule(Rule),
}

fn split_body(body: &str) -> Result<Vec<&str>> {
    let mut parts = vec![];
    let mut depth = 0;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Err(anyhow!("unbalanced parentheses")),
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(anyhow!("unbalanced parentheses"));
    }
    parts.push(&body[start..]);
    Ok(parts)
}

fn read_rule(head: &str, arrow: &str, body: &str) -> Result<WarningResult<Statement, String>> {
    let head = Literal::try_from(head)?;
    let body = if body.trim().is_empty() {
        vec![]
    } else {
        split_body(body)?
            .into_iter()
            .map(Literal::try_from)
            .collect::<Result<Vec<Literal>>>()?
    };
    let kind = if arrow == "<-" {
        RuleKind::Strict
    } else {
        RuleKind::Defeasible
    };
    if kind == RuleKind::Strict && body.is_empty() {
        return Err(anyhow!(
            "strict rules must have a body; facts are written without arrow"
        ));
    }
    let mut warnings = vec![];
    if body.contains(&head) {
        warnings.push(format!("rule for {} depends on its own conclusion", head));
    }
    let rule = Rule::new(head, body, kind);
    Ok(WarningResult::with_warnings(rule, warnings).map(Statement::Rule))
}

fn read_statement(statement: &str) -> Result<WarningResult<Statement, String>> {
    let context = || format!(r#"while reading statement "{}""#, statement.trim());
    match RULE_PATTERN.captures(statement) {
        Some(c) => {
            let group = |i| c.get(i).map(|m| m.as_str()).unwrap_or_default();
            read_rule(group(1), group(2), group(3)).with_context(context)
        }
        None => Literal::try_from(statement)
            .map(|l| WarningResult::Ok(Statement::Fact(l)))
            .with_context(context),
    }
}

/// A reader for defeasible logic programs written in a Prolog-like syntax.
///
/// # Program format
///
/// A program is a sequence of statements, each of them ending with a dot.
/// Statements may span several lines, and a line may contain several statements.
/// Everything following a `%` on a line is a comment.
///
/// Statements are either facts (a ground literal), strict rules (with the `<-` arrow) or defeasible rules (with the `-<` arrow).
/// Rule bodies are comma-separated lists of literals; defeasible rules may have an empty body.
/// Negated literals are prefixed by a `~`, and identifiers beginning with an uppercase letter or an underscore are variables.
///
/// ```text
/// % Tweety is a penguin
/// bird(tweety).
/// penguin(tweety).
/// bird(X) <- penguin(X).
/// flies(X) -< bird(X).
/// ~flies(X) -< penguin(X).
/// ```
///
/// Statements occurring more than once raise warnings.
///
/// # Example
///
/// ```
/// # use crudelp::delp::DefeasibleLogicProgram;
/// # use crudelp::io::{DelpReader, ProgramReader};
/// fn read_program_from_str(s: &str) -> DefeasibleLogicProgram {
///     let reader = DelpReader::default();
///     reader.read(&mut s.as_bytes()).expect("invalid program")
/// }
/// let program = read_program_from_str("bird(tweety). flies(X) -< bird(X).");
/// assert_eq!(1, program.n_facts());
/// assert_eq!(1, program.n_defeasible_rules());
/// ```
#[derive(Default)]
pub struct DelpReader {
    warning_handlers: Vec<WarningHandler>,
}

impl DelpReader {
    fn warn(&self, line: usize, warning: &str) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(line, warning.to_string()));
    }
}

impl ProgramReader for DelpReader {
    fn read(&self, reader: &mut dyn Read) -> Result<DefeasibleLogicProgram> {
        let mut program = DefeasibleLogicProgram::default();
        let mut pending = String::new();
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line {}", i + 1);
            let l = line.with_context(context)?;
            let content = l.split('%').next().unwrap_or_default();
            let mut parts = content.split('.').collect::<Vec<&str>>();
            let unterminated = parts.pop().unwrap_or_default();
            for part in parts {
                pending.push_str(part);
                let statement = std::mem::take(&mut pending);
                if statement.trim().is_empty() {
                    return Err(anyhow!("empty statement")).with_context(context);
                }
                let is_new = match read_statement(&statement)
                    .with_context(context)?
                    .consume_warnings(|warnings| warnings.iter().for_each(|w| self.warn(i + 1, w)))
                {
                    Statement::Fact(f) => program.add_fact(f).with_context(context)?,
                    Statement::Rule(r) => program.add_rule(r),
                };
                if !is_new {
                    self.warn(
                        i + 1,
                        &format!(r#"duplicated statement "{}""#, statement.trim()),
                    );
                }
            }
            pending.push_str(unterminated);
            pending.push(' ');
        }
        if !pending.trim().is_empty() {
            return Err(anyhow!(
                r#"missing dot at the end of statement "{}""#,
                pending.trim()
            ));
        }
        Ok(program)
    }

    fn read_literal_from_str(&self, literal: &str) -> Result<Literal> {
        Literal::try_from(literal)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    fn lit(s: &str) -> Literal {
        Literal::try_from(s).unwrap()
    }

    fn read_with_warnings(instance: &str) -> (Result<DefeasibleLogicProgram>, Vec<(usize, String)>) {
        let warnings = Rc::new(RefCell::new(vec![]));
        let mut reader = DelpReader::default();
        let handler_warnings = Rc::clone(&warnings);
        reader.add_warning_handler(Box::new(move |line, w| {
            handler_warnings.borrow_mut().push((line, w))
        }));
        let result = reader.read(&mut instance.as_bytes());
        let collected = warnings.borrow().clone();
        (result, collected)
    }

    #[test]
    fn test_read_tweety() {
        let instance = r#"
        % Tweety is a penguin
        bird(tweety).
        penguin(tweety).
        bird(X) <- penguin(X).
        flies(X) -< bird(X).
        ~flies(X) -< penguin(X). % penguins do not fly
        "#;
        let (result, warnings) = read_with_warnings(instance);
        let program = result.unwrap();
        assert!(warnings.is_empty());
        assert_eq!(2, program.n_facts());
        assert_eq!(1, program.n_strict_rules());
        assert_eq!(2, program.n_defeasible_rules());
        assert!(program.contains_fact(&lit("penguin(tweety)")));
        assert!(program
            .defeasible_rules()
            .contains(&Rule::new_defeasible(lit("~flies(X)"), vec![lit("penguin(X)")])));
    }

    #[test]
    fn test_read_several_statements_per_line() {
        let program = DelpReader::default()
            .read(&mut "a. b -< a. c <- a, b.".as_bytes())
            .unwrap();
        assert_eq!(1, program.n_facts());
        assert_eq!(1, program.n_defeasible_rules());
        assert_eq!(1, program.n_strict_rules());
    }

    #[test]
    fn test_read_statement_on_several_lines() {
        let instance = "p(X) -<\n  q(X, Y),\n  r(Y).\n";
        let program = DelpReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        let rule = program.defeasible_rules().iter().next().unwrap();
        assert_eq!(&lit("p(X)"), rule.head());
        assert_eq!(&[lit("q(X,Y)"), lit("r(Y)")], rule.body());
    }

    #[test]
    fn test_read_presumption() {
        let program = DelpReader::default()
            .read(&mut "a -< .".as_bytes())
            .unwrap();
        let rule = program.defeasible_rules().iter().next().unwrap();
        assert!(rule.body().is_empty());
    }

    #[test]
    fn test_empty_program() {
        let program = DelpReader::default()
            .read(&mut "\n  % nothing here\n".as_bytes())
            .unwrap();
        assert_eq!(DefeasibleLogicProgram::default(), program);
    }

    #[test]
    fn test_duplicated_statement() {
        let (result, warnings) = read_with_warnings("a.\nb -< a.\nb -< a.\n");
        assert_eq!(1, result.unwrap().n_defeasible_rules());
        assert_eq!(1, warnings.len());
        assert_eq!(3, warnings[0].0);
    }

    #[test]
    fn test_self_dependent_rule() {
        let (result, warnings) = read_with_warnings("a -< a, b.");
        assert!(result.is_ok());
        assert_eq!(1, warnings.len());
        assert_eq!(1, warnings[0].0);
    }

    #[test]
    fn test_missing_dot() {
        assert!(DelpReader::default()
            .read(&mut "a.\nb -< a\n".as_bytes())
            .is_err());
    }

    #[test]
    fn test_empty_statement() {
        assert!(DelpReader::default().read(&mut "a..".as_bytes()).is_err());
    }

    #[test]
    fn test_non_ground_fact() {
        assert!(DelpReader::default()
            .read(&mut "bird(X).".as_bytes())
            .is_err());
    }

    #[test]
    fn test_strict_rule_without_body() {
        assert!(DelpReader::default().read(&mut "a <- .".as_bytes()).is_err());
    }

    #[test]
    fn test_syntax_errors() {
        for instance in ["Bird(tweety).", "a -< b(.", "a -< b), c(.", "a <- -< b.", "a b."] {
            assert!(
                DelpReader::default().read(&mut instance.as_bytes()).is_err(),
                "{}",
                instance
            );
        }
    }

    #[test]
    fn test_split_body() {
        assert_eq!(vec!["a", " b(X,Y)", " c"], split_body("a, b(X,Y), c").unwrap());
        assert!(split_body("a(b").is_err());
        assert!(split_body("a)b(").is_err());
    }

    #[test]
    fn test_read_literal_from_str() {
        let reader = DelpReader::default();
        assert_eq!(lit("~flies(tweety)"), reader.read_literal_from_str("~flies(tweety)").unwrap());
        assert!(reader.read_literal_from_str("flies(").is_err());
    }
}
