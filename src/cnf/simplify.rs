use thiserror::Error;

use super::formula::{Clause, Formula, Lit, Var};

/// A variable is forced both ways: asserting a literal ran into a unit clause
/// of the opposite polarity, or two unit clauses disagree outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variable {var} is forced both true and false")]
pub struct Conflict {
    pub var: Var,
}

/// Asserts `lit` and returns the residual formula. Clauses containing the
/// literal are satisfied and dropped; opposite-polarity literals over the
/// same variable are stripped from the rest. A surviving unit clause over the
/// asserted variable is necessarily the opposite polarity and fails the whole
/// step. The input is never mutated.
pub fn simplify(formula: &Formula, lit: &Lit) -> Result<Formula, Conflict> {
    let mut clauses = Vec::with_capacity(formula.clause_count());

    for clause in formula.clauses() {
        if clause.contains(lit) {
            continue;
        }
        if clause.len() == 1 && clause[0].var == lit.var {
            return Err(Conflict {
                var: lit.var.clone(),
            });
        }
        let kept: Clause = clause
            .iter()
            .filter(|l| l.var != lit.var)
            .cloned()
            .collect();
        // a fully stripped clause stays behind empty; the solver fails the
        // branch on it
        clauses.push(kept);
    }

    Ok(Formula::from_clauses(clauses))
}
