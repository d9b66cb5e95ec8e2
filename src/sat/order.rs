use std::cmp::Reverse;

use indexmap::{IndexMap, IndexSet};

use crate::cnf::formula::{Clause, Formula, Var};

/// Clause-reordering heuristics applied once before search. They only permute
/// clauses, so they steer which decision the solver tries first but can never
/// change the satisfiability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseOrder {
    ByLength,
    ByImpact,
}

impl ClauseOrder {
    pub fn apply(self, formula: &Formula) -> Formula {
        match self {
            ClauseOrder::ByLength => by_length(formula),
            ClauseOrder::ByImpact => by_impact(formula),
        }
    }
}

/// Stable sort ascending by literal count, so unit and short clauses come
/// first and propagate sooner.
pub fn by_length(formula: &Formula) -> Formula {
    let mut clauses = formula.clauses().to_vec();
    clauses.sort_by_key(Vec::len);
    Formula::from_clauses(clauses)
}

/// Stable sort descending by clause impact: the product of each literal's
/// variable's occurrence count across the whole formula. High-impact clauses
/// mention highly-connected variables, so branching on them prunes more.
pub fn by_impact(formula: &Formula) -> Formula {
    let counts = occurrence_counts(formula);
    let mut clauses = formula.clauses().to_vec();
    clauses.sort_by_key(|clause| Reverse(impact(clause, &counts)));
    Formula::from_clauses(clauses)
}

/// Number of clauses mentioning each variable in either polarity, counted
/// once per clause.
fn occurrence_counts(formula: &Formula) -> IndexMap<Var, u64> {
    let mut counts: IndexMap<Var, u64> = IndexMap::new();
    for clause in formula.clauses() {
        let vars: IndexSet<&Var> = clause.iter().map(|lit| &lit.var).collect();
        for var in vars {
            *counts.entry(var.clone()).or_insert(0) += 1;
        }
    }
    counts
}

fn impact(clause: &Clause, counts: &IndexMap<Var, u64>) -> u64 {
    clause.iter().fold(1u64, |acc, lit| {
        acc.saturating_mul(counts.get(&lit.var).copied().unwrap_or(0))
    })
}
