use indexmap::IndexMap;

use crate::cnf::formula::{Assignment, Formula, Lit};
use crate::cnf::simplify::simplify;
use crate::sat::precheck::check_contradiction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    Sat(Assignment),
    Unsat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub propagations: usize,
    pub decisions: usize,
    pub conflicts: usize,
}

/// One step of the search trail. Forced literals come from unit propagation
/// and are derived facts: when the branch below them fails they pop without
/// trying the opposite polarity. Decisions keep the pre-branch formula so
/// backtracking can retry the flip from it.
enum Step {
    Forced(Lit),
    Decision {
        parent: Formula,
        lit: Lit,
        flipped: bool,
    },
}

impl Step {
    fn lit(&self) -> &Lit {
        match self {
            Step::Forced(lit) => lit,
            Step::Decision { lit, .. } => lit,
        }
    }
}

pub fn solve(formula: &Formula) -> SatResult {
    solve_with_stats(formula).0
}

pub fn is_sat(formula: &Formula) -> bool {
    matches!(solve(formula), SatResult::Sat(_))
}

pub fn solve_model(formula: &Formula) -> Option<Assignment> {
    match solve(formula) {
        SatResult::Sat(model) => Some(model),
        SatResult::Unsat => None,
    }
}

pub fn solve_with_stats(formula: &Formula) -> (SatResult, SolveStats) {
    let mut stats = SolveStats::default();
    let result = match search(formula, &mut stats) {
        Some(mut model) => {
            // variables whose clauses were all satisfied along the way still
            // get a value
            for var in formula.variables() {
                model.entry(var).or_insert(false);
            }
            SatResult::Sat(model)
        }
        None => SatResult::Unsat,
    };
    (result, stats)
}

/// Finds a satisfying assignment for a formula given as (variable-name,
/// polarity) pairs, mapping every mentioned variable to a value. `None`
/// means no assignment exists; the empty formula yields `Some` of the empty
/// map.
pub fn satisfying_assignment(clauses: &[Vec<(String, bool)>]) -> Option<IndexMap<String, bool>> {
    let formula: Formula = clauses
        .iter()
        .map(|clause| {
            clause
                .iter()
                .map(|(name, sign)| Lit::new(name.clone(), *sign))
                .collect()
        })
        .collect();
    solve_model(&formula).map(|model| {
        model
            .into_iter()
            .map(|(var, value)| (var.into_name(), value))
            .collect()
    })
}

/// Depth-first search over an explicit choice-point trail. Each iteration
/// handles one node: conflict check, then unit propagation, then a
/// two-polarity decision on the variable of the first literal of the first
/// clause. The trail replaces call-stack recursion, so search depth is
/// bounded by the variable count without growing the call stack.
fn search(root: &Formula, stats: &mut SolveStats) -> Option<Assignment> {
    let mut formula = root.clone();
    let mut trail: Vec<Step> = Vec::new();

    loop {
        let dead = check_contradiction(&formula).is_err()
            || formula.clauses().iter().any(|clause| clause.is_empty());
        if dead {
            stats.conflicts += 1;
            if !backtrack(&mut formula, &mut trail, stats) {
                return None;
            }
            continue;
        }

        if formula.clause_count() == 0 {
            // each simplification eliminated its asserted variable entirely,
            // so trail variables are distinct
            return Some(
                trail
                    .iter()
                    .map(|step| {
                        let lit = step.lit();
                        (lit.var.clone(), lit.sign)
                    })
                    .collect(),
            );
        }

        if let Some(lit) = first_unit(&formula) {
            match simplify(&formula, &lit) {
                Ok(reduced) => {
                    stats.propagations += 1;
                    formula = reduced;
                    trail.push(Step::Forced(lit));
                }
                Err(_) => {
                    stats.conflicts += 1;
                    if !backtrack(&mut formula, &mut trail, stats) {
                        return None;
                    }
                }
            }
            continue;
        }

        stats.decisions += 1;
        let var = formula.clauses()[0][0].var.clone();
        let entered = branch(&mut formula, &mut trail, Lit::new(var.clone(), true), false)
            || branch(&mut formula, &mut trail, Lit::new(var, false), true);
        if !entered {
            stats.conflicts += 1;
            if !backtrack(&mut formula, &mut trail, stats) {
                return None;
            }
        }
    }
}

fn first_unit(formula: &Formula) -> Option<Lit> {
    formula
        .clauses()
        .iter()
        .find_map(|clause| match clause.as_slice() {
            [lit] => Some(lit.clone()),
            _ => None,
        })
}

/// Asserts a decision literal against the current formula. On success the
/// residual becomes current and the pre-branch formula moves onto the trail.
fn branch(formula: &mut Formula, trail: &mut Vec<Step>, lit: Lit, flipped: bool) -> bool {
    match simplify(formula, &lit) {
        Ok(reduced) => {
            let parent = std::mem::replace(formula, reduced);
            trail.push(Step::Decision {
                parent,
                lit,
                flipped,
            });
            true
        }
        Err(_) => false,
    }
}

/// Pops the trail to the nearest decision whose second polarity is untried
/// and re-enters there. Returns false once the trail is exhausted, meaning
/// the whole formula is unsatisfiable.
fn backtrack(formula: &mut Formula, trail: &mut Vec<Step>, stats: &mut SolveStats) -> bool {
    while let Some(step) = trail.pop() {
        if let Step::Decision {
            parent,
            lit,
            flipped: false,
        } = step
        {
            *formula = parent;
            if branch(formula, trail, lit.neg(), true) {
                return true;
            }
            stats.conflicts += 1;
        }
    }
    false
}
