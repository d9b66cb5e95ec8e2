use indexmap::IndexMap;

use crate::cnf::formula::{Formula, Var};
use crate::cnf::simplify::Conflict;

/// Scans unit clauses for a pair forcing one variable both ways. A cheap
/// pre-filter run at each search node; conflicts that only appear after
/// propagation are still caught by the simplifier.
pub fn check_contradiction(formula: &Formula) -> Result<(), Conflict> {
    let mut forced: IndexMap<&Var, bool> = IndexMap::new();

    for clause in formula.clauses() {
        if let [lit] = clause.as_slice() {
            match forced.get(&lit.var) {
                Some(&sign) if sign != lit.sign => {
                    return Err(Conflict {
                        var: lit.var.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    forced.insert(&lit.var, lit.sign);
                }
            }
        }
    }

    Ok(())
}
