use anyhow::{bail, Result};
use indexmap::{IndexMap, IndexSet};

use crate::cnf::formula::{Assignment, Clause, Formula, Lit, Var};

/// Joins student and room names into occupancy variable names. Must not
/// appear in any input name, or `decode_var` becomes ambiguous.
pub const SEPARATOR: char = '_';

/// The occupancy variable for one (student, room) pair; true means that
/// student sits in that room.
pub fn occupancy_var(student: &str, room: &str) -> Var {
    Var::new(format!("{student}{SEPARATOR}{room}"))
}

/// Recovers the (student, room) pair from an occupancy variable name.
pub fn decode_var(var: &Var) -> Option<(&str, &str)> {
    var.name().split_once(SEPARATOR)
}

/// Reads a solved model back into a student -> room placement, from the
/// occupancy variables assigned true.
pub fn decode_assignment(model: &Assignment) -> IndexMap<&str, &str> {
    model
        .iter()
        .filter(|(_, &value)| value)
        .filter_map(|(var, _)| decode_var(var))
        .collect()
}

/// Compiles a scheduling problem into CNF: each student needs at least one
/// of their acceptable rooms, sits in at most one room, and no room takes
/// more students than its capacity. Satisfying assignments of the result
/// correspond exactly to valid schedules.
///
/// Degenerate inputs (a student with no acceptable rooms, a zero capacity)
/// are not rejected; they encode to an unsatisfiable formula, which is the
/// correct representation of an impossible instance.
pub fn boolify_scheduling_problem(
    preferences: &IndexMap<String, IndexSet<String>>,
    capacities: &IndexMap<String, usize>,
) -> Result<Formula> {
    for name in preferences.keys().chain(capacities.keys()) {
        if name.contains(SEPARATOR) {
            bail!("name {name:?} contains the reserved separator {SEPARATOR:?}");
        }
    }

    let students: Vec<&str> = preferences.keys().map(String::as_str).collect();
    let rooms: Vec<&str> = capacities.keys().map(String::as_str).collect();

    let mut formula = Formula::new();

    // each student gets at least one acceptable room
    for (student, acceptable) in preferences {
        let clause: Clause = acceptable
            .iter()
            .map(|room| Lit::new(occupancy_var(student, room), true))
            .collect();
        formula.add_clause(clause);
    }

    // each student sits in at most one room: forbid every pair
    for student in &students {
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                formula.add_clause(vec![
                    Lit::new(occupancy_var(student, a), false),
                    Lit::new(occupancy_var(student, b), false),
                ]);
            }
        }
    }

    // room capacity K: forbid every (K+1)-subset of students; rooms that fit
    // everyone produce nothing
    for (room, &capacity) in capacities {
        if capacity >= students.len() {
            continue;
        }
        for subset in subsets(&students, capacity + 1) {
            let clause: Clause = subset
                .iter()
                .map(|student| Lit::new(occupancy_var(student, room), false))
                .collect();
            formula.add_clause(clause);
        }
    }

    Ok(formula)
}

/// All k-element subsets of `items`, in lexicographic index order.
fn subsets<'a>(items: &[&'a str], k: usize) -> Vec<Vec<&'a str>> {
    if k > items.len() {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(indices.iter().map(|&i| items[i]).collect());
        // advance the rightmost index that still has room
        let Some(pos) = (0..k).rev().find(|&i| indices[i] < items.len() - k + i) else {
            return out;
        };
        indices[pos] += 1;
        for i in pos + 1..k {
            indices[i] = indices[i - 1] + 1;
        }
    }
}
