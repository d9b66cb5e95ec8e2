use std::fmt;

use indexmap::{IndexMap, IndexSet};

/// An opaque variable token. Scheduling encodings synthesize these from
/// student and room names; anything else may use arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(String);

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn into_name(self) -> String {
        self.0
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Var {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signed variable: `sign == true` means the variable must be true for the
/// literal to hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lit {
    pub var: Var,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: impl Into<Var>, sign: bool) -> Self {
        Self {
            var: var.into(),
            sign,
        }
    }

    pub fn neg(self) -> Self {
        Self {
            var: self.var,
            sign: !self.sign,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign {
            write!(f, "{}", self.var)
        } else {
            write!(f, "!{}", self.var)
        }
    }
}

/// A disjunction of literals. Zero literals means the clause is
/// unsatisfiable; exactly one makes it a unit clause forcing its literal.
pub type Clause = Vec<Lit>;

/// A partial or total truth assignment, in decision order.
pub type Assignment = IndexMap<Var, bool>;

/// A conjunction of clauses. Never mutated during search: every
/// simplification step allocates a fresh formula, so backtracking branches
/// stay independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(Vec::len).sum()
    }

    /// Distinct variables, in first-occurrence order.
    pub fn variables(&self) -> IndexSet<Var> {
        self.clauses
            .iter()
            .flatten()
            .map(|lit| lit.var.clone())
            .collect()
    }

    /// True iff every clause has a literal satisfied by `assignment`.
    /// Variables missing from the assignment read as false.
    pub fn eval(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|lit| assignment.get(&lit.var).copied().unwrap_or(false) == lit.sign)
        })
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}
