//! SAT decision engine over string-named variables, plus a CNF compiler for
//! room-scheduling problems (students with acceptable-room sets, rooms with
//! capacities).

pub mod cnf;
pub mod sat;
pub mod schedule;

pub use cnf::formula::{Assignment, Clause, Formula, Lit, Var};
pub use sat::dpll::{satisfying_assignment, solve, SatResult};
pub use schedule::encode::boolify_scheduling_problem;
