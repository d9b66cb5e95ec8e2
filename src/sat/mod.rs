pub mod dpll;
pub mod order;
pub mod precheck;
