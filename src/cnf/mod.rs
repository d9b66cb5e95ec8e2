pub mod formula;
pub mod simplify;
