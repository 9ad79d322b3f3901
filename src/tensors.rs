//! Dense linear algebra over rings: rational solving and
//! integer lattices in Hermite normal form.

pub mod matrix;
