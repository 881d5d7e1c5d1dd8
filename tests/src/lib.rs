//! Integration tests for the discovery pipeline, run against in-memory
//! capability doubles.

#[cfg(test)]
mod doubles;

#[cfg(test)]
mod discovery;

#[cfg(test)]
mod stress;
