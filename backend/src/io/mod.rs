//! IO layer: the interfaces through which the outside world reaches the domain.

pub mod rest;

pub use rest::*;
