//! Crudelp is a Defeasible Logic Programming (DeLP) reasoner.
//!
//! Programs are made of facts, strict rules and defeasible rules (see [delp]).
//! Their arguments are compared with a criterion (see [comparators]),
//! and the warrant of a literal is decided by building dialectical trees (see [reasoner]).

#![warn(missing_docs)]

pub mod comparators;

pub mod delp;

pub mod io;

pub mod reasoner;
