// This file contains all the tools available in the toolkit.

#[cfg(feature = "python-interpreter")]
pub mod python_interpreter;

#[cfg(feature = "retrieval")]
pub mod retrieval;
