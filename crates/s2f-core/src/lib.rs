pub mod convert;
pub mod domain;
pub mod serialization;
