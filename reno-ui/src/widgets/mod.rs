pub mod whole_number;

pub use whole_number::whole_number_field;
