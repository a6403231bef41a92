mod validation;

pub use validation::check_null_or_scalar;
