mod controller_errors;
mod validation_errors;

pub use controller_errors::*;
pub use validation_errors::*;
