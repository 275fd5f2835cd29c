mod health_check;
mod submit_form;

pub use health_check::*;
pub use submit_form::*;
