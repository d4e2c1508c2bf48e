use formgate_derive::formgate_error;
use std::borrow::Cow;

#[formgate_error]
#[derive(Debug)]
pub enum PlanError {
    #[error("Tamper detected{}: {message}", format_context(.context))]
    Tamper { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unit-like failure")]
    Empty {},
}

fn main() {}
