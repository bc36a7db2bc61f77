use georef_derive::georef_error;
use std::borrow::Cow;

#[georef_error]
#[derive(Clone)]
pub enum DemoError {
    #[error("Not found{}: {code}", format_context(.context))]
    NotFound { code: i32, context: Option<Cow<'static, str>> },

    #[error("Cycle: {path}")]
    Cycle { path: String },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = DemoError::NotFound { code: 1, context: None };
    let _copy = err.clone();
}
