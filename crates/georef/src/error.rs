use georef_dataset::DatasetError;
use georef_reference::ReferenceError;
use std::borrow::Cow;

#[georef_derive::georef_error]
pub enum ContextError {
    #[error("Dataset unavailable{}: {source}", format_context(.context))]
    Dataset { source: DatasetError, context: Option<Cow<'static, str>> },

    #[error("Warm-up failed{}: {source}", format_context(.context))]
    Reference { source: ReferenceError, context: Option<Cow<'static, str>> },
}
