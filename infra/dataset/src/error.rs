use std::borrow::Cow;

/// A specialized [`DatasetError`] enum of this crate.
#[georef_derive::georef_error]
pub enum DatasetError {
    /// The dataset root directory does not exist or is not a directory.
    #[error("Dataset directory not found{}: {message}", format_context(.context))]
    DirectoryNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No resource file exists for the requested authority and resource name.
    #[error("Dataset resource not found{}: {message}", format_context(.context))]
    ResourceNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A resource or authority name tried to escape the dataset root.
    #[error("Path traversal security violation{}: {message}", format_context(.context))]
    PathTraversalAttempt { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// A compressed resource declares a size its payload cannot hold.
    #[error("Corrupt compressed payload{}: {message}", format_context(.context))]
    CorruptPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Decompression failure{}: {source}", format_context(.context))]
    Decompress { source: lz4_flex::block::DecompressError, context: Option<Cow<'static, str>> },

    /// The resource is not valid UTF-8 text.
    #[error("Dataset encoding failure{}: {source}", format_context(.context))]
    Encoding { source: std::string::FromUtf8Error, context: Option<Cow<'static, str>> },
}
