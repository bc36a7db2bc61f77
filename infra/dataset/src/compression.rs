use crate::error::{DatasetError, DatasetErrorExt};

const PLAIN_EXTENSION: &str = "txt";
const LZ4_EXTENSION: &str = "txt.lz4";
/// Upper bound of the LZ4 block expansion ratio; a larger declared size is corrupt.
const LZ4_MAX_RATIO: usize = 255;
const SIZE_PREFIX: usize = 4;

/// On-disk encoding of resource files.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    /// LZ4 block format with the uncompressed size prepended (`lz4_flex::compress_prepend_size`).
    Lz4,
}

impl Compression {
    /// File name of `resource` under this encoding, e.g. `Datum.txt.lz4`.
    #[must_use]
    pub fn file_name(self, resource: &str) -> String {
        match self {
            Self::None => format!("{resource}.{PLAIN_EXTENSION}"),
            Self::Lz4 => format!("{resource}.{LZ4_EXTENSION}"),
        }
    }

    /// Encodes plain text the way [`Compression::decode`] expects it.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::None => text.as_bytes().to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(text.as_bytes()),
        }
    }

    /// Decodes raw file bytes into UTF-8 text.
    ///
    /// # Errors
    /// [`DatasetError::CorruptPayload`] when the size prefix is missing or exceeds what
    /// the payload can expand to, [`DatasetError::Decompress`] for other corrupt LZ4
    /// input and [`DatasetError::Encoding`] when the payload is not UTF-8.
    pub fn decode(self, data: Vec<u8>) -> Result<String, DatasetError> {
        let bytes = match self {
            Self::None => data,
            Self::Lz4 => {
                check_declared_size(&data)?;
                lz4_flex::decompress_size_prepended(&data).context("Lz4 decompression failed")?
            },
        };
        Ok(String::from_utf8(bytes)?)
    }
}

fn check_declared_size(data: &[u8]) -> Result<(), DatasetError> {
    let Some((prefix, payload)) = data.split_first_chunk::<SIZE_PREFIX>() else {
        return Err(DatasetError::CorruptPayload { message: "missing size prefix".into(), context: None });
    };
    let declared = u32::from_le_bytes(*prefix) as usize;
    let limit = payload.len().saturating_mul(LZ4_MAX_RATIO);
    if declared > limit {
        return Err(DatasetError::CorruptPayload {
            message: format!("declared size {declared} exceeds {limit} for a {} byte payload", payload.len()).into(),
            context: None,
        });
    }
    Ok(())
}
