use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("filename contains a double quote and cannot be passed on: {0}")]
    UnquotableFilename(String),

    #[error("launcher manifest is not valid TOML: {0}")]
    ManifestSyntax(#[from] toml::de::Error),

    #[error("launcher manifest rejected: {0}")]
    ManifestInvalid(String),
}
