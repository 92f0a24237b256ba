use thiserror::Error;

pub mod core_config;

#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("Config parsing error: `{0}`")]
    GeneralParsingError(String),
}

#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Invalid key material in `{key}`: {reason}")]
    InvalidKey { key: &'static str, reason: String },
    #[error("Invalid value of `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[cfg(test)]
mod test;
