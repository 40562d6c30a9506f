pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            OverlayError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            OverlayError::encode("x")
                .to_string()
                .contains("encode error:")
        );
        assert!(
            OverlayError::invalid_config("x")
                .to_string()
                .contains("invalid config:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = OverlayError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
