use thiserror::Error;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to spawn renderer: `{0}`")]
    Spawn(std::io::Error),

    #[error("Renderer IO error: `{0}`")]
    Io(#[from] std::io::Error),

    #[error("Renderer exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("Failed to serialize render request: `{0}`")]
    Request(serde_json::Error),

    #[error("Unparsable renderer response: `{0}`")]
    Response(serde_json::Error),

    #[error("Renderer failed: {0}")]
    Failed(String),
}
