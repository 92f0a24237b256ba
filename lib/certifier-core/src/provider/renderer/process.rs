use std::process::Stdio;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use super::Renderer;
use super::dto::{
    RenderBatchRequestDTO, RenderThumbnailRequestDTO, RenderedParticipantDTO,
    RenderedThumbnailDTO,
};
use super::error::RendererError;
use crate::config::core_config::RendererConfig;

const MAX_STDERR_LEN: usize = 4 * 1024;

/// Runs the compositor as a child process: one JSON request on stdin, one JSON response on stdout.
///
/// The child is killed when the returned future is dropped, so callers cancel a render by
/// applying a timeout around the call.
pub struct ProcessRenderer {
    command: String,
    args: Vec<String>,
}

impl ProcessRenderer {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            command: config.command.to_owned(),
            args: config.args.to_owned(),
        }
    }

    async fn invoke<Request, Response>(&self, request: &Request) -> Result<Response, RendererError>
    where
        Request: Serialize + Sync,
        Response: DeserializeOwned,
    {
        let input = serde_json::to_vec(request).map_err(RendererError::Request)?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(RendererError::Spawn)?;

        let (Some(mut stdin), Some(mut stdout), Some(mut stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(RendererError::Failed("missing renderer pipes".to_string()));
        };

        tracing::debug!(command = %self.command, size = input.len(), "Invoking renderer");

        // stdin is written while stdout is drained, large payloads would block otherwise
        let write = async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        };
        let read_stdout = async {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).await.map(|_| buf)
        };
        let read_stderr = async {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await.map(|_| buf)
        };

        let (written, output, errors, status) =
            tokio::join!(write, read_stdout, read_stderr, child.wait());

        let status = status?;
        if !status.success() {
            let errors = errors.unwrap_or_default();
            let stderr = String::from_utf8_lossy(&errors[..errors.len().min(MAX_STDERR_LEN)]);
            return Err(RendererError::Exit {
                status: status.to_string(),
                stderr: stderr.trim().to_owned(),
            });
        }
        written?;

        serde_json::from_slice(&output?).map_err(RendererError::Response)
    }
}

#[async_trait]
impl Renderer for ProcessRenderer {
    async fn render_batch(
        &self,
        request: RenderBatchRequestDTO,
    ) -> Result<Vec<RenderedParticipantDTO>, RendererError> {
        self.invoke(&request).await
    }

    async fn render_thumbnail(
        &self,
        request: RenderThumbnailRequestDTO,
    ) -> Result<RenderedThumbnailDTO, RendererError> {
        self.invoke(&request).await
    }
}
