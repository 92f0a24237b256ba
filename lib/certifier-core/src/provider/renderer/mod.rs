//! Boundary to the external certificate compositor.

use async_trait::async_trait;

pub mod dto;
pub mod error;
pub mod process;

use dto::{
    RenderBatchRequestDTO, RenderThumbnailRequestDTO, RenderedParticipantDTO,
    RenderedThumbnailDTO,
};
use error::RendererError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders one raster image per participant. Per-participant failures are reported in the
    /// result list, the error is reserved for failures of the whole invocation.
    async fn render_batch(
        &self,
        request: RenderBatchRequestDTO,
    ) -> Result<Vec<RenderedParticipantDTO>, RendererError>;

    async fn render_thumbnail(
        &self,
        request: RenderThumbnailRequestDTO,
    ) -> Result<RenderedThumbnailDTO, RendererError>;
}
