//! Single-page PDF packaging of rendered certificates.

use std::io::Cursor;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub mod signer;

use signer::PdfSigner;

const JPEG_QUALITY: u8 = 90;
const IMAGE_NAME: &str = "Im0";
const PRODUCER: &str = "certifier";

pub const INFO_SIGNATURE: &str = "CertifierSignature";
pub const INFO_PUBLIC_KEY: &str = "CertifierPublicKey";
pub const INFO_SIGNED_AT: &str = "CertifierSignedAt";
pub const INFO_SIGNATURE_ALGORITHM: &str = "CertifierSignatureAlgorithm";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Image error: `{0}`")]
    Image(#[from] image::ImageError),
    #[error("PDF error: `{0}`")]
    Pdf(#[from] lopdf::Error),
    #[error("Empty image")]
    EmptyImage,
}

/// JPEG re-encoded raster with its pixel dimensions
pub struct JpegImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn to_jpeg(image: &[u8]) -> Result<JpegImage, PdfError> {
    let rgb = image::load_from_memory(image)?.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(PdfError::EmptyImage);
    }

    let mut data = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        Cursor::new(&mut data),
        JPEG_QUALITY,
    ))?;

    Ok(JpegImage {
        data,
        width: rgb.width(),
        height: rgb.height(),
    })
}

#[derive(Clone)]
pub struct PdfPackager {
    signer: Option<Arc<dyn PdfSigner>>,
}

impl PdfPackager {
    pub fn new(signer: Option<Arc<dyn PdfSigner>>) -> Self {
        Self { signer }
    }

    /// Wraps the raster into a PDF page of the same size, signing the embedded image when a
    /// signer is configured.
    pub fn package(&self, image: &[u8]) -> Result<Vec<u8>, PdfError> {
        let jpeg = to_jpeg(image)?;
        let mut info = dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        };
        if let Ok(now) = OffsetDateTime::now_utc().format(&Rfc3339) {
            info.set("CreationDate", Object::string_literal(now));
        }

        if let Some(signer) = &self.signer {
            match signer.sign(&jpeg.data) {
                Ok(signature) => {
                    info.set(INFO_SIGNATURE, Object::string_literal(hex::encode(signature)));
                    info.set(
                        INFO_PUBLIC_KEY,
                        Object::string_literal(hex::encode(signer.public_key())),
                    );
                    info.set(
                        INFO_SIGNATURE_ALGORITHM,
                        Object::string_literal(signer.algorithm()),
                    );
                    if let Ok(now) = OffsetDateTime::now_utc().format(&Rfc3339) {
                        info.set(INFO_SIGNED_AT, Object::string_literal(now));
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "Failed to sign PDF, continuing unsigned");
                }
            }
        }

        compose(jpeg, info)
    }
}

fn compose(jpeg: JpegImage, info: Dictionary) -> Result<Vec<u8>, PdfError> {
    let width = jpeg.width;
    let height = jpeg.height;

    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let image_id = document.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg.data,
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![IMAGE_NAME.into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = document.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });

    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = document.add_object(info);
    document.trailer.set("Root", catalog_id);
    document.trailer.set("Info", info_id);

    let mut pdf = Vec::new();
    document.save_to(&mut pdf).map_err(lopdf::Error::from)?;
    Ok(pdf)
}

#[cfg(test)]
mod test;
