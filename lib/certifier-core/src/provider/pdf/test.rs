use std::io::Cursor;
use std::sync::Arc;

use certifier_crypto::signer::eddsa::EDDSASigner;
use certifier_crypto::{Signer, SignerError};
use image::{ImageFormat, Rgb, RgbImage};
use lopdf::{Document, Object};
use secrecy::SecretSlice;

use super::signer::{Ed25519PdfSigner, MockPdfSigner};
use super::*;

fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    let mut data = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .unwrap();
    data
}

fn info_string(document: &Document, key: &str) -> Option<Vec<u8>> {
    let info = document
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .and_then(|id| document.get_dictionary(id))
        .unwrap();
    info.get(key.as_bytes())
        .ok()
        .and_then(|value| value.as_str().ok())
        .map(<[u8]>::to_vec)
}

fn image_stream(document: &Document) -> Vec<u8> {
    document
        .objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .find(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .is_ok_and(|name| name == b"Image")
        })
        .map(|stream| stream.content.to_owned())
        .unwrap()
}

#[test]
fn test_package_unsigned() {
    let pdf = PdfPackager::new(None).package(&png(120, 80)).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.5"));

    let document = Document::load_mem(&pdf).unwrap();
    let pages = document.get_pages();
    assert_eq!(pages.len(), 1);

    let page = document.get_dictionary(pages[&1]).unwrap();
    let media_box: Vec<i64> = page
        .get(b"MediaBox")
        .and_then(Object::as_array)
        .unwrap()
        .iter()
        .map(|value| value.as_i64().unwrap())
        .collect();
    assert_eq!(media_box, vec![0, 0, 120, 80]);

    assert!(info_string(&document, INFO_SIGNATURE).is_none());
    assert!(image_stream(&document).starts_with(&[0xFF, 0xD8]));
}

#[test]
fn test_package_signed_verifiable() {
    let key_pair = EDDSASigner::generate_key_pair();
    let signer = Ed25519PdfSigner::new(&key_pair.private).unwrap();

    let pdf = PdfPackager::new(Some(Arc::new(signer)))
        .package(&png(40, 40))
        .unwrap();
    let document = Document::load_mem(&pdf).unwrap();

    let signature = hex::decode(info_string(&document, INFO_SIGNATURE).unwrap()).unwrap();
    let public_key = hex::decode(info_string(&document, INFO_PUBLIC_KEY).unwrap()).unwrap();
    assert_eq!(public_key, key_pair.public);
    assert_eq!(
        info_string(&document, INFO_SIGNATURE_ALGORITHM).unwrap(),
        b"Ed25519"
    );
    assert!(info_string(&document, INFO_SIGNED_AT).is_some());

    EDDSASigner {}
        .verify(&image_stream(&document), &signature, &public_key)
        .unwrap();
}

#[test]
fn test_package_signing_failure_degrades_to_unsigned() {
    let mut signer = MockPdfSigner::new();
    signer
        .expect_sign()
        .once()
        .returning(|_| Err(SignerError::CouldNotSign("hsm offline".to_string())));

    let pdf = PdfPackager::new(Some(Arc::new(signer)))
        .package(&png(10, 10))
        .unwrap();

    let document = Document::load_mem(&pdf).unwrap();
    assert!(info_string(&document, INFO_SIGNATURE).is_none());
}

#[test]
fn test_package_invalid_image() {
    assert!(matches!(
        PdfPackager::new(None).package(b"not an image"),
        Err(PdfError::Image(_))
    ));
}

#[test]
fn test_ed25519_signer_rejects_invalid_key() {
    assert!(Ed25519PdfSigner::new(&SecretSlice::from(vec![1u8; 5])).is_err());
}

#[test]
fn test_to_jpeg_keeps_dimensions() {
    let jpeg = to_jpeg(&png(33, 17)).unwrap();
    assert_eq!((jpeg.width, jpeg.height), (33, 17));
    assert!(jpeg.data.starts_with(&[0xFF, 0xD8]));
}
