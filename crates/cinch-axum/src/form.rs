//! # Form Decoding
//!
//! Turns a collected request body into the engine's raw-input model.
//! Two decoders feed the same [`FormSource`]: urlencoded pairs, and
//! multipart parts where anything carrying a file name becomes a
//! [`FilePart`] and everything else a textual value.

use bytes::Bytes;
use cinch::{FilePart, FormSource};

/// Decode an `application/x-www-form-urlencoded` body.
///
/// Repeated keys accumulate in encounter order.
pub(crate) fn parse_urlencoded(body: &[u8]) -> FormSource {
    let mut src = FormSource::new();
    for (name, value) in form_urlencoded::parse(body) {
        src.push_value(name.into_owned(), value.into_owned());
    }
    src
}

/// Decode a `multipart/form-data` body with the given boundary.
///
/// File parts keep their content as a shared [`Bytes`] view of the
/// collected body; nothing is copied.
pub(crate) async fn parse_multipart(
    boundary: String,
    body: Bytes,
) -> Result<FormSource, multer::Error> {
    let stream =
        futures_util::stream::once(async move { Ok::<Bytes, std::convert::Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut src = FormSource::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(|mime| mime.to_string());
        if file_name.is_some() {
            let data = field.bytes().await?;
            src.push_file(name, FilePart { file_name, content_type, data });
        } else {
            src.push_value(name, field.text().await?);
        }
    }
    Ok(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_decodes_pairs() {
        let src = parse_urlencoded(b"title=Glorious+Post+Title&content=Lorem%20ipsum");
        assert_eq!(src.first("title"), Some("Glorious Post Title"));
        assert_eq!(src.first("content"), Some("Lorem ipsum"));
    }

    #[test]
    fn urlencoded_keeps_repeated_keys_in_order() {
        let src = parse_urlencoded(b"rating=3&rating=5&rating=4");
        assert_eq!(src.values("rating"), ["3", "5", "4"]);
    }

    #[test]
    fn urlencoded_empty_body_is_empty_source() {
        let src = parse_urlencoded(b"");
        assert_eq!(src.first("anything"), None);
    }

    const BOUNDARY: &str = "cinchtest";

    fn multipart_body() -> Bytes {
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"title\"\r\n\r\n\
             Glorious Post Title\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"picture\"; filename=\"a.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             first-image-bytes\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"picture\"; filename=\"b.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             second-image-bytes\r\n\
             --{b}--\r\n",
            b = BOUNDARY
        );
        Bytes::from(body)
    }

    #[tokio::test]
    async fn multipart_splits_values_and_files() {
        let src = parse_multipart(BOUNDARY.to_owned(), multipart_body()).await.unwrap();
        assert_eq!(src.first("title"), Some("Glorious Post Title"));
        let parts = src.files("picture");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].file_name.as_deref(), Some("a.png"));
        assert_eq!(parts[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(&parts[0].data[..], b"first-image-bytes");
        assert_eq!(parts[1].file_name.as_deref(), Some("b.png"));
        assert_eq!(&parts[1].data[..], b"second-image-bytes");
    }

    #[tokio::test]
    async fn multipart_garbage_is_an_error() {
        let result = parse_multipart(BOUNDARY.to_owned(), Bytes::from_static(b"not multipart")).await;
        assert!(result.is_err());
    }
}
