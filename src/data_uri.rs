use thiserror::Error;

/// A `data:<mimeType>;base64,<data>` image payload split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    #[error("imageData is empty")]
    Empty,
    #[error("imageData must start with 'data:'")]
    MissingScheme,
    #[error("imageData has no ',' separating header and data")]
    MissingDataSeparator,
    #[error("imageData header has no ';base64' marker")]
    NotBase64,
    #[error("imageData has an invalid mime type '{0}'")]
    InvalidMimeType(String),
    #[error("imageData carries no data after ','")]
    EmptyData,
}

impl<'a> ImagePayload<'a> {
    pub fn parse(uri: &'a str) -> Result<Self, DataUriError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(DataUriError::Empty);
        }

        let rest = match uri.get(..5) {
            Some(scheme) if scheme.eq_ignore_ascii_case("data:") => &uri[5..],
            _ => return Err(DataUriError::MissingScheme),
        };

        let (header, data) = rest
            .split_once(',')
            .ok_or(DataUriError::MissingDataSeparator)?;

        // header is "<mime>[;param=value...];base64"
        let mut segments = header.split(';');
        let mime_type = segments.next().unwrap_or_default().trim();
        let encoding = segments.last().map(str::trim);
        if !matches!(encoding, Some(e) if e.eq_ignore_ascii_case("base64")) {
            return Err(DataUriError::NotBase64);
        }

        if mime_type.is_empty() || !mime_type.contains('/') {
            return Err(DataUriError::InvalidMimeType(mime_type.to_string()));
        }
        if data.is_empty() {
            return Err(DataUriError::EmptyData);
        }

        Ok(Self { mime_type, data })
    }

    /// Rebuilds a data URI with this payload's mime type around different base64 data.
    pub fn with_data(&self, data: &str) -> String {
        format!("data:{};base64,{}", self.mime_type, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png_payload() {
        let payload = ImagePayload::parse("data:image/png;base64,AAAA").unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "AAAA");
    }

    #[test]
    fn test_parse_ignores_extra_header_params() {
        let payload = ImagePayload::parse("data:image/jpeg;name=me.jpg;base64,/9j/4AAQ").unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(payload.data, "/9j/4AAQ");
    }

    #[test]
    fn test_parse_keeps_commas_inside_data() {
        let payload = ImagePayload::parse("DATA:image/webp;BASE64,AB,CD").unwrap();
        assert_eq!(payload.mime_type, "image/webp");
        assert_eq!(payload.data, "AB,CD");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(ImagePayload::parse(""), Err(DataUriError::Empty));
        assert_eq!(ImagePayload::parse("   "), Err(DataUriError::Empty));
        assert_eq!(ImagePayload::parse("image/png;base64,AAAA"), Err(DataUriError::MissingScheme));
        assert_eq!(ImagePayload::parse("data:image/png;base64"), Err(DataUriError::MissingDataSeparator));
        assert_eq!(ImagePayload::parse("data:image/png,AAAA"), Err(DataUriError::NotBase64));
        assert_eq!(ImagePayload::parse("data:image/png;utf8,AAAA"), Err(DataUriError::NotBase64));
        assert_eq!(
            ImagePayload::parse("data:;base64,AAAA"),
            Err(DataUriError::InvalidMimeType(String::new()))
        );
        assert_eq!(ImagePayload::parse("data:image/png;base64,"), Err(DataUriError::EmptyData));
    }

    #[test]
    fn test_with_data_uses_own_mime_type() {
        let payload = ImagePayload::parse("data:image/png;base64,AAAA").unwrap();
        assert_eq!(payload.with_data("BBBB"), "data:image/png;base64,BBBB");
    }
}
