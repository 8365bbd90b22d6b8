//! multipart/form-data encoding

use uuid::Uuid;

/// Filename reported for the attachment part. Fixed, not derived from the
/// payload.
pub(crate) const ATTACHMENT_FILENAME: &str = "imagename.png";

/// MIME type reported for the attachment part. Fixed, not derived from the
/// payload.
pub(crate) const ATTACHMENT_MIME: &str = "image/png";

/// Fresh boundary token for a single upload.
pub(crate) fn boundary() -> String {
    format!("Boundary-{}", Uuid::new_v4())
}

/// Encode form fields and a single binary attachment into a
/// `multipart/form-data` body.
///
/// Fields are emitted in the order given, then the attachment, then the
/// `--{boundary}--` terminator with no trailing CRLF.
pub(crate) fn encode(
    fields: &[(String, String)],
    attachment: &[u8],
    attachment_field_name: &str,
    boundary: &str,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{attachment_field_name}\"; \
             filename=\"{ATTACHMENT_FILENAME}\"\r\nContent-Type: {ATTACHMENT_MIME}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(attachment);
    body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());
    body
}
