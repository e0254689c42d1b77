use crate::ccb_models::Envelope;
use crate::errors::AppError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Document element of every CCB API response.
const ROOT_ELEMENT: &[u8] = b"ccb_api";

/// Parses a CCB response body into an [`Envelope`].
///
/// Mapping is schema-directed: missing elements stay `None` and unknown ones
/// are ignored.
///
/// # Errors
///
/// * `AppError::MalformedResponse` - the body is empty, not UTF-8, not rooted
///   at `<ccb_api>`, or not well-formed XML matching the envelope shape.
pub fn parse_envelope(body: &[u8]) -> Result<Envelope, AppError> {
    let xml = std::str::from_utf8(body)
        .map_err(|e| AppError::MalformedResponse(format!("body is not UTF-8: {}", e)))?;

    if xml.trim().is_empty() {
        return Err(AppError::MalformedResponse("empty body".to_string()));
    }

    check_root(xml)?;

    let envelope: Envelope = quick_xml::de::from_str(xml)?;
    Ok(envelope)
}

/// Rejects documents whose first element is not `<ccb_api>`.
///
/// The serde mapping never looks at the root name, so an HTML error page from
/// a proxy would otherwise read as an empty envelope.
fn check_root(xml: &str) -> Result<(), AppError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() == ROOT_ELEMENT {
                    return Ok(());
                }
                return Err(AppError::MalformedResponse(format!(
                    "unexpected root element <{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                )));
            }
            Ok(Event::Eof) => {
                return Err(AppError::MalformedResponse("no root element".to_string()))
            }
            Ok(_) => {}
            Err(e) => return Err(AppError::MalformedResponse(e.to_string())),
        }
    }
}

/// Serializes an envelope to a JSON string, omitting absent fields.
pub fn to_json(envelope: &Envelope) -> Result<String, AppError> {
    serde_json::to_string(envelope)
        .map_err(|e| AppError::Internal(format!("Failed to serialize envelope: {}", e)))
}

/// XML body in, JSON string out.
pub fn transcode(body: &[u8]) -> Result<String, AppError> {
    let envelope = parse_envelope(body)?;
    to_json(&envelope)
}
