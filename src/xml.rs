use crate::error::{DeltacloudError, DeltacloudResult};
use log::debug;
use roxmltree::{Document, Node};

/// Codec every Deltacloud resource type implements.
///
/// `decode` reads one `<TAG>` element into a record; the generic fetch
/// pipeline handles parsing, root validation and error-document detection
/// before any decoder runs.
pub trait Resource: Sized {
    /// Relation name resolved through the link table (e.g. "instances")
    const REL: &'static str;
    /// Element tag of a single resource document (e.g. "instance")
    const TAG: &'static str;
    /// Root tag of a collection document (e.g. "instances")
    const COLLECTION_TAG: &'static str;

    fn decode(node: Node<'_, '_>) -> DeltacloudResult<Self>;
}

/// Parse a response body and validate the root element's tag.
fn parse_root<'a, 'input>(
    doc: &'a Document<'input>,
    expected: &str,
) -> DeltacloudResult<Node<'a, 'input>> {
    let root = doc.root_element();
    if root.tag_name().name() != expected {
        return Err(DeltacloudError::root_mismatch(
            expected,
            root.tag_name().name(),
        ));
    }
    Ok(root)
}

fn parse_document(body: &str) -> DeltacloudResult<Document<'_>> {
    Document::parse(body).map_err(|e| DeltacloudError::Xml(format!("Failed to parse XML: {}", e)))
}

/// Decode a collection document: `<plural><singular>..</singular>*</plural>`.
///
/// Elements are decoded in document order; any element's failure discards
/// everything decoded so far.
pub fn decode_collection<R: Resource>(body: &str) -> DeltacloudResult<Vec<R>> {
    let doc = parse_document(body)?;
    let root = parse_root(&doc, R::COLLECTION_TAG)?;

    let mut out = Vec::new();
    for child in root.children() {
        if child.is_element() && child.tag_name().name() == R::TAG {
            out.push(R::decode(child)?);
        }
    }
    debug!("decoded {} <{}> elements", out.len(), R::TAG);
    Ok(out)
}

/// Decode a single-resource document whose root is the resource itself.
pub fn decode_single<R: Resource>(body: &str) -> DeltacloudResult<R> {
    let doc = parse_document(body)?;
    let root = parse_root(&doc, R::TAG)?;
    R::decode(root)
}

/// Cheap prefix test for a server error document. False negatives fall
/// through to a decode failure; resource documents never match.
pub fn is_error_document(body: &str) -> bool {
    body.trim_start().starts_with("<error")
}

/// Extract the message from an `<error><message>..</message></error>`
/// document. A missing or unreadable message reads as "Unknown error".
pub fn error_document_message(body: &str) -> String {
    parse_document(body)
        .ok()
        .and_then(|doc| {
            let root = doc.root_element();
            if root.tag_name().name() != "error" {
                return None;
            }
            child_text(root, "message")
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}

/// Text content of the named child element. A missing child and an empty
/// text node both read as `None`; callers never see an empty string.
pub fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
        .and_then(|c| c.text())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

/// The named child element, if present.
pub fn child_element<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// Attribute value, with empty treated as absent like `child_text`.
pub fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
