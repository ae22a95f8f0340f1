use crate::kind::RequestKind;
use crate::request::SdkRequest;
use crate::table::FieldMappingTable;

/// Determines the kind of a request.
///
/// The concrete type name is looked up first, then the declared parent type name. Requests that
/// match neither are not supported and return `None`.
pub fn classify<R>(request: &R) -> Option<RequestKind>
where
    R: SdkRequest + ?Sized,
{
    let table = FieldMappingTable::get();

    let kind = table.by_type_name(request.type_name()).or_else(|| {
        request
            .parent_type_name()
            .and_then(|parent| table.by_type_name(parent))
    });

    if kind.is_none() {
        spantag_log::trace!(
            type_name = request.type_name(),
            parent = ?request.parent_type_name(),
            "unsupported request type"
        );
    }

    kind
}
