use crate::byte_string::ByteString;
use crate::namespace::Namespace;

/// A data source, such as one patient bed, and its namespaces.
///
/// Channel ids need not be unique within a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Channel {
    pub id: ByteString,
    pub namespaces: Vec<Namespace>,
}

impl Channel {
    #[must_use]
    pub fn new(id: ByteString) -> Self {
        Self {
            id,
            namespaces: Vec::new(),
        }
    }
}
