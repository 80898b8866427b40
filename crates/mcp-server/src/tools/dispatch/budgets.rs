use newsdesk_client::DEFAULT_SIZE;

/// `find_similar` page size when the caller gives none.
pub(in crate::tools::dispatch) const DEFAULT_SIMILAR_SIZE: usize = DEFAULT_SIZE;

/// `list_facets` value count when neither the caller nor a preset gives one.
pub(in crate::tools::dispatch) const DEFAULT_FACET_SIZE: usize = 50;
