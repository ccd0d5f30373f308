//! Request types for HTTP endpoints.

use cafelist_lib::CafeQuery;

/// Query-string parameters of a café list request.
///
/// All fields are kept as raw text so that validation (including integer
/// parsing of `count`) happens in the library, in its fixed order.
///
/// Built from decoded query pairs: the first occurrence of a key wins,
/// later repeats and unrecognised keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CafeRequest {
    /// City key to list cafés for.
    pub city: Option<String>,

    /// Maximum number of cafés to return.
    pub count: Option<String>,

    /// Case-insensitive substring the café name must contain.
    pub search: Option<String>,
}

impl FromIterator<(String, String)> for CafeRequest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut request = CafeRequest::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "city" => &mut request.city,
                "count" => &mut request.count,
                "search" => &mut request.search,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        request
    }
}

impl From<CafeRequest> for CafeQuery {
    fn from(value: CafeRequest) -> Self {
        CafeQuery {
            city: value.city,
            count: value.count,
            search: value.search,
        }
    }
}
