use serde::Deserialize;

use crate::fetch::{FetchError, FetchRequest, QueryFilter};

/// Query string of the fetch endpoints.
/// `limit` is taken as text so a non-numeric value is reported as a limit error.
#[derive(Debug, Default, Deserialize)]
pub struct FetchParams {
    pub fields: Option<String>,
    pub filters: Option<String>,
    pub limit: Option<String>,
}

impl FetchParams {
    pub fn into_request(self) -> Result<FetchRequest, FetchError> {
        let filters = match self.filters.as_deref() {
            Some(json) => QueryFilter::parse_list(json)?,
            None => vec![],
        };

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => FetchRequest::DEFAULT_LIMIT,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| FetchError::InvalidLimit(format!("Limit must be an integer, got '{}'", raw)))?,
        };

        FetchRequest::new(FetchRequest::split_fields(self.fields.as_deref()), filters, limit)
    }
}
