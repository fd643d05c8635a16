//! Canonicalizes a profile reference into the "list every record, newest
//! first" request form.

use thiserror::Error;

const PROFILE_URL_PREFIX: &str = "https://scholar.google.com/citations";

/// Query parameters preserved from the input, in output order.
const LOCALE_PARAM: &str = "hl";
const USER_PARAM: &str = "user";

/// Parameters forced onto every canonical listing request.
const FORCED_PARAMS: [(&str, &str); 2] = [("view_op", "list_works"), ("sortby", "pubdate")];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("not a profile reference: {reference:?}")]
    InvalidReference { reference: String },
}

/// Rebuild a profile reference as the canonical listing URL.
///
/// Keeps only the locale and user parameters from the input, then appends
/// the forced list-all/sort-by-date parameters. Pure and idempotent:
/// canonicalizing an already-canonical URL returns it unchanged.
pub fn canonicalize(reference: &str) -> Result<String, ReferenceError> {
    let reference = reference.trim();
    if reference.is_empty() || !reference.starts_with(PROFILE_URL_PREFIX) {
        return Err(ReferenceError::InvalidReference {
            reference: reference.to_string(),
        });
    }

    let query = reference.split_once('?').map(|(_, q)| q).unwrap_or("");

    let mut locale = None;
    let mut user = None;
    for param in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = param.split_once('=').unwrap_or((param, ""));
        match key {
            LOCALE_PARAM if locale.is_none() => locale = Some(value),
            USER_PARAM if user.is_none() => user = Some(value),
            _ => {}
        }
    }

    // A listing request without a profile id cannot name a record list.
    let user = match user {
        Some(u) if !u.is_empty() => u,
        _ => {
            return Err(ReferenceError::InvalidReference {
                reference: reference.to_string(),
            })
        }
    };

    let mut params = Vec::with_capacity(4);
    if let Some(hl) = locale {
        if !hl.is_empty() {
            params.push(format!("{}={}", LOCALE_PARAM, hl));
        }
    }
    params.push(format!("{}={}", USER_PARAM, user));
    for (key, value) in FORCED_PARAMS {
        params.push(format!("{}={}", key, value));
    }

    Ok(format!("{}?{}", PROFILE_URL_PREFIX, params.join("&")))
}
