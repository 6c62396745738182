//! OAuth redirect URI parsing.

use std::collections::HashMap;
use url::form_urlencoded;
use url::Url;

/// Key/value pairs from the query and fragment of `callback_uri`.
///
/// Both parts are URL-decoded. Fragment values override query values, pairs
/// with an empty key or no `=` are dropped. An unparseable URI yields an
/// empty map.
pub fn parse_callback_parameters(callback_uri: &str) -> HashMap<String, String> {
    let url = match Url::parse(callback_uri.trim()) {
        Ok(url) => url,
        Err(_) => return HashMap::new(),
    };

    let mut params = HashMap::new();
    for raw in [url.query(), url.fragment()].into_iter().flatten() {
        for pair in raw.split('&').filter(|pair| pair.contains('=')) {
            for (key, value) in form_urlencoded::parse(pair.as_bytes()) {
                if !key.is_empty() {
                    params.insert(key.into_owned(), value.into_owned());
                }
            }
        }
    }
    params
}

/// Value for `key` unless missing or blank.
pub(crate) fn non_blank<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}
