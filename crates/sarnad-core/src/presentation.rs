//! Strings handed to the renderer and to external capabilities.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::installers::Installer;
use crate::search::SearchField;

/// Characters left as-is in a single URL query component.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Address text up to, not including, the first line break.
#[must_use]
pub fn first_address_line(adresse: &str) -> &str {
    adresse
        .split(['\n', '\r'])
        .next()
        .unwrap_or(adresse)
}

/// Percent-encoded `"<first address line>, <localisation>, France"`.
#[must_use]
pub fn map_query(installer: &Installer) -> String {
    let query = format!(
        "{}, {}, France",
        first_address_line(&installer.adresse),
        installer.localisation
    );
    utf8_percent_encode(&query, QUERY_COMPONENT).to_string()
}

/// Full map lookup URL for `installer` under `map_search_url`.
#[must_use]
pub fn map_url(map_search_url: &str, installer: &Installer) -> String {
    format!("{map_search_url}{}", map_query(installer))
}

#[must_use]
pub fn tel_link(installer: &Installer) -> String {
    format!("tel:{}", installer.phone)
}

#[must_use]
pub fn mailto_link(installer: &Installer) -> String {
    format!("mailto:{}", installer.email)
}

/// Placeholder shown in an empty search box.
#[must_use]
pub fn search_placeholder(field: SearchField) -> &'static str {
    match field {
        SearchField::Location => "Rechercher par localisation",
        SearchField::Name => "Rechercher par nom de société",
    }
}
