use i18n_embed::{
    fluent::{fluent_language_loader, FluentLanguageLoader},
    I18nEmbedError,
};
use rust_embed::RustEmbed;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

#[derive(Debug, Error)]
#[error("Failed to load localizations: {0}")]
pub struct I18nError(#[from] I18nEmbedError);

/// Load the localizations best matching an `Accept-Language` header. Without a header, or
/// when nothing matches, the fallback language (`en-US`) is used.
pub fn language_loader(accept_language: Option<&str>) -> Result<FluentLanguageLoader, I18nError> {
    let langs = accept_language
        .map(accept_language::parse)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|lang| lang.parse::<LanguageIdentifier>().ok())
        .collect::<Vec<_>>();
    let loader: FluentLanguageLoader = fluent_language_loader!();
    i18n_embed::select(&loader, &Localizations, &langs)?;
    Ok(loader)
}
