use unic_langid::LanguageIdentifier;

/// The languages content is available in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageManager {
    default: LanguageIdentifier,
    languages: Vec<LanguageIdentifier>,
}

impl LanguageManager {
    pub fn new(default: LanguageIdentifier) -> Self {
        Self {
            languages: vec![default.clone()],
            default,
        }
    }

    /// add a configured language
    pub fn language(mut self, language: LanguageIdentifier) -> Self {
        if !self.languages.contains(&language) {
            self.languages.push(language);
        }
        self
    }

    pub fn default_language(&self) -> &LanguageIdentifier {
        &self.default
    }

    pub fn languages(&self) -> &[LanguageIdentifier] {
        &self.languages
    }

    /// whether more than one language is configured
    pub fn is_multilingual(&self) -> bool {
        self.languages.len() > 1
    }

    /// Pick the configured language that best matches an `Accept-Language` header, or the
    /// default language if none does.
    pub fn negotiate(&self, accept_language: &str) -> LanguageIdentifier {
        let supported = self
            .languages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        let supported = supported.iter().map(String::as_str).collect::<Vec<_>>();
        accept_language::intersection(accept_language, &supported)
            .into_iter()
            .filter_map(|lang| lang.parse::<LanguageIdentifier>().ok())
            .next()
            .unwrap_or_else(|| self.default.clone())
    }
}
