/*!
 * Provider registry.
 *
 * Holds the set of active sentence providers and resolves language-to-
 * capable-providers and name-to-provider lookups. The registry is an
 * explicit object constructed once at startup and passed by reference to
 * the aggregation engine and any caller; tests build their own registries
 * with mock providers.
 */

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::app_config::Config;
use crate::database::SentenceRepository;
use crate::language_utils::{canonical_code, get_language_name};
use crate::providers::SentenceProvider;
use crate::providers::dictionary_com::DictionaryComProvider;
use crate::providers::glosbe::GlosbeProvider;
use crate::providers::jisho::JishoProvider;
use crate::providers::massif::MassifProvider;
use crate::providers::nadeshiko::NadeshikoProvider;
use crate::providers::oxford_learner::OxfordLearnerProvider;
use crate::providers::sesli_sozluk::SesliSozlukProvider;
use crate::providers::tatoeba::TatoebaProvider;
use crate::providers::tdk::TdkProvider;

/// Check whether a provider can serve a canonical language code.
///
/// Besides the code itself, a provider matches when one of its advertised
/// languages equals the code's display name. Deprecated: this fallback only
/// exists so that configuration values persisted by older versions, which
/// were keyed on display names, still resolve.
pub(crate) fn language_matches(provider: &dyn SentenceProvider, language: &str) -> bool {
    let display_name = get_language_name(language);
    provider
        .supported_languages()
        .iter()
        .any(|supported| supported == language || supported.eq_ignore_ascii_case(&display_name))
}

/// Registry of active sentence providers
pub struct ProviderRegistry {
    providers: RwLock<Vec<Arc<dyn SentenceProvider>>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry wired with every built-in provider.
    ///
    /// This is the fixed registration table built once at process start;
    /// adding a source means adding a constructor here.
    pub fn with_default_providers(repository: &SentenceRepository, config: &Config) -> Self {
        let registry = Self::new();

        let tatoeba = match &config.tatoeba_data_dir {
            Some(dir) => TatoebaProvider::with_data_dir(repository.clone(), dir),
            None => TatoebaProvider::new(repository.clone()),
        };
        registry.register(Arc::new(tatoeba));
        registry.register(Arc::new(GlosbeProvider::new(repository.clone())));
        registry.register(Arc::new(OxfordLearnerProvider::new(repository.clone())));
        registry.register(Arc::new(DictionaryComProvider::new(repository.clone())));
        registry.register(Arc::new(TdkProvider::new(repository.clone())));
        registry.register(Arc::new(SesliSozlukProvider::new(repository.clone())));
        registry.register(Arc::new(JishoProvider::new(repository.clone())));
        registry.register(Arc::new(MassifProvider::new(repository.clone())));
        registry.register(Arc::new(NadeshikoProvider::new(
            repository.clone(),
            config.providers.nadeshiko.api_key.clone(),
        )));

        registry
    }

    /// Add a provider to the registry
    pub fn register(&self, provider: Arc<dyn SentenceProvider>) {
        self.providers.write().push(provider);
    }

    /// All registered providers, in registration order
    pub fn all(&self) -> Vec<Arc<dyn SentenceProvider>> {
        self.providers.read().clone()
    }

    /// Look up a provider by its machine id
    pub fn by_name(&self, name: &str) -> Option<Arc<dyn SentenceProvider>> {
        self.providers
            .read()
            .iter()
            .find(|provider| provider.name() == name)
            .cloned()
    }

    /// All providers capable of serving a language, in registration order.
    ///
    /// The code is normalized to its canonical alpha-3 form first, so the
    /// same provider set comes back whether callers pass "en" or "eng".
    pub fn for_language(&self, language: &str) -> Vec<Arc<dyn SentenceProvider>> {
        let language = canonical_code(language);
        self.providers
            .read()
            .iter()
            .filter(|provider| language_matches(provider.as_ref(), &language))
            .cloned()
            .collect()
    }

    /// Union of every provider's supported languages as (code, display name)
    /// pairs, sorted by code
    pub fn all_languages(&self) -> Vec<(String, String)> {
        let codes: BTreeSet<String> = self
            .providers
            .read()
            .iter()
            .flat_map(|provider| provider.supported_languages())
            .collect();

        codes
            .into_iter()
            .map(|code| {
                let name = get_language_name(&code);
                (code, name)
            })
            .collect()
    }
}
