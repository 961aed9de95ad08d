//! Site-specific extraction.
//!
//! A [`StrategyRegistry`] holds an ordered list of [`SiteStrategy`]
//! implementations. The first one whose host predicate matches the response
//! host extracts the page; when none matches, [`GenericStrategy`] does.
//! Every strategy fills each field through a cascade: its own markers first,
//! then the page's Open Graph tags, then nothing.

mod ashby;
mod dom;
mod generic;
mod greenhouse;
mod lever;
mod linkedin;
mod preload;
mod workday;

use scraper::Html;

use crate::Extraction;

pub use ashby::AshbyStrategy;
pub use dom::OpenGraph;
pub use generic::GenericStrategy;
pub use greenhouse::GreenhouseStrategy;
pub use lever::LeverStrategy;
pub use linkedin::LinkedInStrategy;
pub use preload::PreloadJsonStrategy;
pub use workday::WorkdayStrategy;

/// A fetched page, parsed once and shared by the cascade steps.
pub struct Page {
    pub url: String,
    /// Lowercased response host.
    pub host: String,
    pub document: Html,
}

impl Page {
    pub fn parse(url: &str, host: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            host: host.to_ascii_lowercase(),
            document: Html::parse_document(html),
        }
    }

    pub fn open_graph(&self) -> OpenGraph {
        OpenGraph::from_document(&self.document)
    }
}

pub trait SiteStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `host` is already lowercased.
    fn matches(&self, host: &str) -> bool;

    /// Raw title, organization and body. Bodies may still contain HTML; the
    /// orchestrator normalizes all three fields.
    fn extract(&self, page: &Page) -> Extraction;
}

/// Ordered `(predicate, strategy)` list with a generic fallback.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn SiteStrategy>>,
    fallback: GenericStrategy,
}

impl StrategyRegistry {
    /// Registry with only the generic fallback.
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
            fallback: GenericStrategy,
        }
    }

    /// Lever, Greenhouse, Workday, LinkedIn, Ashby and the preload-JSON
    /// careers site, in that order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(LeverStrategy);
        registry.register(GreenhouseStrategy);
        registry.register(WorkdayStrategy);
        registry.register(LinkedInStrategy);
        registry.register(AshbyStrategy);
        registry.register(PreloadJsonStrategy::default());
        registry
    }

    /// Append a strategy; earlier registrations win on overlapping hosts.
    pub fn register(&mut self, strategy: impl SiteStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    pub fn select(&self, host: &str) -> &dyn SiteStrategy {
        let host = host.to_ascii_lowercase();
        self.strategies
            .iter()
            .find(|strategy| strategy.matches(&host))
            .map(|strategy| strategy.as_ref())
            .unwrap_or(&self.fallback)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// First non-empty value of a cascade.
pub(crate) fn first_non_empty<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_follows_host_predicates() {
        let registry = StrategyRegistry::with_defaults();
        assert_eq!(registry.select("jobs.lever.co").name(), "lever");
        assert_eq!(registry.select("boards.greenhouse.io").name(), "greenhouse");
        assert_eq!(registry.select("job-boards.greenhouse.io").name(), "greenhouse");
        assert_eq!(registry.select("acme.wd5.myworkdayjobs.com").name(), "workday");
        assert_eq!(registry.select("WWW.LinkedIn.com").name(), "linkedin");
        assert_eq!(registry.select("jobs.ashbyhq.com").name(), "ashby");
        assert_eq!(registry.select("jobs.careers.microsoft.com").name(), "preload-json");
        assert_eq!(registry.select("example.com").name(), "generic");
    }

    #[test]
    fn registration_order_decides_overlaps() {
        struct CatchAll;
        impl SiteStrategy for CatchAll {
            fn name(&self) -> &'static str {
                "catch-all"
            }
            fn matches(&self, _host: &str) -> bool {
                true
            }
            fn extract(&self, _page: &Page) -> Extraction {
                Extraction::default()
            }
        }

        let mut registry = StrategyRegistry::with_defaults();
        registry.register(CatchAll);
        assert_eq!(registry.select("jobs.lever.co").name(), "lever");
        assert_eq!(registry.select("example.com").name(), "catch-all");
        assert_eq!(registry.names().last(), Some(&"generic"));
    }

    #[test]
    fn cascade_skips_blank_values() {
        assert_eq!(
            first_non_empty([None, Some("  ".into()), Some(" x ".into()), Some("y".into())]),
            "x"
        );
        assert_eq!(first_non_empty::<[Option<String>; 0]>([]), "");
    }
}
