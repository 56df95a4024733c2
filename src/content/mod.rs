#[cfg(test)]
#[path = "content_test.rs"]
mod tests;

use std::{collections::HashMap, sync::Arc};

use eyre::{Context, Result, bail};
use serde::Deserialize;

use crate::models::{Article, ArticleSummary};

#[cfg(test)]
use mockall::automock;

/// Read-only article collection behind the blog section.
#[cfg_attr(test, automock)]
pub trait ContentStore {
    /// Summaries in collection order.
    fn list(&self) -> Vec<ArticleSummary>;
    fn get(&self, key: &str) -> Option<Article>;
}

pub type ArcContent = Arc<dyn ContentStore + Send + Sync>;

#[derive(Deserialize, Debug, Default)]
struct ContentFile {
    #[serde(default)]
    articles: Vec<Article>,
}

/// Articles loaded once from a TOML file.
#[derive(Debug, Default)]
pub struct StaticContent {
    articles: Vec<Article>,
    index: HashMap<String, usize>,
}

impl StaticContent {
    pub fn new(articles: Vec<Article>) -> Result<Self> {
        let mut index = HashMap::with_capacity(articles.len());
        for (idx, article) in articles.iter().enumerate() {
            if article.key.is_empty() {
                bail!("article #{} has an empty key", idx);
            }
            if index.insert(article.key.clone(), idx).is_some() {
                bail!("duplicate article key {}", article.key);
            }
        }
        Ok(Self { articles, index })
    }

    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path).wrap_err(format!("reading {}", path))?;
        Self::parse(&raw).wrap_err(format!("loading articles from {}", path))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let file: ContentFile = toml::from_str(raw).wrap_err("parsing articles")?;
        Self::new(file.articles)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl ContentStore for StaticContent {
    fn list(&self) -> Vec<ArticleSummary> {
        self.articles.iter().map(ArticleSummary::from).collect()
    }

    fn get(&self, key: &str) -> Option<Article> {
        self.index.get(key).map(|idx| self.articles[*idx].clone())
    }
}

pub fn new_content(path: Option<&str>) -> Result<ArcContent> {
    let content = match path {
        Some(path) => StaticContent::load(path)?,
        None => StaticContent::default(),
    };
    Ok(Arc::new(content))
}
