use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub image: String,
    /// HTML body injected into the article modal.
    #[serde(default)]
    pub content: String,
}

/// Article card data, without the body.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub key: String,
    pub title: String,
    pub category: String,
    pub date: String,
    pub read_time: String,
    pub image: String,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            key: article.key.clone(),
            title: article.title.clone(),
            category: article.category.clone(),
            date: article.date.clone(),
            read_time: article.read_time.clone(),
            image: article.image.clone(),
        }
    }
}
