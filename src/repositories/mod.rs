//! Storage for data the demo service keeps between requests.

mod article_repo;

pub use article_repo::ArticleRepository;
