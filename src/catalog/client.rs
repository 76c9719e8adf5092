//! HTTP client for the product catalog endpoint.

use crate::catalog::models::{Category, Product, ProductDetails, ProductPage};
use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// Trait for catalog reads - enables mocking for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the whole product collection.
    async fn all_products(&self) -> Result<Vec<Product>>;

    /// Fetches the products of one category.
    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Fetches full details of one product.
    async fn product(&self, id: u64) -> Result<Product>;

    /// Runs a server-side search.
    async fn search(&self, query: &str) -> Result<Vec<Product>>;

    /// Fetches the available categories.
    async fn categories(&self) -> Result<Vec<Category>>;
}

/// Catalog HTTP client.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a new catalog client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, config.base_url.clone())
    }

    /// Creates a new catalog client against a custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            builder = builder.proxy(wreq::Proxy::all(proxy_url)?);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a GET request and decodes the JSON body.
    ///
    /// A `null` or blank body is reported as [`Error::EmptyResponse`].
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self.client.get(&url).header("Accept", "application/json").send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(Error::EmptyResponse(endpoint.to_string()));
        }

        let payload: Option<T> = serde_json::from_str(&body)
            .map_err(|source| Error::Decode { endpoint: endpoint.to_string(), source })?;

        payload.ok_or_else(|| Error::EmptyResponse(endpoint.to_string()))
    }

    async fn get_products(&self, endpoint: &str) -> Result<Vec<Product>> {
        let page: ProductPage = self.get_json(endpoint).await?;
        let products = page.products.ok_or_else(|| Error::EmptyResponse(endpoint.to_string()))?;

        debug!("{} returned {} products (total: {:?})", endpoint, products.len(), page.total);
        Ok(products.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn all_products(&self) -> Result<Vec<Product>> {
        info!("Fetching all products");
        self.get_products("/products").await
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        info!("Fetching category: {}", category);
        let endpoint = format!("/products/category/{}", urlencoding::encode(category));
        self.get_products(&endpoint).await
    }

    async fn product(&self, id: u64) -> Result<Product> {
        info!("Fetching product: {}", id);
        let endpoint = format!("/products/{}", id);

        match self.get_json::<ProductDetails>(&endpoint).await {
            Ok(details) => Ok(details.into()),
            Err(Error::Status(404)) => Err(Error::NotFound(id)),
            Err(e) => Err(e),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        info!("Searching: {}", query);
        let endpoint = format!("/products/search?q={}", urlencoding::encode(query));
        self.get_products(&endpoint).await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        info!("Fetching categories");
        self.get_json("/products/categories").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config { timeout_secs: 5, connect_timeout_secs: 5, ..Config::default() }
    }

    fn product_json(id: u64, title: &str, price: f64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "description": "desc",
            "price": price,
            "discountPercentage": 5.0,
            "rating": 4.2,
            "stock": 12,
            "brand": "Acme",
            "category": "smartphones",
            "thumbnail": format!("https://cdn.example.com/{}/thumb.png", id),
            "images": [format!("https://cdn.example.com/{}/1.png", id)],
            "tags": ["phone"]
        })
    }

    fn page_json(products: Vec<serde_json::Value>) -> serde_json::Value {
        let total = products.len();
        serde_json::json!({ "products": products, "total": total, "skip": 0, "limit": total })
    }

    async fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::with_base_url(&make_test_config(), server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_all_products_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![
                product_json(1, "iPhone 9", 549.0),
                product_json(2, "iPhone X", 899.0),
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let products = client.all_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "iPhone 9");
        assert_eq!(products[0].thumbnail_url, "https://cdn.example.com/1/thumb.png");
        assert_eq!(products[1].image_urls, vec!["https://cdn.example.com/2/1.png"]);
    }

    #[tokio::test]
    async fn test_products_by_category_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/category/smartphones"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(vec![product_json(1, "iPhone 9", 549.0)])),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let products = client.products_by_category("smartphones").await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category, "smartphones");
    }

    #[tokio::test]
    async fn test_search_sends_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/search"))
            .and(query_param("q", "phone case"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(vec![product_json(3, "Phone Case", 9.0)])),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let products = client.search("phone case").await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 3);
    }

    #[tokio::test]
    async fn test_product_by_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(7, "Watch", 99.0)))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let product = client.product(7).await.unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.brand.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn test_product_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.product(999).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(999)));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_product_null_body_is_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.product(5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_http_error_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.all_products().await.unwrap_err();
        assert!(matches!(err, Error::Status(500)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_blank_body_is_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.all_products().await.unwrap_err();
        assert!(matches!(err, Error::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_products_field_is_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"total": 0}"#))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.all_products().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_empty_products_array_is_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(Vec::new())))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client.search("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.all_products().await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains("/products"));
    }

    #[tokio::test]
    async fn test_categories() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"slug": "beauty", "name": "Beauty", "url": "https://x/beauty"},
                {"slug": "fragrances", "name": "Fragrances", "url": "https://x/fragrances"}
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let categories = client.categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].slug, "fragrances");
    }

    #[test]
    fn test_base_url_default() {
        let client = CatalogClient::new(&make_test_config()).unwrap();
        assert_eq!(client.base_url(), "https://dummyjson.com");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            CatalogClient::with_base_url(&make_test_config(), "http://custom.url/".to_string())
                .unwrap();
        assert_eq!(client.base_url(), "http://custom.url");
    }
}
