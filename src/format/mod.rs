//! Output formatting for products and categories (table, JSON, markdown, CSV).

use crate::catalog::{Category, Product};
use crate::config::OutputFormat;
use crate::share::ShareMessage;

/// Formats command output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product as a detail view.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats a product list.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats the category list.
    pub fn format_categories(&self, categories: &[Category]) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(categories).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => {
                let mut lines = vec!["slug,name".to_string()];
                lines.extend(
                    categories
                        .iter()
                        .map(|c| format!("{},{}", Self::csv_escape(&c.slug), Self::csv_escape(&c.name))),
                );
                lines.join("\n")
            }
            _ if categories.is_empty() => "No categories found.".to_string(),
            OutputFormat::Markdown => {
                let mut lines = vec!["| Slug | Name |".to_string(), "|------|------|".to_string()];
                lines.extend(categories.iter().map(|c| format!("| {} | {} |", c.slug, c.name)));
                lines.join("\n")
            }
            OutputFormat::Table => {
                let slug_width = categories.iter().map(|c| c.slug.len()).max().unwrap_or(0).max(4);
                let mut lines = vec![
                    format!("{:<slug_width$}  {}", "Slug", "Name"),
                    format!("{:-<slug_width$}  {:-<20}", "", ""),
                ];
                lines.extend(
                    categories.iter().map(|c| format!("{:<slug_width$}  {}", c.slug, c.name)),
                );
                lines.push(String::new());
                lines.push(format!("Total: {} categories", categories.len()));
                lines.join("\n")
            }
        }
    }

    /// Formats a share message.
    pub fn format_share(&self, share: &ShareMessage) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(share).unwrap_or_else(|_| "{}".to_string()),
            OutputFormat::Csv => format!("message,url\n{},{}", Self::csv_escape(&share.message), share.url),
            _ => share.message.clone(),
        }
    }

    // JSON formatting

    fn json_single(&self, product: &Product) -> String {
        serde_json::to_string_pretty(product).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[Product]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", product.id));
        lines.push(format!("Title:    {}", product.title));

        match product.original_price() {
            Some(orig) => lines.push(format!(
                "Price:    USD {:.2} (was {:.2}, -{:.0}%)",
                product.price, orig, product.discount_percentage
            )),
            None => lines.push(format!("Price:    USD {:.2}", product.price)),
        }

        lines.push(format!("Rating:   {:.2}/5", product.rating));

        if let Some(brand) = &product.brand {
            lines.push(format!("Brand:    {}", brand));
        }
        if !product.category.is_empty() {
            lines.push(format!("Category: {}", product.category));
        }

        lines.push(format!(
            "Stock:    {}",
            if product.in_stock() { format!("{} left", product.stock) } else { "Out of Stock".to_string() }
        ));

        if !product.tags.is_empty() {
            lines.push(format!("Tags:     {}", product.tags.join(", ")));
        }
        if let Some(image) = product.primary_image() {
            lines.push(format!("Image:    {}", image));
        }
        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 6;
        let price_width = 10;
        let rating_width = 6;
        let stock_width = 6;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "ID", "Price", "Rating", "Stock", "Title"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        for product in products {
            lines.push(format!(
                "{:<id_width$}  {:>price_width$.2}  {:>rating_width$.2}  {:>stock_width$}  {}",
                product.id,
                product.price,
                product.rating,
                product.stock,
                truncate(&product.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.title));
        lines.push(String::new());

        lines.push(format!("- **ID:** {}", product.id));
        match product.original_price() {
            Some(orig) => {
                lines.push(format!("- **Price:** USD {:.2} ~~{:.2}~~", product.price, orig))
            }
            None => lines.push(format!("- **Price:** USD {:.2}", product.price)),
        }
        lines.push(format!("- **Rating:** {:.2}/5", product.rating));

        if let Some(brand) = &product.brand {
            lines.push(format!("- **Brand:** {}", brand));
        }
        if !product.category.is_empty() {
            lines.push(format!("- **Category:** {}", product.category));
        }
        lines.push(format!("- **Stock:** {}", product.stock));

        if let Some(image) = product.primary_image() {
            lines.push(String::new());
            lines.push(format!("![{}]({})", product.title, image));
        }
        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Price | Rating | Stock | Title |".to_string());
        lines.push("|----|-------|--------|-------|-------|".to_string());

        for product in products {
            lines.push(format!(
                "| {} | {:.2} | {:.2} | {} | {} |",
                product.id,
                product.price,
                product.rating,
                product.stock,
                truncate(&product.title, 40)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,title,price,discount_percentage,rating,stock,brand,category,thumbnail".to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            let brand = product.brand.as_deref().map(Self::csv_escape).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{}",
                product.id,
                Self::csv_escape(&product.title),
                product.price,
                product.discount_percentage,
                product.rating,
                product.stock,
                brand,
                Self::csv_escape(&product.category),
                product.thumbnail_url
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `s` to at most `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_product;

    fn full_product() -> Product {
        let mut product = make_product(5, "Essence Mascara Lash Princess", 9.99, 4.94, 5);
        product.discount_percentage = 7.17;
        product.brand = Some("Essence".to_string());
        product.category = "beauty".to_string();
        product.image_urls = vec!["https://cdn.example.com/1.png".to_string()];
        product.tags = vec!["beauty".to_string(), "mascara".to_string()];
        product.description = "Popular mascara.".to_string();
        product
    }

    fn long_title_product() -> Product {
        make_product(
            6,
            "This is a very long product title that exceeds fifty characters and should be truncated in table output",
            49.99,
            4.0,
            1,
        )
    }

    // JSON format tests

    #[test]
    fn test_json_single_product() {
        let json = Formatter::new(OutputFormat::Json).format_product(&full_product());

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["id"], 5);
        assert_eq!(parsed["title"], "Essence Mascara Lash Princess");
        assert_eq!(parsed["discountPercentage"], 7.17);
        assert_eq!(parsed["imageUrls"][0], "https://cdn.example.com/1.png");
    }

    #[test]
    fn test_json_products_and_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        let json = formatter.format_products(&[full_product(), make_product(2, "B", 1.0, 1.0, 0)]);
        let parsed: Vec<Product> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], full_product());

        assert_eq!(formatter.format_products(&[]), "[]");
    }

    // Table format tests

    #[test]
    fn test_table_single_product() {
        let output = Formatter::new(OutputFormat::Table).format_product(&full_product());

        assert!(output.contains("ID:       5"));
        assert!(output.contains("Price:    USD 9.99 (was"));
        assert!(output.contains("Rating:   4.94/5"));
        assert!(output.contains("Brand:    Essence"));
        assert!(output.contains("Stock:    5 left"));
        assert!(output.contains("Tags:     beauty, mascara"));
        assert!(output.contains("Popular mascara."));
    }

    #[test]
    fn test_table_single_out_of_stock() {
        let output =
            Formatter::new(OutputFormat::Table).format_product(&make_product(1, "A", 2.0, 1.0, 0));
        assert!(output.contains("Out of Stock"));
        assert!(output.contains("Price:    USD 2.00"));
        assert!(!output.contains("was"));
        assert!(!output.contains("Brand:"));
    }

    #[test]
    fn test_table_products() {
        let output = Formatter::new(OutputFormat::Table)
            .format_products(&[full_product(), long_title_product()]);

        assert!(output.contains("ID"));
        assert!(output.contains("Price"));
        assert!(output.contains("9.99"));
        assert!(output.contains("..."));
        assert!(output.contains("Total: 2 products"));
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(Formatter::new(OutputFormat::Table).format_products(&[]), "No products found.");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    // Markdown format tests

    #[test]
    fn test_markdown_single_product() {
        let output = Formatter::new(OutputFormat::Markdown).format_product(&full_product());
        assert!(output.starts_with("## Essence Mascara Lash Princess"));
        assert!(output.contains("- **Price:** USD 9.99 ~~"));
        assert!(output.contains("![Essence Mascara Lash Princess](https://cdn.example.com/1.png)"));
    }

    #[test]
    fn test_markdown_products() {
        let output = Formatter::new(OutputFormat::Markdown).format_products(&[full_product()]);
        assert!(output.contains("| ID | Price | Rating | Stock | Title |"));
        assert!(output.contains("| 5 | 9.99 | 4.94 | 5 |"));
        assert!(output.contains("*1 products found*"));
    }

    // CSV format tests

    #[test]
    fn test_csv_products() {
        let output = Formatter::new(OutputFormat::Csv).format_products(&[full_product()]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,title,price"));
        assert!(lines[1].starts_with("5,Essence Mascara Lash Princess,9.99,7.17,4.94,5,Essence,beauty"));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("plain"), "plain");
        assert_eq!(Formatter::csv_escape("a,b"), "\"a,b\"");
        assert_eq!(Formatter::csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        let output = Formatter::new(OutputFormat::Csv).format_products(&[]);
        assert_eq!(output.lines().count(), 1);
    }

    // Categories and share

    #[test]
    fn test_format_categories() {
        let categories = vec![Category::new("beauty", "Beauty"), Category::from_slug("home-decoration")];

        let table = Formatter::new(OutputFormat::Table).format_categories(&categories);
        assert!(table.contains("home-decoration  Home Decoration"));
        assert!(table.contains("Total: 2 categories"));

        let csv = Formatter::new(OutputFormat::Csv).format_categories(&categories);
        assert_eq!(csv.lines().nth(1), Some("beauty,Beauty"));

        let json = Formatter::new(OutputFormat::Json).format_categories(&categories);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["slug"], "home-decoration");

        assert_eq!(
            Formatter::new(OutputFormat::Markdown).format_categories(&[]),
            "No categories found."
        );
    }

    #[test]
    fn test_format_share() {
        let share = ShareMessage { message: "Look, a chair".to_string(), url: "app://product/1".to_string() };

        assert_eq!(Formatter::new(OutputFormat::Table).format_share(&share), "Look, a chair");
        assert_eq!(
            Formatter::new(OutputFormat::Csv).format_share(&share),
            "message,url\n\"Look, a chair\",app://product/1"
        );
    }
}
