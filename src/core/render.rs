use crate::domain::model::{FetchReport, OutputFormat, Product, RenderedFile};
use crate::utils::error::{CatalogError, Result};
use serde::Serialize;

pub const REPORT_FILE_NAME: &str = "report.json";

const CSV_HEADER: [&str; 7] = [
    "id",
    "name",
    "price",
    "category",
    "image_url",
    "style_keywords",
    "source",
];

#[derive(Serialize)]
struct ProductRow<'a> {
    id: u64,
    name: &'a str,
    price: f64,
    category: &'a str,
    image_url: &'a str,
    style_keywords: String,
    source: &'a str,
}

/// Pretty-printed JSON array of products, `[]` when empty.
pub fn render_json(products: &[Product]) -> Result<String> {
    Ok(serde_json::to_string_pretty(products)?)
}

/// One row per product under a fixed header. Keywords are joined with `;`.
///
/// The header is written even when there are no products.
pub fn render_csv(products: &[Product]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for product in products {
        writer.serialize(ProductRow {
            id: product.id,
            name: &product.name,
            price: product.price,
            category: product.category.as_str(),
            image_url: &product.image_url,
            style_keywords: product.style_keywords.join(";"),
            source: &product.source,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CatalogError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CatalogError::IoError(std::io::Error::other(e)))
}

/// The product listing handed to the styling assistant, one line per item.
pub fn render_digest(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| {
            format!(
                "- {} (ID: {}, Category: {}, Style: {})",
                p.name,
                p.id,
                p.category,
                p.style_keywords.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the products in `format` under that format's file name.
pub fn render(format: OutputFormat, products: &[Product]) -> Result<RenderedFile> {
    let contents = match format {
        OutputFormat::Json => render_json(products)?,
        OutputFormat::Csv => render_csv(products)?,
        OutputFormat::Digest => render_digest(products),
    };
    Ok(RenderedFile {
        name: format.file_name().to_string(),
        contents,
    })
}

/// Per-source counts for the run, written next to the product files.
pub fn render_report(report: &FetchReport) -> Result<RenderedFile> {
    Ok(RenderedFile {
        name: REPORT_FILE_NAME.to_string(),
        contents: serde_json::to_string_pretty(report)?,
    })
}
