//! Browse the catalog.

use anyhow::{anyhow, Result};
use storefront_commerce::catalog::{Catalog, CategoryFilter};

use super::{parse_product_id, ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{rating_stars, truncate};

/// List products, optionally filtered by category.
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let filter = match args.category.as_deref() {
        Some(value) => CategoryFilter::parse(value)
            .ok_or_else(|| anyhow!("Unknown category: '{}'", value))?,
        None => CategoryFilter::All,
    };

    let catalog = ctx.catalog();
    let spinner = ctx.output.spinner("Loading products...");
    let products = catalog.filtered(filter).await;
    spinner.finish_and_clear();
    let products = products?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    let title = match filter {
        CategoryFilter::All => "All products".to_string(),
        CategoryFilter::Only(category) => format!("Products in {}", category),
    };
    ctx.output.header(&title);

    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    let widths = [4, 44, 18, 10];
    ctx.output.table_row(&["ID", "TITLE", "CATEGORY", "PRICE"], &widths);
    for product in &products {
        let id = product.id.to_string();
        let price = product.price.display();
        ctx.output.table_row(
            &[&id, &product.title, &product.category, &price],
            &widths,
        );
    }
    ctx.output.info(&format!("{} product(s)", products.len()));

    Ok(())
}

/// Show one product in full.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = parse_product_id(&args.id)?;

    let catalog = ctx.catalog();
    let spinner = ctx.output.spinner("Loading product...");
    let product = catalog.get_product(id).await;
    spinner.finish_and_clear();
    let product = product?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Rating", &rating_stars(&product.rating));
    ctx.output.kv("Image", &product.image);
    if !product.description.is_empty() {
        ctx.output.kv("Description", &truncate(&product.description, 200));
    }

    Ok(())
}
