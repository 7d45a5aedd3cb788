//! Cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use serde::Serialize;
use storefront_commerce::cart::{CartLine, OrderSummary};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::{CartEvent, CartStore};
use tokio::sync::broadcast;

use super::{parse_product_id, CartArgs, CartCommand};
use crate::context::Context;

/// Cart state as printed in JSON mode.
#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a [CartLine],
    count: u64,
    summary: OrderSummary,
    is_open: bool,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let mut events = store.subscribe();

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id, quantity } => {
            let id = parse_product_id(&id)?;
            ctx.output.debug(&format!("adding {} x product {}", quantity, id));
            let spinner = ctx.output.spinner("Looking up product...");
            let product = ctx.catalog().get_product(id).await;
            spinner.finish_and_clear();
            store.add_to_cart(&product?, quantity);
        }
        CartCommand::Remove { id } => {
            let id = parse_product_id(&id)?;
            if store.line(id).is_none() {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            store.remove_from_cart(id);
        }
        CartCommand::Update { id, quantity } => {
            let id = parse_product_id(&id)?;
            if store.line(id).is_none() {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            store.update_quantity(id, quantity);
        }
        CartCommand::Clear { yes } => {
            if store.is_empty() {
                ctx.output.info("Cart is already empty");
            }
            if !clear_cart(&store, yes || ctx.output.is_json(), confirm_clear)? {
                ctx.output.warn("Clear cancelled");
                return Ok(());
            }
        }
        CartCommand::Open => store.set_cart_open(true),
        CartCommand::Close => store.set_cart_open(false),
        CartCommand::Toggle => store.toggle_cart(),
    }

    report_events(&mut events, ctx);
    print_cart(&store, ctx);
    Ok(())
}

/// Clear the cart, asking first unless `skip_prompt` is set or there is
/// nothing to lose. Returns false when the user declines.
fn clear_cart<F>(store: &CartStore, skip_prompt: bool, confirm: F) -> Result<bool>
where
    F: FnOnce(&CartStore) -> Result<bool>,
{
    if !store.is_empty() && !skip_prompt && !confirm(store)? {
        return Ok(false);
    }
    store.clear_cart();
    Ok(true)
}

fn confirm_clear(store: &CartStore) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("Remove all {} item(s) from the cart?", store.cart_count()))
        .default(false)
        .interact()?)
}

/// Echo what the store announced while the command ran.
fn report_events(events: &mut broadcast::Receiver<CartEvent>, ctx: &Context) {
    while let Ok(event) = events.try_recv() {
        match event {
            CartEvent::NotificationShown(message) => ctx.output.success(&message),
            CartEvent::PersistFailed(error) => {
                ctx.output.warn(&format!("Cart could not be saved: {}", error))
            }
            CartEvent::CartPanelToggled(open) => {
                ctx.output.info(if open { "Cart panel opened" } else { "Cart panel closed" })
            }
            CartEvent::LinesChanged | CartEvent::NotificationHidden => {}
        }
    }
}

/// Print the cart contents and order summary.
pub fn print_cart(store: &CartStore, ctx: &Context) {
    let lines = store.lines();
    let summary = store.order_summary();

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: lines.as_slice(),
            count: store.cart_count(),
            summary,
            is_open: store.is_cart_open(),
        });
        return;
    }

    ctx.output.header(&format!("Shopping Cart ({})", store.cart_count()));
    if lines.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [4, 36, 5, 10, 10];
    ctx.output
        .table_row(&["ID", "ITEM", "QTY", "PRICE", "TOTAL"], &widths);
    for line in &lines {
        let id = line.id().to_string();
        let quantity = line.quantity.to_string();
        let price = line.product.price.display();
        let total = line
            .line_total()
            .map(|m| m.display())
            .unwrap_or_else(|| "overflow".to_string());
        ctx.output.table_row(
            &[&id, &line.product.title, &quantity, &price, &total],
            &widths,
        );
    }

    print_summary(&summary, ctx);
}

/// Print subtotal, shipping, tax and total.
pub fn print_summary(summary: &OrderSummary, ctx: &Context) {
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    ctx.output.kv("Shipping", &summary.shipping_label());
    ctx.output.kv("Tax", &summary.tax.display());
    ctx.output.kv("Total", &summary.total.display());
}
