//! Check out the cart with the mock payment processor.

use anyhow::Result;
use chrono::Local;
use dialoguer::{Confirm, Input, Password};
use storefront_commerce::checkout::{CheckoutFlow, PaymentDetails, ShippingInfo, DEFAULT_COUNTRY};

use super::cart::print_summary;
use super::CheckoutArgs;
use crate::context::Context;

const STEPS: usize = 3;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let mut flow = CheckoutFlow::start(&store)?;
    let interactive = !ctx.output.is_json();

    ctx.output.header("Checkout");

    // Step 1: Shipping
    ctx.output
        .step(flow.step.number().into(), STEPS, flow.step.display_name());
    let shipping = shipping_info(&args, interactive)?;
    flow.submit_shipping(shipping)?;

    // Step 2: Review
    ctx.output
        .step(flow.step.number().into(), STEPS, flow.step.display_name());
    if let Some(info) = &flow.shipping {
        for line in info.lines() {
            ctx.output.kv("Ship to", &line);
        }
    }
    print_summary(&flow.summary, ctx);

    if !args.yes && interactive {
        let confirmed = Confirm::new()
            .with_prompt(format!("Pay {}?", flow.summary.total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }
    flow.proceed_to_payment()?;

    // Step 3: Payment
    ctx.output
        .step(flow.step.number().into(), STEPS, flow.step.display_name());
    let details = payment_details(&args, interactive)?;

    let processor = ctx.config.payment_processor();
    let spinner = ctx.output.spinner("Processing payment...");
    let result = flow.pay(&store, &processor, &details).await;
    spinner.finish_and_clear();
    let receipt = result?;

    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return Ok(());
    }

    ctx.output.success("Payment successful");
    ctx.output.kv("Order", receipt.order_number.as_str());
    ctx.output.kv("Amount", &receipt.amount.display());
    ctx.output.kv("Card", &format!("**** {}", receipt.card_last4));
    ctx.output.kv(
        "Paid at",
        &receipt
            .paid_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    );

    Ok(())
}

fn shipping_info(args: &CheckoutArgs, interactive: bool) -> Result<ShippingInfo> {
    Ok(ShippingInfo {
        first_name: field(&args.first_name, "First name", interactive)?,
        last_name: field(&args.last_name, "Last name", interactive)?,
        email: field(&args.email, "Email", interactive)?,
        address: field(&args.address, "Address", interactive)?,
        city: field(&args.city, "City", interactive)?,
        state: field(&args.state, "State", interactive)?,
        zip_code: field(&args.zip_code, "ZIP code", interactive)?,
        country: match &args.country {
            Some(country) => country.clone(),
            None if interactive => Input::new()
                .with_prompt("Country")
                .default(DEFAULT_COUNTRY.to_string())
                .interact_text()?,
            None => DEFAULT_COUNTRY.to_string(),
        },
        phone: args.phone.clone().filter(|p| !p.trim().is_empty()),
    })
}

fn payment_details(args: &CheckoutArgs, interactive: bool) -> Result<PaymentDetails> {
    let card_number = field(&args.card_number, "Card number", interactive)?;
    let card_name = field(&args.card_name, "Name on card", interactive)?;
    let expiry_date = field(&args.expiry_date, "Expiry (MM/YY)", interactive)?;
    let cvv = match &args.cvv {
        Some(cvv) => cvv.clone(),
        None if interactive => Password::new().with_prompt("CVV").interact()?,
        None => String::new(),
    };

    Ok(PaymentDetails {
        card_number,
        card_name,
        expiry_date,
        cvv,
    })
}

/// Use the flag value, or prompt for it when running interactively.
fn field(value: &Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value.clone()),
        None if interactive => Ok(Input::new().with_prompt(prompt).interact_text()?),
        // Left blank; validation reports it by name.
        None => Ok(String::new()),
    }
}
