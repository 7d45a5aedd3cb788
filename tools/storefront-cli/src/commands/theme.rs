//! Theme commands.

use anyhow::{anyhow, Result};
use storefront_commerce::Theme;

use super::{ThemeArgs, ThemeCommand};
use crate::context::Context;

/// Run the theme command.
pub async fn run(args: ThemeArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.theme_store()?;

    let theme = match args.command.unwrap_or(ThemeCommand::Show) {
        ThemeCommand::Show => store.theme(),
        ThemeCommand::Toggle => store.toggle()?,
        ThemeCommand::Set { theme } => {
            let theme: Theme = theme.parse().map_err(|e: String| anyhow!(e))?;
            store.set(theme)?
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "theme": theme }));
        return Ok(());
    }

    let icon = if theme.is_dark() { "☾" } else { "☀" };
    ctx.output.success(&format!("{} {} theme", icon, theme));

    Ok(())
}
