use super::ui;
use crate::core::config::AppConfig;
use crate::core::{Conversion, ConversionState, Currency};
use anyhow::Result;

/// Converts once at the configured seed prices. `None` when no rate path
/// exists between the two currencies.
pub fn convert_at_seed(
    config: &AppConfig,
    source: Currency,
    target: Currency,
    amount: &str,
) -> Result<Option<ConversionState>> {
    let board = config.board()?;
    let outcome = ConversionState::new(source, target)
        .with_amount(amount)
        .try_convert(&board);
    Ok(match outcome {
        Conversion::Converted(state) => Some(state),
        Conversion::Unavailable(_) => None,
    })
}

pub fn run(config: &AppConfig, source: Currency, target: Currency, amount: &str) -> Result<()> {
    match convert_at_seed(config, source, target, amount)? {
        Some(state) => println!(
            "{} {source} = {} {target}",
            amount.trim(),
            ui::style_text(&ui::format_amount(state.converted_amount), ui::StyleType::Value)
        ),
        None => println!(
            "{}",
            ui::style_text(
                &format!("Rate unavailable for {source} to {target}"),
                ui::StyleType::Error
            )
        ),
    }
    Ok(())
}
