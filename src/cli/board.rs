use super::ui;
use crate::core::config::AppConfig;
use crate::core::{PriceBoard, Refresher};
use anyhow::{Context, Result};
use std::io::Write;

/// Prints the seed board and then `ticks` refreshed boards, one per interval.
pub async fn run(config: &AppConfig, ticks: u32, json: bool) -> Result<()> {
    let refresher = Refresher::start(
        config.board()?,
        config.refresh_interval(),
        config.max_fluctuation_pct,
        config.price_rng(),
    );
    let mut prices = refresher.subscribe();

    let mut out = std::io::stdout();
    let result = async {
        write_board(&mut out, &prices.borrow_and_update().clone(), json)?;
        for _ in 0..ticks {
            prices
                .changed()
                .await
                .context("Price refresher stopped unexpectedly")?;
            let board = prices.borrow_and_update().clone();
            write_board(&mut out, &board, json)?;
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    refresher.stop().await;
    result
}

fn write_board<W: Write>(out: &mut W, board: &PriceBoard, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(board).context("Failed to serialize price board")?;
        writeln!(out, "{line}")?;
    } else {
        writeln!(
            out,
            "{}",
            ui::style_text(
                &format!("Tick {} at {}", board.tick, board.updated_at.format("%H:%M:%S")),
                ui::StyleType::Subtle
            )
        )?;
        writeln!(out, "{}", ui::markets_table(board))?;
    }
    out.flush()?;
    Ok(())
}
