//! Interactive converter session: a live markets table beside the
//! conversion form, driven by line commands on stdin.

use super::ui;
use crate::core::config::AppConfig;
use crate::core::{Conversion, ConversionState, Currency, PriceBoard, Refresher};
use anyhow::{Context, Result, anyhow, bail};
use console::Term;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Source(Currency),
    Target(Currency),
    Amount(String),
    Exchange,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_lowercase().as_str() {
            "from" => Ok(Command::Source(rest.parse()?)),
            "to" => Ok(Command::Target(rest.parse()?)),
            "amount" => Ok(Command::Amount(rest.to_string())),
            "exchange" | "convert" => Ok(Command::Exchange),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => bail!("Type a command, or 'help'"),
            other => Err(anyhow!("Unknown command: {other}")),
        }
    }
}

/// Clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

const HELP: &str = "Commands: from <CUR>, to <CUR>, amount <N>, exchange, help, quit";

/// Owns the session state and the price refresher for as long as the view
/// is active.
pub struct ConverterView {
    refresher: Refresher,
    state: ConversionState,
    message: Option<String>,
}

impl ConverterView {
    pub fn start(config: &AppConfig) -> Result<Self> {
        let board = config.board()?;
        let refresher = Refresher::start(
            board,
            config.refresh_interval(),
            config.max_fluctuation_pct,
            config.price_rng(),
        );

        Ok(Self {
            refresher,
            state: ConversionState::new(config.source, config.target),
            message: Some(HELP.to_string()),
        })
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Applies a command. Returns false once the view should close.
    pub fn apply(&mut self, command: Command) -> bool {
        debug!(?command, "Applying command");
        let state = self.state.clone();
        self.message = None;
        self.state = match command {
            Command::Source(currency) => state.with_source(currency),
            Command::Target(currency) => state.with_target(currency),
            Command::Amount(amount) => state.with_amount(amount),
            Command::Exchange => {
                let board = self.refresher.current();
                match state.try_convert(&board) {
                    Conversion::Converted(state) => state,
                    Conversion::Unavailable(state) => {
                        self.message = Some(format!(
                            "No rate for {} to {} at tick {}",
                            state.source, state.target, board.tick
                        ));
                        state
                    }
                }
            }
            Command::Help => {
                self.message = Some(HELP.to_string());
                state
            }
            Command::Quit => return false,
        };
        true
    }

    pub fn render(&self) -> String {
        render_screen(&self.refresher.current(), &self.state, self.message.as_deref())
    }

    /// Runs over the terminal until `quit` or end of input.
    pub async fn run(self) -> Result<()> {
        let mut term = Term::stdout();
        self.run_with(BufReader::new(tokio::io::stdin()), &mut term)
            .await
    }

    /// Reads commands from `input` and redraws onto `out` on every price tick
    /// and every command. The refresher is stopped on every exit path.
    pub async fn run_with<I, W>(mut self, input: I, out: &mut W) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut prices = self.refresher.subscribe();
        let mut lines = input.lines();

        let outcome = async {
            self.draw(out)?;
            loop {
                tokio::select! {
                    changed = prices.changed() => {
                        if changed.is_err() {
                            bail!("Price refresher stopped unexpectedly");
                        }
                        prices.borrow_and_update();
                        self.draw(out)?;
                    }
                    line = lines.next_line() => {
                        let Some(line) = line.context("Failed to read input")? else {
                            return Ok(());
                        };
                        match line.parse::<Command>() {
                            Ok(command) => {
                                if !self.apply(command) {
                                    return Ok(());
                                }
                            }
                            Err(e) => self.message = Some(e.to_string()),
                        }
                        self.draw(out)?;
                    }
                }
            }
        }
        .await;

        self.refresher.stop().await;
        info!("Converter view closed");
        outcome
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{CLEAR_SCREEN}{}", self.render()).context("Failed to write to terminal")?;
        out.flush().context("Failed to write to terminal")?;
        Ok(())
    }
}

/// Renders the markets table and the converter form.
pub fn render_screen(board: &PriceBoard, state: &ConversionState, message: Option<&str>) -> String {
    let mut output = format!("{}\n", ui::style_text("Markets", ui::StyleType::Title));
    output.push_str(&ui::markets_table(board).to_string());
    output.push_str(&format!(
        "\n{}\n\n",
        ui::style_text(
            &format!("Updated {} (tick {})", board.updated_at.format("%H:%M:%S"), board.tick),
            ui::StyleType::Subtle
        )
    ));

    output.push_str(&format!(
        "{}\n",
        ui::style_text("Currency Converter", ui::StyleType::Title)
    ));
    output.push_str(&format!(
        "Source Currency: {}\n",
        ui::style_text(state.source.code(), ui::StyleType::Label)
    ));
    output.push_str(&format!(
        "Target Currency: {}\n",
        ui::style_text(state.target.code(), ui::StyleType::Label)
    ));
    output.push_str(&format!("Amount: {}\n", state.amount));
    output.push_str(&format!(
        "Estimated Converted Amount: {}\n",
        ui::style_text(
            &ui::format_amount(state.converted_amount),
            ui::StyleType::Value
        )
    ));

    if let Some(message) = message {
        output.push_str(&format!("\n{}\n", ui::style_text(message, ui::StyleType::Subtle)));
    }
    output.push_str("> ");
    output
}
