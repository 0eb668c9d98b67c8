//! Implementation of the `stencil ledger` command.
//!
//! Reads session commands one per line from `--script` or stdin and applies
//! them to an in-memory account. A failing line is reported on stderr and the
//! session carries on; the account is left exactly as it was before that line.

use std::io::Read as _;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use stencil_adapters::FixedPriceTable;
use stencil_core::{
    application::LedgerService,
    domain::{Account, Transaction},
    error::Context,
};

use crate::{
    cli::{LedgerArgs, LedgerFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// One line of a ledger session.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Deposit(Decimal),
    Withdraw(Decimal),
    Buy { symbol: String, quantity: Decimal },
    Sell { symbol: String, quantity: Decimal },
    Balance,
    Holdings,
    Value,
    Pnl,
    History,
}

impl SessionCommand {
    /// `Ok(None)` for blank lines and `#` comments.
    fn parse(line: &str) -> CliResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = words.split_first() else {
            return Ok(None);
        };
        let verb = verb.to_ascii_lowercase();

        let command = match (verb.as_str(), args) {
            ("deposit", [amount]) => Self::Deposit(number(amount)?),
            ("withdraw", [amount]) => Self::Withdraw(number(amount)?),
            ("buy", [symbol, quantity]) => Self::Buy {
                symbol: symbol.to_string(),
                quantity: number(quantity)?,
            },
            ("sell", [symbol, quantity]) => Self::Sell {
                symbol: symbol.to_string(),
                quantity: number(quantity)?,
            },
            ("balance", []) => Self::Balance,
            ("holdings", []) => Self::Holdings,
            ("value", []) => Self::Value,
            ("pnl", []) => Self::Pnl,
            ("history", []) => Self::History,
            ("deposit" | "withdraw", _) => return Err(usage(line, "<verb> AMOUNT")),
            ("buy" | "sell", _) => return Err(usage(line, "<verb> SYMBOL QUANTITY")),
            ("balance" | "holdings" | "value" | "pnl" | "history", _) => {
                return Err(usage(line, "<verb> takes no arguments"));
            }
            (other, _) => {
                return Err(CliError::InvalidInput {
                    message: format!("unknown command '{other}'"),
                    source: None,
                });
            }
        };

        Ok(Some(command))
    }
}

fn number(raw: &str) -> CliResult<Decimal> {
    Decimal::from_str(raw).map_err(|e| CliError::InvalidInput {
        message: format!("'{raw}' is not a number"),
        source: Some(Box::new(e)),
    })
}

fn usage(line: &str, expected: &str) -> CliError {
    CliError::InvalidInput {
        message: format!("cannot parse '{line}', expected {expected}"),
        source: None,
    }
}

/// Execute the `stencil ledger` command.
#[instrument(skip_all)]
pub fn execute(args: LedgerArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let owner = args.owner.unwrap_or(config.ledger.owner_name);
    let email = args.email.unwrap_or(config.ledger.owner_email);

    let prices = config
        .ledger
        .prices
        .into_iter()
        .chain(args.prices)
        .fold(FixedPriceTable::reference(), |table, (symbol, price)| {
            table.with_price(symbol, price)
        });
    debug!(symbols = ?prices.symbols(), "Price table ready");

    let mut ledger = LedgerService::new(Account::open(owner, email), Box::new(prices));
    if let Some(amount) = args.deposit {
        ledger.deposit(amount)?;
    }

    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_cli_context(|| format!("failed to read script '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_cli_context(|| "failed to read commands from stdin")?;
            buf
        }
    };

    let text = args.format == LedgerFormat::Text;
    let mut failures = 0usize;
    let mut executed = 0usize;

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        let outcome = SessionCommand::parse(line).and_then(|command| match command {
            Some(command) => run_command(&mut ledger, &command).map(Some),
            None => Ok(None),
        });

        match outcome {
            Ok(None) => {}
            Ok(Some(lines)) => {
                executed += 1;
                if text {
                    for l in &lines {
                        output.data(l)?;
                    }
                }
            }
            Err(err) => {
                failures += 1;
                warn!(line = line_no, error = %err, "Session command failed");
                output.error(&format!("line {line_no}: {err}"))?;
            }
        }
    }

    info!(executed, failures, "Ledger session finished");

    match args.format {
        LedgerFormat::Text => {
            output.print("")?;
            output.info(&format!(
                "{executed} command(s) applied, {failures} failed; balance {}",
                ledger.balance()
            ))?;
        }
        LedgerFormat::Json => {
            let summary = ledger.summary()?;
            let json = serde_json::to_string_pretty(&summary).context("serialising summary")?;
            output.data(&json)?;
        }
    }

    Ok(())
}

/// Apply one command and render its result lines.
fn run_command(ledger: &mut LedgerService, command: &SessionCommand) -> CliResult<Vec<String>> {
    let lines = match command {
        SessionCommand::Deposit(amount) => vec![cash_line(&ledger.deposit(*amount)?, ledger)],
        SessionCommand::Withdraw(amount) => vec![cash_line(&ledger.withdraw(*amount)?, ledger)],
        SessionCommand::Buy { symbol, quantity } => {
            vec![trade_line(&ledger.buy(symbol, *quantity)?, ledger)]
        }
        SessionCommand::Sell { symbol, quantity } => {
            vec![trade_line(&ledger.sell(symbol, *quantity)?, ledger)]
        }
        SessionCommand::Balance => vec![format!("balance: {}", ledger.balance())],
        SessionCommand::Holdings => {
            let holdings = ledger.holdings();
            if holdings.is_empty() {
                vec!["holdings: none".to_string()]
            } else {
                holdings
                    .iter()
                    .map(|(symbol, quantity)| format!("{symbol}: {quantity}"))
                    .collect()
            }
        }
        SessionCommand::Value => {
            vec![format!("portfolio value: {}", ledger.portfolio_value()?)]
        }
        SessionCommand::Pnl => vec![
            format!("profit/loss: {}", ledger.profit_loss()?),
            format!("net profit/loss: {}", ledger.net_profit_loss()?),
        ],
        SessionCommand::History => ledger
            .transactions()
            .iter()
            .map(Transaction::to_string)
            .collect(),
    };
    Ok(lines)
}

fn cash_line(tx: &Transaction, ledger: &LedgerService) -> String {
    format!("{} {} (balance {})", tx.kind, tx.amount, ledger.balance())
}

fn trade_line(tx: &Transaction, ledger: &LedgerService) -> String {
    format!(
        "{} {} x {} for {} (balance {})",
        tx.kind,
        tx.quantity.unwrap_or_default(),
        tx.symbol.as_deref().unwrap_or_default(),
        tx.amount,
        ledger.balance()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stencil_core::domain::DomainError;

    fn service(deposit: Decimal) -> LedgerService {
        let mut ledger = LedgerService::new(
            Account::open("Ada", "ada@example.com"),
            Box::new(FixedPriceTable::reference()),
        );
        ledger.deposit(deposit).unwrap();
        ledger
    }

    fn run(ledger: &mut LedgerService, line: &str) -> CliResult<Vec<String>> {
        let command = SessionCommand::parse(line)?.expect("not a command");
        run_command(ledger, &command)
    }

    #[test]
    fn parses_every_verb() {
        assert_eq!(
            SessionCommand::parse("  BUY AAPL 2 ").unwrap(),
            Some(SessionCommand::Buy {
                symbol: "AAPL".into(),
                quantity: dec!(2)
            })
        );
        assert_eq!(
            SessionCommand::parse("withdraw 12.50").unwrap(),
            Some(SessionCommand::Withdraw(dec!(12.50)))
        );
        for (line, expected) in [
            ("balance", SessionCommand::Balance),
            ("holdings", SessionCommand::Holdings),
            ("value", SessionCommand::Value),
            ("pnl", SessionCommand::Pnl),
            ("history", SessionCommand::History),
        ] {
            assert_eq!(SessionCommand::parse(line).unwrap(), Some(expected));
        }
    }

    #[test]
    fn blanks_and_comments_are_skipped() {
        assert_eq!(SessionCommand::parse("").unwrap(), None);
        assert_eq!(SessionCommand::parse("   ").unwrap(), None);
        assert_eq!(SessionCommand::parse("# opening trades").unwrap(), None);
    }

    #[test]
    fn malformed_lines_are_input_errors() {
        for line in ["fly 10", "deposit", "buy AAPL", "sell AAPL two", "balance now"] {
            assert!(
                matches!(SessionCommand::parse(line), Err(CliError::InvalidInput { .. })),
                "{line}"
            );
        }
    }

    #[test]
    fn buy_reports_cost_and_balance() {
        let mut ledger = service(dec!(1000));
        let lines = run(&mut ledger, "buy TSLA 1").unwrap();
        assert_eq!(lines, vec!["buy 1 x TSLA for 700 (balance 300)"]);
    }

    #[test]
    fn rejected_command_leaves_account_unchanged() {
        let mut ledger = service(dec!(100));
        let err = run(&mut ledger, "sell AAPL 1").unwrap_err();

        assert!(matches!(
            err,
            CliError::Core(ref core)
                if matches!(core.as_domain(), Some(DomainError::InsufficientShares { .. }))
        ));
        assert_eq!(ledger.balance(), dec!(100));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn queries_render_state() {
        let mut ledger = service(dec!(1000));
        run(&mut ledger, "buy AAPL 2").unwrap();

        assert_eq!(run(&mut ledger, "holdings").unwrap(), vec!["AAPL: 2"]);
        assert_eq!(run(&mut ledger, "value").unwrap(), vec!["portfolio value: 300"]);
        assert_eq!(
            run(&mut ledger, "pnl").unwrap(),
            vec!["profit/loss: -700", "net profit/loss: 0"]
        );
        assert_eq!(run(&mut ledger, "history").unwrap().len(), 2);
    }

    #[test]
    fn empty_holdings_say_none() {
        let mut ledger = service(dec!(10));
        assert_eq!(run(&mut ledger, "holdings").unwrap(), vec!["holdings: none"]);
    }
}
