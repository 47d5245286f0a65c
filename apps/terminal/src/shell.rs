//! # Interactive Shell
//!
//! Line-oriented front end: one command per line, parsed with `FromStr`,
//! dispatched to the command functions, rendered by `view`.
//!
//! ```text
//! stdin ──► "add 1" ──► ShellCommand::Add("1") ──► commands::add_to_cart
//!                                                         │
//! stdout ◄── view::render_cart ◄── CartResponse ◄─────────┘
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::checkout::CheckoutSubmitter;
use crate::commands;
use crate::error::{ApiError, ErrorCode};
use crate::state::{CartState, CatalogState, ConfigState};
use crate::view;

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Show(String),
    Add(String),
    Increase(String),
    Decrease(String),
    Remove(String),
    Cart,
    Clear,
    Buy,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next().map(str::to_string);

        if parts.next().is_some() {
            return Err(ApiError::validation(format!(
                "Too many arguments for '{}'",
                verb
            )));
        }

        let with_id = |make: fn(String) -> ShellCommand| {
            arg.clone().map(make).ok_or_else(|| {
                ApiError::validation(format!("Usage: {} <product id>", verb))
            })
        };

        match verb.as_str() {
            "list" | "ls" => Ok(ShellCommand::List),
            "show" | "view" => with_id(ShellCommand::Show),
            "add" => with_id(ShellCommand::Add),
            "inc" | "+" => with_id(ShellCommand::Increase),
            "dec" | "-" => with_id(ShellCommand::Decrease),
            "rm" | "remove" => with_id(ShellCommand::Remove),
            "cart" => Ok(ShellCommand::Cart),
            "clear" => Ok(ShellCommand::Clear),
            "buy" | "checkout" => Ok(ShellCommand::Buy),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            "" => Err(ApiError::validation("Empty command")),
            other => Err(ApiError::validation(format!(
                "Unknown command '{}'. Type `help` for a list.",
                other
            ))),
        }
    }
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Continue(String),
    Quit,
}

/// The interactive session: states plus the checkout destination.
pub struct Shell {
    config: ConfigState,
    catalog: CatalogState,
    cart: CartState,
    submitter: Box<dyn CheckoutSubmitter>,
}

impl Shell {
    pub fn new(
        config: ConfigState,
        catalog: CatalogState,
        cart: CartState,
        submitter: Box<dyn CheckoutSubmitter>,
    ) -> Self {
        Shell {
            config,
            catalog,
            cart,
            submitter,
        }
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Runs one command and renders its result. Errors are rendered too;
    /// only `quit` ends the session.
    pub fn execute(&self, command: ShellCommand) -> ShellOutcome {
        debug!(?command, "Shell command");

        let result = match command {
            ShellCommand::Quit => return ShellOutcome::Quit,
            ShellCommand::Help => Ok(view::render_help()),
            ShellCommand::List => commands::list_products(&self.catalog)
                .map(|products| view::render_product_grid(&products, &self.config)),
            ShellCommand::Show(id) => commands::get_product(&self.catalog, &id)
                .map(|product| view::render_product_detail(&product, &self.config)),
            ShellCommand::Add(id) => {
                commands::add_to_cart(&self.catalog, &self.cart, &id).map(|cart| self.cart_view(&cart))
            }
            ShellCommand::Increase(id) => {
                commands::increase_quantity(&self.cart, &id).map(|cart| self.cart_view(&cart))
            }
            ShellCommand::Decrease(id) => {
                commands::decrease_quantity(&self.cart, &id).map(|cart| self.cart_view(&cart))
            }
            ShellCommand::Remove(id) => {
                commands::remove_from_cart(&self.cart, &id).map(|cart| self.cart_view(&cart))
            }
            ShellCommand::Cart => Ok(self.cart_view(&commands::get_cart(&self.cart))),
            ShellCommand::Clear => Ok(self.cart_view(&commands::clear_cart(&self.cart))),
            ShellCommand::Buy => {
                commands::buy_now(&self.config, &self.cart, self.submitter.as_ref())
                    .map(|request| view::render_checkout(&request))
            }
        };

        ShellOutcome::Continue(result.unwrap_or_else(|err| render_error(&err)))
    }

    /// Parses and runs one input line.
    pub fn execute_line(&self, line: &str) -> ShellOutcome {
        match line.parse::<ShellCommand>() {
            Ok(command) => self.execute(command),
            Err(err) => ShellOutcome::Continue(render_error(&err)),
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "Welcome to {}! Type `help` for commands.", self.config.store_name)?;

        match commands::list_products(&self.catalog) {
            Ok(products) => writeln!(output, "{}", view::render_product_grid(&products, &self.config))?,
            Err(err) => writeln!(output, "{}", render_error(&err))?,
        }

        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(output, "> ")?;
                output.flush()?;
                continue;
            }

            match self.execute_line(&line) {
                ShellOutcome::Quit => break,
                ShellOutcome::Continue(text) => writeln!(output, "{}", text)?,
            }

            write!(output, "> ")?;
            output.flush()?;
        }

        writeln!(output, "Goodbye!")?;
        Ok(())
    }

    fn cart_view(&self, cart: &crate::state::CartResponse) -> String {
        view::render_cart(cart, &self.config)
    }
}

/// User-facing text for an error. Catalog failures and the empty-cart
/// alert are shown verbatim; everything else carries its code.
fn render_error(err: &ApiError) -> String {
    match err.code {
        ErrorCode::CatalogError | ErrorCode::EmptyCart => err.message.clone(),
        _ => err.to_string(),
    }
}
