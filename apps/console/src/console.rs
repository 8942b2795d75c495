//! # Menu Loop
//!
//! Line-oriented menus over any `BufRead`/`Write` pair. The binary runs it
//! on stdin/stdout; tests feed it a scripted `Cursor`.
//!
//! ## Menu Tree
//! ```text
//! MAIN MENU
//! ├── 1. Item Management ──────► search / view all / add item /
//! │                              add to cart / view cart /
//! │                              update quantity / remove from cart
//! ├── 2. Customer Management ──► search / view all / add / select
//! ├── 3. Billing & Checkout ───► view cart / generate receipt / clear cart
//! ├── 4. Reports ──────────────► daily sales / customer history /
//! │                              item summary
//! └── 5. Exit
//! ```
//!
//! ## Error Policy
//! A failed command prints its message and the same menu is shown again.
//! Invalid choices do the same. End of input at any prompt ends the
//! session normally. Only a broken terminal (`ErrorCode::Io`) is returned
//! to the caller.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::commands::{billing, customer, item, report};
use crate::error::ConsoleResult;
use crate::render;
use crate::state::App;

const MAIN_MENU: &[&str] = &[
    "Item Management",
    "Customer Management",
    "Billing & Checkout",
    "Reports",
    "Exit",
];

const ITEM_MENU: &[&str] = &[
    "Search Item",
    "View All Items",
    "Add New Item",
    "Add Item to Cart",
    "View Cart",
    "Update Cart Quantity",
    "Remove Item from Cart",
    "Back to Main Menu",
];

const CUSTOMER_MENU: &[&str] = &[
    "Search Customer",
    "View All Customers",
    "Add New Customer",
    "Select Customer",
    "Back to Main Menu",
];

const BILLING_MENU: &[&str] = &[
    "View Current Cart",
    "Generate Receipt",
    "Clear Cart",
    "Back to Main Menu",
];

const REPORTS_MENU: &[&str] = &[
    "Daily Sales Report",
    "Customer Purchase History",
    "Item Sales Summary",
    "Back to Main Menu",
];

/// What the loop does after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the current menu again
    Stay,
    /// Leave the current menu
    Back,
    /// Input ended, unwind everything
    Exit,
}

/// Source of "now" for receipt dates and the default report day.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The interactive console.
pub struct Console<R, W> {
    app: App,
    input: R,
    output: W,
    clock: Clock,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(app: App, input: R, output: W) -> Self {
        Console {
            app,
            input,
            output,
            clock: local_now,
        }
    }

    /// Replaces the local clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn into_parts(self) -> (App, W) {
        (self.app, self.output)
    }

    /// Runs until Exit is chosen or input ends.
    pub fn run(&mut self) -> ConsoleResult<()> {
        info!(store = %self.app.config.store_name, "Console started");
        writeln!(
            self.output,
            "Welcome to {} Billing System!",
            self.app.config.store_name
        )?;

        self.menu("MAIN MENU", MAIN_MENU, |console, choice| match choice {
            1 => console.item_menu(),
            2 => console.customer_menu(),
            3 => console.billing_menu(),
            4 => console.reports_menu(),
            _ => Ok(Flow::Stay),
        })?;

        writeln!(
            self.output,
            "\nThank you for using {} Billing System!",
            self.app.config.store_name
        )?;
        info!("Console stopped");
        Ok(())
    }

    // =========================================================================
    // Menu Plumbing
    // =========================================================================

    /// Shows `options` until the last one (Back/Exit) is picked or input ends.
    fn menu(
        &mut self,
        title: &str,
        options: &[&str],
        action: fn(&mut Self, usize) -> ConsoleResult<Flow>,
    ) -> ConsoleResult<Flow> {
        let back = options.len();

        loop {
            self.show_menu(title, options)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(Flow::Exit);
            };

            let outcome = match choice.parse::<usize>() {
                Ok(n) if n == back => return Ok(Flow::Back),
                Ok(n) if (1..back).contains(&n) => action(self, n),
                _ => {
                    debug!(menu = title, choice = %choice, "Invalid menu choice");
                    self.say("Invalid choice! Please try again.")?;
                    Ok(Flow::Stay)
                }
            };

            if self.settle(outcome)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    fn show_menu(&mut self, title: &str, options: &[&str]) -> ConsoleResult<()> {
        let status = self.app.session.status_line(&self.app.config);
        let out = &mut self.output;

        writeln!(out, "\n{}", render::rule('='))?;
        writeln!(
            out,
            "{:^width$}",
            format!("{} - {}", self.app.config.store_name.to_uppercase(), title),
            width = render::WIDTH
        )?;
        writeln!(out, "{}", render::rule('='))?;
        writeln!(out, "{status}")?;
        writeln!(out, "{}", render::rule('-'))?;
        for (index, option) in options.iter().enumerate() {
            writeln!(out, "{}. {}", index + 1, option)?;
        }
        writeln!(out, "{}", render::rule('='))?;
        Ok(())
    }

    /// Prints a command's error and carries on, unless the terminal broke.
    fn settle(&mut self, outcome: ConsoleResult<Flow>) -> ConsoleResult<Flow> {
        match outcome {
            Ok(flow) => Ok(flow),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                debug!(code = ?err.code, message = %err.message, "Command failed");
                self.say(&err.message)?;
                Ok(Flow::Stay)
            }
        }
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> ConsoleResult<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: &str) -> ConsoleResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    // =========================================================================
    // Item Management
    // =========================================================================

    fn item_menu(&mut self) -> ConsoleResult<Flow> {
        self.menu("ITEM MANAGEMENT", ITEM_MENU, |console, choice| match choice {
            1 => console.search_items(),
            2 => console.list_items(),
            3 => console.add_item(),
            4 => console.add_to_cart(),
            5 => console.view_cart(),
            6 => console.update_cart_quantity(),
            7 => console.remove_from_cart(),
            _ => Ok(Flow::Stay),
        })
    }

    fn search_items(&mut self) -> ConsoleResult<Flow> {
        let Some(query) = self.prompt("Enter item name or ID to search: ")? else {
            return Ok(Flow::Exit);
        };
        item::search_items(&self.app, &mut self.output, &query)?;
        Ok(Flow::Stay)
    }

    fn list_items(&mut self) -> ConsoleResult<Flow> {
        item::list_items(&self.app, &mut self.output)?;
        Ok(Flow::Stay)
    }

    fn add_item(&mut self) -> ConsoleResult<Flow> {
        let Some(id) = self.prompt("Enter item ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Enter item name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt("Enter price: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(stock) = self.prompt("Enter stock quantity: ")? else {
            return Ok(Flow::Exit);
        };

        let added = item::add_item(&mut self.app, &id, &name, &price, &stock)?;
        self.say(&format!("Item {} ({}) added to catalog!", added.id, added.name))?;
        Ok(Flow::Stay)
    }

    fn add_to_cart(&mut self) -> ConsoleResult<Flow> {
        let Some(item_id) = self.prompt("Enter item ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Enter quantity: ")? else {
            return Ok(Flow::Exit);
        };

        let line = item::add_to_cart(&mut self.app, &item_id, &quantity)?;
        self.say(&format!(
            "Added to cart! Item {} quantity now {}.",
            line.item_id, line.quantity
        ))?;
        Ok(Flow::Stay)
    }

    fn view_cart(&mut self) -> ConsoleResult<Flow> {
        billing::view_cart(&self.app, &mut self.output)?;
        Ok(Flow::Stay)
    }

    fn update_cart_quantity(&mut self) -> ConsoleResult<Flow> {
        let Some(item_id) = self.prompt("Enter item ID to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.prompt("Enter new quantity (0 to remove): ")? else {
            return Ok(Flow::Exit);
        };

        item::update_cart_quantity(&mut self.app, &item_id, &quantity)?;
        self.say("Cart updated!")?;
        Ok(Flow::Stay)
    }

    fn remove_from_cart(&mut self) -> ConsoleResult<Flow> {
        let Some(item_id) = self.prompt("Enter item ID to remove: ")? else {
            return Ok(Flow::Exit);
        };

        if item::remove_from_cart(&mut self.app, &item_id) {
            self.say("Item removed from cart!")?;
        } else {
            self.say("Item not found in cart!")?;
        }
        Ok(Flow::Stay)
    }

    // =========================================================================
    // Customer Management
    // =========================================================================

    fn customer_menu(&mut self) -> ConsoleResult<Flow> {
        self.menu("CUSTOMER MANAGEMENT", CUSTOMER_MENU, |console, choice| {
            match choice {
                1 => console.search_customers(),
                2 => console.list_customers(),
                3 => console.add_customer(),
                4 => console.select_customer(),
                _ => Ok(Flow::Stay),
            }
        })
    }

    fn search_customers(&mut self) -> ConsoleResult<Flow> {
        let Some(query) = self.prompt("Enter customer name, phone or ID to search: ")? else {
            return Ok(Flow::Exit);
        };
        customer::search_customers(&self.app, &mut self.output, &query)?;
        Ok(Flow::Stay)
    }

    fn list_customers(&mut self) -> ConsoleResult<Flow> {
        customer::list_customers(&self.app, &mut self.output)?;
        Ok(Flow::Stay)
    }

    fn add_customer(&mut self) -> ConsoleResult<Flow> {
        let Some(name) = self.prompt("Enter customer name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(phone) = self.prompt("Enter phone number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.prompt("Enter email: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(address) = self.prompt("Enter address: ")? else {
            return Ok(Flow::Exit);
        };

        let added = customer::add_customer(&mut self.app, &name, &phone, &email, &address)?;
        self.say(&format!("Customer added successfully! Customer ID: {}", added.id))?;
        Ok(Flow::Stay)
    }

    fn select_customer(&mut self) -> ConsoleResult<Flow> {
        let Some(customer_id) = self.prompt("Enter customer ID: ")? else {
            return Ok(Flow::Exit);
        };

        let selected = customer::select_customer(&mut self.app, &customer_id)?;
        self.say(&format!("Customer selected: {} ({})", selected.name, selected.id))?;
        Ok(Flow::Stay)
    }

    // =========================================================================
    // Billing & Checkout
    // =========================================================================

    fn billing_menu(&mut self) -> ConsoleResult<Flow> {
        self.menu("BILLING & CHECKOUT", BILLING_MENU, |console, choice| {
            match choice {
                1 => console.view_cart(),
                2 => console.generate_receipt(),
                3 => console.clear_cart(),
                _ => Ok(Flow::Stay),
            }
        })
    }

    fn generate_receipt(&mut self) -> ConsoleResult<Flow> {
        let now = (self.clock)();

        let receipt_id = billing::generate_receipt(&mut self.app, now.date())?;
        billing::print_receipt(&self.app, &mut self.output, receipt_id.as_str(), now)?;
        self.say(&format!(
            "Receipt generated successfully! Receipt ID: {}",
            receipt_id
        ))?;
        Ok(Flow::Stay)
    }

    fn clear_cart(&mut self) -> ConsoleResult<Flow> {
        billing::clear_cart(&mut self.app);
        self.say("Cart cleared!")?;
        Ok(Flow::Stay)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    fn reports_menu(&mut self) -> ConsoleResult<Flow> {
        self.menu("REPORTS", REPORTS_MENU, |console, choice| match choice {
            1 => console.daily_sales(),
            2 => console.customer_history(),
            3 => console.item_summary(),
            _ => Ok(Flow::Stay),
        })
    }

    fn daily_sales(&mut self) -> ConsoleResult<Flow> {
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD) or press Enter for today: ")?
        else {
            return Ok(Flow::Exit);
        };
        let today = (self.clock)().date();

        report::daily_sales(&self.app, &mut self.output, &date, today)?;
        Ok(Flow::Stay)
    }

    fn customer_history(&mut self) -> ConsoleResult<Flow> {
        report::customer_history(&self.app, &mut self.output)?;
        Ok(Flow::Stay)
    }

    fn item_summary(&mut self) -> ConsoleResult<Flow> {
        report::item_summary(&self.app, &mut self.output)?;
        Ok(Flow::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tally_core::Money;
    use tally_store::seed::{sample_customers, sample_items};
    use tally_store::Storage;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    /// Runs `script` against sample data; returns the final state and output.
    fn run_script(script: &str) -> (App, String) {
        let config = AppConfig {
            data_dir: PathBuf::from("data"),
            ..AppConfig::default()
        };
        let app = App::new(Storage::in_memory(sample_items(), sample_customers()), config);

        let mut console =
            Console::new(app, Cursor::new(script.to_string()), Vec::new()).with_clock(fixed_now);
        console.run().unwrap();

        let (app, output) = console.into_parts();
        (app, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_exit_from_main_menu() {
        let (_, output) = run_script("5\n");

        assert!(output.starts_with("Welcome to XYZ Retail Store Billing System!"));
        assert!(output.contains("1. Item Management"));
        assert!(output.contains("Thank you for using XYZ Retail Store Billing System!"));
    }

    #[test]
    fn test_full_sale() {
        let script = concat!(
            "2\n4\n1\n5\n",      // customers: select 1, back
            "1\n4\n101\n3\n8\n", // items: add 3 x 101, back
            "3\n2\n4\n",         // billing: generate receipt, back
            "5\n",
        );

        let (app, output) = run_script(script);

        assert!(output.contains("Customer selected: Rahul (1)"));
        assert!(output.contains("Added to cart! Item 101 quantity now 3."));
        assert!(output.contains("CUSTOMER RECEIPT"));
        assert!(output.contains("Date: 2024-03-09"));
        assert!(output.contains("TOTAL AMOUNT: $30.00"));
        assert!(output.contains("Receipt generated successfully! Receipt ID: R001"));
        assert!(output.contains("Last receipt: R001 ($30.00)"));

        let headers = app.storage.receipts().headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].total_amount, Money::from_cents(3000));
        assert!(app.session.cart.is_empty());
    }

    #[test]
    fn test_invalid_choices_are_reported() {
        let (_, output) = run_script("9\nabc\n\n1\n0\n8\n5\n");

        assert_eq!(output.matches("Invalid choice! Please try again.").count(), 4);
        assert!(output.contains("Thank you for using"));
    }

    #[test]
    fn test_errors_keep_the_loop_running() {
        let script = concat!(
            "3\n2\n4\n",         // generate receipt with no customer
            "1\n4\n106\n30\n",   // 30 calculators, only 25 in stock
            "4\n999\n1\n",       // unknown item
            "4\n101\nlots\n8\n", // bad quantity
            "5\n",
        );

        let (app, output) = run_script(script);

        assert!(output.contains("Please select a customer first!"));
        assert!(output.contains("Insufficient stock for 106"));
        assert!(output.contains("Item not found: 999"));
        assert!(output.contains("quantity has invalid format"));
        assert!(app.session.cart.is_empty());
        assert!(app.storage.receipts().headers().is_empty());
    }

    #[test]
    fn test_end_of_input_mid_command_exits_cleanly() {
        let (app, output) = run_script("1\n4\n101\n");

        assert!(output.contains("Enter quantity: "));
        assert!(output.contains("Thank you for using"));
        assert!(app.session.cart.is_empty());
    }

    #[test]
    fn test_cart_edits_from_item_menu() {
        let script = concat!(
            "1\n",
            "4\n101\n2\n",
            "4\n102\n1\n",
            "6\n101\n5\n",
            "7\n102\n",
            "7\n102\n",
            "5\n",
            "8\n5\n",
        );

        let (app, output) = run_script(script);

        assert!(output.contains("Cart updated!"));
        assert!(output.contains("Item removed from cart!"));
        assert!(output.contains("Item not found in cart!"));
        assert!(output.contains("Cart Total: $50.00"));
        assert_eq!(app.session.cart.quantity_of("101"), Some(5));
        assert_eq!(app.session.cart.len(), 1);
    }

    #[test]
    fn test_reports_after_sale() {
        let script = concat!(
            "4\n2\n4\n", // history without a customer
            "2\n4\n2\n5\n",
            "1\n4\n102\n2\n8\n",
            "3\n2\n4\n",
            "4\n1\n\n2\n3\n4\n",
            "5\n",
        );

        let (_, output) = run_script(script);

        assert!(output.contains("Please select a customer first!"));
        assert!(output.contains("DAILY SALES REPORT: 2024-03-09"));
        assert!(output.contains("Total Sales: $100.00"));
        assert!(output.contains("PURCHASE HISTORY: Priya (2)"));
        assert!(output.contains("ITEM SALES SUMMARY"));
        assert!(output.contains("Total Revenue: $100.00"));
    }

    #[test]
    fn test_add_customer_and_item() {
        let script = concat!(
            "2\n3\nZara\n9000000000\nzara@example.com\nSurat\n5\n",
            "1\n3\n111\nStapler Pins\n12.5\n40\n2\n8\n",
            "5\n",
        );

        let (app, output) = run_script(script);

        assert!(output.contains("Customer added successfully! Customer ID: 11"));
        assert!(output.contains("Item 111 (Stapler Pins) added to catalog!"));
        assert!(output.contains("$12.50"));
        assert_eq!(app.storage.directory().len(), 11);
    }
}
