//! # Session Controller
//!
//! Login, menu dispatch, and the wiring between menus and the store.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                ┌──────────── 5 Back ───────────┐                       │
//! │                ▼                               │                       │
//! │  start ──► MainMenu ── 1 + credentials ──► AdminMenu                   │
//! │              │  ▲                                                       │
//! │              │  └───────── 6 Back ──────────┐                          │
//! │              │                              │                          │
//! │              ├── 2 + name, PIN ─────────► CashierMenu (owns a Cart)    │
//! │              │                                                          │
//! │              └── 3 ──► Exit                                            │
//! │                                                                         │
//! │  Only the PIN picks the cashier; the typed name is just logged.        │
//! │  End of input anywhere behaves like Exit.                              │
//! │  Leaving CashierMenu by any route puts the unsold cart back on shelf.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use till_core::report::{CartTable, InventoryTable};
use till_core::validation::{
    validate_barcode, validate_discount_percent, validate_price, validate_product_name,
    validate_stock,
};
use till_core::{Cart, CashierAccount, CoreError, CoreResult, Invoice, Money, Product};
use till_store::{register, Inventory};
use tracing::{debug, info};

use crate::config::TillConfig;
use crate::error::{CliError, CliResult};
use crate::terminal::Prompter;

const INVALID_CHOICE: &str = "\t\tInvalid Choice!";
const INVALID_CREDENTIALS: &str = "\nInvalid credentials!";
const CHOICE_PROMPT: &str = "\n\t\tPlease Enter your choice: ";

// =============================================================================
// Menu Choices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Admin,
    Cashier,
    Exit,
}

impl MainChoice {
    fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MainChoice::Admin),
            2 => Some(MainChoice::Cashier),
            3 => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminChoice {
    Add,
    Modify,
    Remove,
    View,
    Back,
}

impl AdminChoice {
    fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(AdminChoice::Add),
            2 => Some(AdminChoice::Modify),
            3 => Some(AdminChoice::Remove),
            4 => Some(AdminChoice::View),
            5 => Some(AdminChoice::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CashierChoice {
    AddToCart,
    RemoveFromCart,
    ViewCart,
    ViewInventory,
    Checkout,
    Back,
}

impl CashierChoice {
    fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(CashierChoice::AddToCart),
            2 => Some(CashierChoice::RemoveFromCart),
            3 => Some(CashierChoice::ViewCart),
            4 => Some(CashierChoice::ViewInventory),
            5 => Some(CashierChoice::Checkout),
            6 => Some(CashierChoice::Back),
            _ => None,
        }
    }
}

/// Product fields as the admin typed them.
struct ProductForm {
    name: String,
    price: Money,
    discount: i64,
    stock: i64,
}

// =============================================================================
// Session
// =============================================================================

/// One run of the till, from the main menu to Exit.
pub struct Session<'a, R, W> {
    inventory: &'a mut Inventory,
    config: &'a TillConfig,
    term: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(inventory: &'a mut Inventory, config: &'a TillConfig, input: R, output: W) -> Self {
        Session {
            inventory,
            config,
            term: Prompter::new(input, output),
        }
    }

    /// Runs the main menu until Exit or end of input.
    ///
    /// ## Errors
    /// Only terminal I/O failures. Everything the user can get wrong is
    /// reported on the terminal and the menu continues.
    pub fn run(&mut self) -> CliResult<()> {
        match self.main_loop() {
            Err(CliError::InputClosed) => {
                debug!("Input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> CliResult<()> {
        loop {
            self.term.say("\n\t\t\t Store Management System")?;
            self.term.say("\t\t1) Admin Login")?;
            self.term.say("\t\t2) Cashier Login")?;
            self.term.say("\t\t3) Exit")?;

            match self.read_choice()?.and_then(MainChoice::from_number) {
                Some(MainChoice::Admin) => self.admin_login()?,
                Some(MainChoice::Cashier) => self.cashier_login()?,
                Some(MainChoice::Exit) => {
                    self.term.say("\nThank you for using our system!")?;
                    return Ok(());
                }
                None => self.term.say(INVALID_CHOICE)?,
            }
        }
    }

    /// Reads a menu number. `None` if the token is not an integer.
    fn read_choice(&mut self) -> CliResult<Option<i64>> {
        let token = self.term.ask(CHOICE_PROMPT)?;
        Ok(token.parse().ok())
    }

    // =========================================================================
    // Login
    // =========================================================================

    fn admin_login(&mut self) -> CliResult<()> {
        let email = self.term.ask("\nEnter email: ")?;
        let password = self.term.ask("Enter password: ")?;

        if !self.config.admin.verify(&email, &password) {
            info!(email = %email, "Admin login rejected");
            return self.term.say(INVALID_CREDENTIALS);
        }

        info!(email = %email, "Admin logged in");
        self.admin_loop()
    }

    fn cashier_login(&mut self) -> CliResult<()> {
        let name = self.term.ask_line("\nEnter name: ")?;
        let pin = self.term.ask("Enter PIN (4 digits): ")?;

        let cashier = pin
            .parse::<u32>()
            .ok()
            .and_then(|pin| self.config.find_cashier(pin))
            .cloned();

        let Some(cashier) = cashier else {
            info!(name = %name, "Cashier login rejected");
            return self.term.say(INVALID_CREDENTIALS);
        };

        info!(name = %cashier.name, typed = %name, "Cashier logged in");
        let mut cart = Cart::new();
        let outcome = self.cashier_loop(&cashier, &mut cart);
        register::release_cart(self.inventory, &mut cart);
        outcome
    }

    // =========================================================================
    // Admin Menu
    // =========================================================================

    fn admin_loop(&mut self) -> CliResult<()> {
        loop {
            self.term.say("\n\t\t\t Administrator Menu")?;
            self.term.say("\t\t1) Add new product")?;
            self.term.say("\t\t2) Modify product")?;
            self.term.say("\t\t3) Remove product")?;
            self.term.say("\t\t4) View inventory")?;
            self.term.say("\t\t5) Back to Main menu")?;

            match self.read_choice()?.and_then(AdminChoice::from_number) {
                Some(AdminChoice::Add) => self.add_product()?,
                Some(AdminChoice::Modify) => self.modify_product()?,
                Some(AdminChoice::Remove) => self.remove_product()?,
                Some(AdminChoice::View) => self.show_inventory()?,
                Some(AdminChoice::Back) => return Ok(()),
                None => self.term.say(INVALID_CHOICE)?,
            }
        }
    }

    fn add_product(&mut self) -> CliResult<()> {
        self.term.say("\nEnter product details:")?;
        let name = self.term.ask_line("Name: ")?;
        let barcode = self.term.ask("Barcode: ")?;
        let Some(form) = self.read_form(name, "Initial stock: ")? else {
            return Ok(());
        };

        let product = match build_product(form, barcode) {
            Ok(product) => product,
            Err(e) => return self.term.say(format!("\n{}", e)),
        };

        self.inventory.add(product);
        self.term.say("\nProduct added successfully!")?;
        self.warn_if_stale()
    }

    fn modify_product(&mut self) -> CliResult<()> {
        self.show_inventory()?;
        let barcode = self.term.ask("\nEnter product barcode to modify: ")?;

        self.term.say("\nEnter new product details:")?;
        let name = self.term.ask_line("Name: ")?;
        let Some(form) = self.read_form(name, "Stock: ")? else {
            return Ok(());
        };

        let product = match build_product(form, barcode.clone()) {
            Ok(product) => product,
            Err(e) => return self.term.say(format!("\n{}", e)),
        };

        if self.inventory.modify(&barcode, product) {
            self.term.say("\nProduct modified successfully!")?;
        } else {
            self.term.say("\nProduct not found!")?;
        }
        self.warn_if_stale()
    }

    fn remove_product(&mut self) -> CliResult<()> {
        self.show_inventory()?;
        let barcode = self.term.ask("\nEnter product barcode to remove: ")?;

        match self.inventory.remove(&barcode) {
            Some(_) => self.term.say("\nProduct removed successfully!")?,
            None => self.term.say("\nProduct not found!")?,
        }
        self.warn_if_stale()
    }

    /// Reads price, discount and stock after the name and barcode.
    fn read_form(&mut self, name: String, stock_label: &str) -> CliResult<Option<ProductForm>> {
        let Some(price) = self.term.ask_parsed::<Money>("Price: ", "price")? else {
            return Ok(None);
        };
        let Some(discount) = self.term.ask_parsed::<i64>("Discount (%): ", "discount")? else {
            return Ok(None);
        };
        let Some(stock) = self.term.ask_parsed::<i64>(stock_label, "stock")? else {
            return Ok(None);
        };

        Ok(Some(ProductForm {
            name,
            price,
            discount,
            stock,
        }))
    }

    fn show_inventory(&mut self) -> CliResult<()> {
        self.term.say(InventoryTable(self.inventory.list()))
    }

    fn warn_if_stale(&mut self) -> CliResult<()> {
        if self.inventory.is_stale() {
            self.term.say("Warning: the inventory file could not be saved. Changes are kept in memory.")?;
        }
        Ok(())
    }

    // =========================================================================
    // Cashier Menu
    // =========================================================================

    fn cashier_loop(&mut self, cashier: &CashierAccount, cart: &mut Cart) -> CliResult<()> {
        loop {
            self.term.say("\n\t\t\t Cashier Menu")?;
            self.term.say("\t\t1) Add product to cart")?;
            self.term.say("\t\t2) Remove product from cart")?;
            self.term.say("\t\t3) View current cart")?;
            self.term.say("\t\t4) View inventory")?;
            self.term.say("\t\t5) Generate invoice")?;
            self.term.say("\t\t6) Back to Main menu")?;

            match self.read_choice()?.and_then(CashierChoice::from_number) {
                Some(CashierChoice::AddToCart) => self.scan_item(cart)?,
                Some(CashierChoice::RemoveFromCart) => self.unscan_item(cart)?,
                Some(CashierChoice::ViewCart) => self.term.say(CartTable(cart))?,
                Some(CashierChoice::ViewInventory) => self.show_inventory()?,
                Some(CashierChoice::Checkout) => self.checkout(cashier, cart)?,
                Some(CashierChoice::Back) => return Ok(()),
                None => self.term.say(INVALID_CHOICE)?,
            }
        }
    }

    fn scan_item(&mut self, cart: &mut Cart) -> CliResult<()> {
        self.show_inventory()?;
        let barcode = self.term.ask("\nEnter product barcode: ")?;

        match register::add_to_cart(self.inventory, cart, &barcode) {
            Ok(_) => self.term.say("\nProduct added to cart successfully!"),
            Err(CoreError::OutOfStock { .. }) => self.term.say("\nProduct out of stock!"),
            Err(_) => self.term.say("\nProduct not found in inventory!"),
        }
    }

    fn unscan_item(&mut self, cart: &mut Cart) -> CliResult<()> {
        let barcode = self.term.ask("\nEnter product barcode to remove: ")?;

        match register::remove_from_cart(self.inventory, cart, &barcode) {
            Ok(_) => self.term.say("\nProduct removed from cart successfully!"),
            Err(_) => self.term.say("\nProduct not found in cart!"),
        }
    }

    fn checkout(&mut self, cashier: &CashierAccount, cart: &mut Cart) -> CliResult<()> {
        let invoice = match Invoice::new(cart, cashier) {
            Ok(invoice) => invoice,
            Err(_) => return self.term.say("\nCart is empty! Cannot generate invoice."),
        };
        let invoice = match self.config.store_name() {
            Some(store) => invoice.with_store_name(store),
            None => invoice,
        };

        self.term.say("")?;
        self.term.say(invoice.render())?;
        info!(cashier = %cashier.name, items = cart.len(), total = %cart.total(), "Invoice issued");
        cart.clear();
        self.term.say("\nInvoice generated successfully!")
    }
}

/// Checks every typed field and assembles the product.
fn build_product(form: ProductForm, barcode: String) -> CoreResult<Product> {
    validate_product_name(&form.name)?;
    validate_barcode(&barcode)?;
    validate_price(form.price)?;
    let discount = validate_discount_percent(form.discount)?;
    let stock = validate_stock(form.stock)?;

    Ok(Product::new(form.name, barcode, form.price, discount, stock))
}
