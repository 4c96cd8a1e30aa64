//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod promo;
pub mod shipping;

use clap::{Args, Subcommand, ValueEnum};
use devmobile_commerce::cart::ShippingMethod;
use devmobile_commerce::checkout::PaymentMethod;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID or slug.
        product: String,

        /// Number of units.
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        qty: i64,

        /// Selected option, e.g. a color or storage size (repeatable).
        #[arg(short, long = "option")]
        options: Vec<String>,
    },
    /// Remove a line from the cart.
    Remove {
        /// Product ID.
        product: String,
    },
    /// Set a line's quantity; 0 or less removes it.
    SetQty {
        /// Product ID.
        product: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the promo command.
#[derive(Args)]
pub struct PromoArgs {
    /// Promo code; leave empty to clear the current one.
    #[arg(default_value = "")]
    pub code: String,
}

/// Shipping method choice.
#[derive(Clone, Copy, ValueEnum)]
pub enum ShippingChoice {
    Standard,
    Express,
}

impl From<ShippingChoice> for ShippingMethod {
    fn from(choice: ShippingChoice) -> Self {
        match choice {
            ShippingChoice::Standard => ShippingMethod::Standard,
            ShippingChoice::Express => ShippingMethod::Express,
        }
    }
}

/// Arguments for the shipping command.
#[derive(Args)]
pub struct ShippingArgs {
    /// Shipping method; shows the options when omitted.
    #[arg(value_enum)]
    pub method: Option<ShippingChoice>,
}

/// Payment method choice.
#[derive(Clone, Copy, ValueEnum)]
pub enum PaymentChoice {
    Card,
    Paypal,
}

impl From<PaymentChoice> for PaymentMethod {
    fn from(choice: PaymentChoice) -> Self {
        match choice {
            PaymentChoice::Card => PaymentMethod::Card,
            PaymentChoice::Paypal => PaymentMethod::Paypal,
        }
    }
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Street and number.
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Shipping method (default: keep the cart's).
    #[arg(long, value_enum)]
    pub shipping: Option<ShippingChoice>,

    /// Payment method.
    #[arg(long, value_enum, default_value = "card")]
    pub payment: PaymentChoice,

    /// Skip prompts; missing details fail validation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show one category (phones, accessories).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Show details for one product (ID or slug).
    #[arg(long)]
    pub product: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
