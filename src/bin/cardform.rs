//! Command-line front end for the payment form engine.
//!
//! # Usage
//!
//! ```bash
//! # Brand guess from the leading digits
//! cardform detect 4012
//!
//! # Full check, as on submit
//! cardform validate "4012 8888 8888 1881" --output json
//!
//! # Regroup a field after an edit
//! cardform reformat "4012 88838" --cursor 9 --previous "4012 8888" --previous-cursor 8
//!
//! # Other field checks
//! cardform email someone@testing.com
//! cardform cvv 1234 --brand amex
//! cardform expiry 06/30
//!
//! # Test numbers
//! cardform generate --brand jcb --count 3
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::process::ExitCode;

use cardform::{
    cvv, diagnose, email, expiry, format, generate, mask_string, reformat, required_length,
    validate, CardBrand, FormatOutcome,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardform")]
#[command(author, version, about = "Card number, CVV, expiry and email checks for checkout forms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the card brand from the first four digits
    Detect {
        /// Card number (or partial number)
        card_number: String,
    },

    /// Validate a card number (spaces allowed)
    Validate {
        /// Card number to validate
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Group a card number for display
    Format {
        /// Card number to format
        card_number: String,
    },

    /// Regroup a card number field after an edit, keeping the caret in place
    Reformat {
        /// Field contents after the edit
        text: String,

        /// Caret position after the edit
        #[arg(short, long)]
        cursor: usize,

        /// Field contents before the edit
        #[arg(long, default_value = "")]
        previous: String,

        /// Caret position before the edit
        #[arg(long, default_value = "0")]
        previous_cursor: usize,
    },

    /// Check an email address
    Email {
        /// Address to check
        address: String,
    },

    /// Validate a CVV for a card brand
    Cvv {
        /// CVV to validate
        cvv: String,

        /// Card brand (Amex takes 4 digits, others 3)
        #[arg(short, long)]
        brand: BrandArg,
    },

    /// Validate an expiry date (MM/YY or MM/YYYY)
    Expiry {
        /// Expiry date
        date: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card brand to generate
        #[arg(short, long, default_value = "visa")]
        brand: BrandArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output grouped with spaces
        #[arg(short, long)]
        formatted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum BrandArg {
    Visa,
    Mastercard,
    Amex,
    Discover,
    DinersClub,
    Jcb,
}

impl From<BrandArg> for CardBrand {
    fn from(arg: BrandArg) -> Self {
        match arg {
            BrandArg::Visa => CardBrand::Visa,
            BrandArg::Mastercard => CardBrand::Mastercard,
            BrandArg::Amex => CardBrand::Amex,
            BrandArg::Discover => CardBrand::Discover,
            BrandArg::DinersClub => CardBrand::DinersClub,
            BrandArg::Jcb => CardBrand::Jcb,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Detect { card_number } => cmd_detect(&card_number),
        Commands::Validate {
            card_number,
            output,
        } => cmd_validate(&card_number, output),
        Commands::Format { card_number } => cmd_format(&card_number),
        Commands::Reformat {
            text,
            cursor,
            previous,
            previous_cursor,
        } => cmd_reformat(&text, cursor, &previous, previous_cursor),
        Commands::Email { address } => cmd_email(&address),
        Commands::Cvv { cvv, brand } => cmd_cvv(&cvv, brand.into()),
        Commands::Expiry { date } => cmd_expiry(&date),
        Commands::Generate {
            brand,
            count,
            formatted,
        } => cmd_generate(brand.into(), count, formatted),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_detect(card_number: &str) -> bool {
    let brand = cardform::detect_brand(card_number);
    println!("Detected Brand: {}", brand);
    println!("Icon: {}", brand.icon());
    if brand.is_recognized() {
        println!("Length: {}", required_length(brand));
        println!("CVV Length: {}", cvv::cvv_length_for_brand(brand));
    }
    brand.is_recognized()
}

fn cmd_validate(card_number: &str, output: OutputFormat) -> bool {
    let verdict = validate(card_number);
    let issue = diagnose(card_number);

    match output {
        OutputFormat::Text => {
            println!("Valid: {}", if verdict.overall { "yes" } else { "no" });
            println!("Brand: {}", verdict.brand);
            println!("Length OK: {}", verdict.length_ok);
            println!("Pattern OK: {}", verdict.pattern_ok);
            println!("Luhn OK: {}", verdict.luhn_ok);
            println!("Masked: {}", mask_string(card_number));
            if let Some(e) = &issue {
                println!("Error: {}", e);
            }
        }
        OutputFormat::Json => {
            let body = json!({
                "valid": verdict.overall,
                "brand": verdict.brand.name(),
                "length_ok": verdict.length_ok,
                "pattern_ok": verdict.pattern_ok,
                "luhn_ok": verdict.luhn_ok,
                "masked": mask_string(card_number),
                "error": issue.map(|e| e.to_string()),
            });
            println!("{}", body);
        }
    }

    verdict.overall
}

fn cmd_format(card_number: &str) -> bool {
    println!("{}", format::format_card_number(card_number));
    true
}

fn cmd_reformat(text: &str, cursor: usize, previous: &str, previous_cursor: usize) -> bool {
    let outcome = reformat(text, cursor, previous, previous_cursor);
    let body = match &outcome {
        FormatOutcome::Formatted(f) => json!({
            "reverted": false,
            "text": f.text,
            "cursor": f.cursor,
            "brand": f.brand.name(),
            "icon": f.icon(),
            "cvv_length": f.cvv_length(),
        }),
        FormatOutcome::Reverted(s) => json!({
            "reverted": true,
            "text": s.text,
            "cursor": s.cursor,
        }),
    };
    println!("{}", body);
    !outcome.is_reverted()
}

fn cmd_email(address: &str) -> bool {
    let valid = email::validate(address);
    println!("Valid: {}", if valid { "yes" } else { "no" });
    valid
}

fn cmd_cvv(cvv_input: &str, brand: CardBrand) -> bool {
    match cvv::validate_cvv_for_brand(cvv_input, brand) {
        Ok(validated) => {
            println!("Valid: yes");
            println!("Length: {} digits", validated.length());
            true
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            println!("Hint: {}", cvv::cvv_hint(brand));
            false
        }
    }
}

fn cmd_expiry(date: &str) -> bool {
    match expiry::validate_expiry(date) {
        Ok(exp) => {
            println!("Valid: yes");
            println!("Month: {}", exp.expiry_month());
            println!("Year: {}", exp.expiry_year_short());
            true
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            false
        }
    }
}

fn cmd_generate(brand: CardBrand, count: usize, formatted: bool) -> bool {
    for number in generate::generate_cards(brand, count) {
        if formatted {
            println!("{}", format::format_for_brand(&number, brand));
        } else {
            println!("{}", number);
        }
    }
    true
}
