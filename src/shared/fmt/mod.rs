//! Human-readable display formatting for prices, percentages, and market figures.

pub mod decimal;
pub mod num;

pub use decimal::{
    format_currency, format_large_number, format_percentage, format_price, percent_change,
    price_decimal_places,
};
pub use num::truncate_text;
