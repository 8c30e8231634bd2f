//! # Catalog Line Format
//!
//! One product per line, five comma-separated fields:
//!
//! ```text
//! name,barcode,price,discount,stock
//! Widget,W1,10.00,10,2
//! Milk, whole 1L,MLK-1,1.49,0,40      ← name keeps its comma
//! ```
//!
//! ## Decoding From The Right
//! There is no escaping. The four trailing fields never contain a comma
//! (barcodes are validated, the rest are numbers), so a line is split from the
//! right and whatever is left of the barcode is the name.
//!
//! ## Prices
//! Written as `10.00`. Older catalogs may hold extra decimals (`3.33333`) or
//! exponent notation for large amounts (`1.23457e+06`); both are read and
//! rounded to the cent.

use till_core::validation::{validate_discount_percent, validate_price};
use till_core::{Money, Product, FIELD_SEPARATOR, MAX_PRICE_CENTS};

use crate::error::{StoreError, StoreResult};

/// Encodes a product as one catalog line (without the newline).
pub fn encode_product(product: &Product) -> String {
    format!(
        "{name}{sep}{barcode}{sep}{price}{sep}{discount}{sep}{stock}",
        name = product.name,
        barcode = product.barcode,
        price = product.price.to_decimal_string(),
        discount = product.discount.percent(),
        stock = product.stock,
        sep = FIELD_SEPARATOR,
    )
}

/// Encodes the whole catalog, one line per product, each ending in `\n`.
pub fn encode_catalog(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| encode_product(p) + "\n")
        .collect()
}

/// Decodes one catalog line.
///
/// `line_no` is 1-based and only used in error messages.
pub fn decode_line(line: &str, line_no: usize) -> StoreResult<Product> {
    let line = line.trim_end_matches('\r');

    let mut fields = line.rsplitn(4, FIELD_SEPARATOR);
    let stock = fields.next();
    let discount = fields.next();
    let price = fields.next();
    let head = fields.next();

    let (Some(stock), Some(discount), Some(price), Some(head)) = (stock, discount, price, head)
    else {
        return Err(StoreError::malformed(line_no, "expected 5 comma-separated fields"));
    };
    let Some((name, barcode)) = head.rsplit_once(FIELD_SEPARATOR) else {
        return Err(StoreError::malformed(line_no, "expected 5 comma-separated fields"));
    };

    if barcode.is_empty() {
        return Err(StoreError::malformed(line_no, "barcode is empty"));
    }

    let price = decode_price(price.trim())
        .map_err(|reason| StoreError::malformed(line_no, format!("price: {}", reason)))?;
    validate_price(price).map_err(|e| StoreError::malformed(line_no, e.to_string()))?;

    let discount = discount
        .trim()
        .parse::<i64>()
        .map_err(|e| StoreError::malformed(line_no, format!("discount: {}", e)))
        .and_then(|pct| {
            validate_discount_percent(pct)
                .map_err(|e| StoreError::malformed(line_no, e.to_string()))
        })?;

    let stock = stock
        .trim()
        .parse::<u32>()
        .map_err(|e| StoreError::malformed(line_no, format!("stock: {}", e)))?;

    Ok(Product::new(name, barcode, price, discount, stock))
}

/// Reads a price field, falling back to exponent notation.
fn decode_price(text: &str) -> Result<Money, String> {
    let err = match text.parse::<Money>() {
        Ok(price) => return Ok(price),
        Err(e) => e.to_string(),
    };
    if !text.contains(['e', 'E']) {
        return Err(err);
    }

    let value: f64 = text.parse().map_err(|_| err)?;
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents.abs() > MAX_PRICE_CENTS as f64 {
        return Err(format!("'{}' is out of range", text));
    }
    Ok(Money::from_cents(cents as i64))
}

/// Decodes a whole catalog.
///
/// Blank lines are ignored. Lines that fail to decode are returned alongside
/// the products that did, so the caller decides whether to warn or fail.
pub fn decode_catalog(text: &str) -> (Vec<Product>, Vec<StoreError>) {
    let mut products = Vec::new();
    let mut rejected = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line, index + 1) {
            Ok(product) => products.push(product),
            Err(e) => rejected.push(e),
        }
    }

    (products, rejected)
}
