//! # Register Operations
//!
//! Moving products between the shelf (Inventory) and a cart.
//!
//! ## Stock Accounting
//! ```text
//!   add_to_cart       shelf stock - 1   cart gets a snapshot
//!   remove_from_cart  shelf stock + 1   cart loses its snapshot
//!   release_cart      shelf stock + n   cart emptied
//!   checkout          (nothing)         cart emptied, stock stays sold
//! ```
//!
//! A snapshot keeps the price and discount the product had when it was
//! scanned. Modifying the product afterwards does not reprice the cart.

use till_core::{Cart, CoreError, CoreResult, Product};
use tracing::{debug, info};

use crate::inventory::Inventory;

/// Scans one unit of a product into the cart.
///
/// ## Errors
/// - `ProductNotFound` if no product has this barcode
/// - `OutOfStock` if its stock is zero (the cart is not touched)
///
/// ## Returns
/// The snapshot that was pushed to the cart.
pub fn add_to_cart(inventory: &mut Inventory, cart: &mut Cart, barcode: &str) -> CoreResult<Product> {
    let snapshot = inventory.take_one(barcode)?;
    cart.add_item(snapshot.clone());
    debug!(barcode = %barcode, total = %cart.total(), "Added to cart");
    Ok(snapshot)
}

/// Takes one unit back out of the cart and returns it to the shelf.
///
/// If the product was deleted from the catalog in the meantime, the cart
/// item is still dropped and there is no shelf to return it to.
///
/// ## Errors
/// `NotInCart` if the cart holds no item with this barcode.
pub fn remove_from_cart(inventory: &mut Inventory, cart: &mut Cart, barcode: &str) -> CoreResult<Product> {
    let removed = cart
        .remove_item(barcode)
        .ok_or_else(|| CoreError::NotInCart(barcode.to_string()))?;

    match inventory.restock_one(barcode) {
        Ok(()) => {}
        Err(CoreError::ProductNotFound(_)) => {
            debug!(barcode = %barcode, "Removed item no longer in catalog, not restocked");
        }
        Err(e) => return Err(e),
    }

    debug!(barcode = %barcode, total = %cart.total(), "Removed from cart");
    Ok(removed)
}

/// Returns every cart item to the shelf and empties the cart.
///
/// Used when a cashier walks away from a cart without checking out.
///
/// ## Returns
/// How many items went back on the shelf.
pub fn release_cart(inventory: &mut Inventory, cart: &mut Cart) -> usize {
    let mut returned = 0;
    for item in cart.items() {
        if inventory.restock_one(&item.barcode).is_ok() {
            returned += 1;
        }
    }

    if !cart.is_empty() {
        info!(items = cart.len(), returned, "Released abandoned cart");
    }
    cart.clear();
    returned
}
