//! Products
//!
//! Read-only menu items handed over by the content collaborator. A product is sold either at a
//! single price or in a number of sizes, each with its own price.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Product identifier, stable across all sizes of the product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a product identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size or diameter label distinguishing variants of one product (e.g. `"30cm"`, `"medium"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantKey(String);

impl VariantKey {
    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariantKey {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for VariantKey {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors resolving the price of a product variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// A size must be chosen before the product can be added.
    #[error("Product {0} requires a size selection")]
    VariantRequired(ProductId),

    /// The requested size is not sold for this product.
    #[error("Product {product} has no size {variant}")]
    UnknownVariant {
        /// Product the size was requested for
        product: ProductId,
        /// Requested size
        variant: String,
    },

    /// A size was given for a product sold at a single price.
    #[error("Product {product} is not sold in sizes, got {variant}")]
    VariantNotOffered {
        /// Product the size was requested for
        product: ProductId,
        /// Requested size
        variant: String,
    },

    /// A sized product lists no sizes.
    #[error("Product {0} has no prices")]
    NoPrices(ProductId),
}

/// Price of one size of a product.
#[derive(Clone, Debug, PartialEq)]
pub struct SizePrice<'a> {
    /// Size label
    pub variant: VariantKey,

    /// Price of this size
    pub price: Money<'a, Currency>,
}

/// How a product is priced.
#[derive(Clone, Debug, PartialEq)]
pub enum Pricing<'a> {
    /// One price, no size selection.
    Single(Money<'a, Currency>),

    /// One price per size, in display order.
    Sized(SmallVec<[SizePrice<'a>; 4]>),
}

impl<'a> Pricing<'a> {
    /// Iterate over every price this product can be sold at.
    pub fn prices(&self) -> impl Iterator<Item = &Money<'a, Currency>> {
        let (single, sized) = match self {
            Pricing::Single(price) => (Some(price), None),
            Pricing::Sized(sizes) => (None, Some(sizes.iter().map(|size| &size.price))),
        };

        single.into_iter().chain(sized.into_iter().flatten())
    }
}

/// Menu item
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Menu category, used by presentation code for filtering
    pub category: Option<String>,

    /// Product pricing
    pub pricing: Pricing<'a>,

    /// Whether a size must be picked explicitly before adding to the cart.
    ///
    /// Supplied by the content collaborator. Sized products without this flag fall back to
    /// their first size on quick-add.
    pub requires_variant_selection: bool,
}

impl<'a> MenuItem<'a> {
    /// Resolves the size and unit price to add to a cart.
    ///
    /// # Errors
    ///
    /// - [`ProductError::VariantRequired`]: no size given, but the product requires one.
    /// - [`ProductError::UnknownVariant`]: the size is not sold for this product.
    /// - [`ProductError::VariantNotOffered`]: a size was given for a single-price product.
    /// - [`ProductError::NoPrices`]: the product lists no sizes.
    pub fn unit_price(
        &self,
        variant: Option<&str>,
    ) -> Result<(Option<&VariantKey>, Money<'a, Currency>), ProductError> {
        match (&self.pricing, variant) {
            (Pricing::Single(price), None) => Ok((None, *price)),
            (Pricing::Single(_), Some(variant)) => Err(ProductError::VariantNotOffered {
                product: self.id,
                variant: variant.to_string(),
            }),
            (Pricing::Sized(sizes), Some(variant)) => sizes
                .iter()
                .find(|size| size.variant.as_str() == variant)
                .map(|size| (Some(&size.variant), size.price))
                .ok_or_else(|| ProductError::UnknownVariant {
                    product: self.id,
                    variant: variant.to_string(),
                }),
            (Pricing::Sized(_), None) if self.requires_variant_selection => {
                Err(ProductError::VariantRequired(self.id))
            }
            (Pricing::Sized(sizes), None) => sizes
                .first()
                .map(|size| (Some(&size.variant), size.price))
                .ok_or(ProductError::NoPrices(self.id)),
        }
    }

    /// Iterate over the sizes this product is sold in; empty for single-price products.
    pub fn variants(&self) -> impl Iterator<Item = &VariantKey> {
        let sizes = match &self.pricing {
            Pricing::Single(_) => None,
            Pricing::Sized(sizes) => Some(sizes.iter().map(|size| &size.variant)),
        };

        sizes.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn margherita<'a>(requires_variant_selection: bool) -> MenuItem<'a> {
        MenuItem {
            id: ProductId::new(1),
            name: "Margherita".to_string(),
            category: Some("pizza".to_string()),
            pricing: Pricing::Sized(smallvec![
                SizePrice {
                    variant: VariantKey::from("small"),
                    price: Money::from_minor(850, EUR),
                },
                SizePrice {
                    variant: VariantKey::from("medium"),
                    price: Money::from_minor(1050, EUR),
                },
            ]),
            requires_variant_selection,
        }
    }

    fn cola<'a>() -> MenuItem<'a> {
        MenuItem {
            id: ProductId::new(20),
            name: "Cola".to_string(),
            category: Some("drinks".to_string()),
            pricing: Pricing::Single(Money::from_minor(250, EUR)),
            requires_variant_selection: false,
        }
    }

    #[test]
    fn single_price_without_variant() -> TestResult {
        let item = cola();

        let (variant, price) = item.unit_price(None)?;

        assert_eq!(variant, None);
        assert_eq!(price, Money::from_minor(250, EUR));

        Ok(())
    }

    #[test]
    fn single_price_rejects_variant() {
        let item = cola();

        assert_eq!(
            item.unit_price(Some("large")),
            Err(ProductError::VariantNotOffered {
                product: ProductId::new(20),
                variant: "large".to_string(),
            })
        );
    }

    #[test]
    fn sized_price_by_variant() -> TestResult {
        let item = margherita(true);

        let (variant, price) = item.unit_price(Some("medium"))?;

        assert_eq!(variant.map(VariantKey::as_str), Some("medium"));
        assert_eq!(price, Money::from_minor(1050, EUR));

        Ok(())
    }

    #[test]
    fn sized_price_unknown_variant() {
        let item = margherita(true);

        assert!(matches!(
            item.unit_price(Some("family")),
            Err(ProductError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn sized_price_requires_selection() {
        let item = margherita(true);

        assert_eq!(
            item.unit_price(None),
            Err(ProductError::VariantRequired(ProductId::new(1)))
        );
    }

    #[test]
    fn quick_add_uses_first_size() -> TestResult {
        let item = margherita(false);

        let (variant, price) = item.unit_price(None)?;

        assert_eq!(variant.map(VariantKey::as_str), Some("small"));
        assert_eq!(price, Money::from_minor(850, EUR));

        Ok(())
    }

    #[test]
    fn empty_sizes_have_no_price() {
        let item = MenuItem {
            pricing: Pricing::Sized(SmallVec::new()),
            ..margherita(false)
        };

        assert_eq!(
            item.unit_price(None),
            Err(ProductError::NoPrices(ProductId::new(1)))
        );
    }

    #[test]
    fn variants_lists_sizes_in_order() {
        let sized = margherita(true);
        let single = cola();

        let labels: Vec<&str> = sized.variants().map(VariantKey::as_str).collect();

        assert_eq!(labels, vec!["small", "medium"]);
        assert_eq!(single.variants().count(), 0);
    }

    #[test]
    fn prices_cover_every_size() {
        let item = margherita(true);

        let minor: Vec<i64> = item.pricing.prices().map(Money::to_minor_units).collect();

        assert_eq!(minor, vec![850, 1050]);
    }
}
