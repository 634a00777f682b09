use crate::domain::product::Product;
use crate::listing::Paginated;

/// Data required to render the products page.
pub struct ProductsPageData {
    /// Paginated window of the filtered inventory.
    pub products: Paginated<Product>,
    /// Combined profit over all of the user's products, independent of the
    /// current search text and page.
    pub total_profit: f64,
}
