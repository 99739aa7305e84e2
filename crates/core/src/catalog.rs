//! In-memory product catalog and the demo seed data.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CatalogConfig;
use crate::domain::product::{Product, ProductId};
use crate::errors::CatalogError;

#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    rating: f64,
    users_purchased: u64,
    price: f64,
    image_src: &'static str,
}

const DEMO_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "1",
        name: "Premium Watch",
        category: "Watches",
        rating: 4.8,
        users_purchased: 1200,
        price: 299.99,
        image_src: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=300",
    },
    ProductSeed {
        id: "2",
        name: "Designer Sunglasses",
        category: "Eyewear",
        rating: 4.5,
        users_purchased: 850,
        price: 149.99,
        image_src: "https://images.unsplash.com/photo-1577803645773-f96470509666?w=300",
    },
    ProductSeed {
        id: "3",
        name: "Leather Wallet",
        category: "Accessories",
        rating: 4.6,
        users_purchased: 1500,
        price: 79.99,
        image_src: "https://images.unsplash.com/photo-1627123424574-724758594e93?w=300",
    },
    ProductSeed {
        id: "4",
        name: "Wireless Earbuds",
        category: "Audio",
        rating: 4.7,
        users_purchased: 2000,
        price: 129.99,
        image_src: "https://images.unsplash.com/photo-1606220588913-b3aacb4d2f46?w=300",
    },
    ProductSeed {
        id: "5",
        name: "Smartphone Pro",
        category: "Smartphones",
        rating: 4.9,
        users_purchased: 3000,
        price: 999.99,
        image_src: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=300",
    },
    ProductSeed {
        id: "6",
        name: "Running Shoes",
        category: "Shoes",
        rating: 4.4,
        users_purchased: 1800,
        price: 119.99,
        image_src: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=300",
    },
    ProductSeed {
        id: "7",
        name: "Leather Handbag",
        category: "Bags",
        rating: 4.6,
        users_purchased: 1200,
        price: 249.99,
        image_src: "https://images.unsplash.com/photo-1584917865442-de89df76afd3?w=300",
    },
    ProductSeed {
        id: "8",
        name: "Tablet Ultra",
        category: "Electronics",
        rating: 4.7,
        users_purchased: 1500,
        price: 699.99,
        image_src: "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=300",
    },
    ProductSeed {
        id: "9",
        name: "Smart Speaker",
        category: "Electronics",
        rating: 4.3,
        users_purchased: 2200,
        price: 89.99,
        image_src: "https://images.unsplash.com/photo-1589256469067-ea99122bbdc9?w=300",
    },
    ProductSeed {
        id: "10",
        name: "Dress Shoes",
        category: "Shoes",
        rating: 4.5,
        users_purchased: 900,
        price: 159.99,
        image_src: "https://images.unsplash.com/photo-1560343090-f0409e92791a?w=300",
    },
    ProductSeed {
        id: "11",
        name: "Laptop Pro",
        category: "Electronics",
        rating: 4.8,
        users_purchased: 1800,
        price: 1299.99,
        image_src: "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=300",
    },
    ProductSeed {
        id: "12",
        name: "Backpack",
        category: "Bags",
        rating: 4.4,
        users_purchased: 1600,
        price: 59.99,
        image_src: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=300",
    },
];

impl From<&ProductSeed> for Product {
    fn from(seed: &ProductSeed) -> Self {
        Product {
            id: ProductId::from(seed.id),
            name: seed.name.to_owned(),
            category: seed.category.to_owned(),
            rating: seed.rating,
            users_purchased: seed.users_purchased,
            price: seed.price,
            image_src: seed.image_src.to_owned(),
            similarity_score: None,
        }
    }
}

/// Ordered, immutable collection of products.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The twelve-item demo catalog.
    pub fn demo() -> Self {
        Self::new(DEMO_SEEDS.iter().map(Product::from).collect())
    }

    /// Parses a JSON array of product records and rejects duplicate ids.
    pub fn from_json_str(raw: &str, origin: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(raw)
            .map_err(|source| CatalogError::Parse { path: origin.into(), source })?;

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateProductId(product.id.0.clone()));
            }
        }

        Ok(Self::new(products))
    }

    pub fn load_json(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw, path)
    }

    /// Loads the configured JSON catalog, falling back to the demo catalog.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        match &config.path {
            Some(path) => Self::load_json(path),
            None => Ok(Self::demo()),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id.as_str() == product_id)
    }

    /// Distinct categories in first-occurrence order.
    pub fn list_categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|product| seen.insert(product.category.as_str()))
            .map(|product| product.category.clone())
            .collect()
    }

    /// Products whose category equals `category` exactly (case-sensitive).
    pub fn filter_by_category(&self, category: &str) -> Vec<Product> {
        self.products.iter().filter(|product| product.category == category).cloned().collect()
    }
}
