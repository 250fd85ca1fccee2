//! Catalog seed data for local development.

use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use tracing::info;

use super::CommandError;

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    // (mantissa, scale) for Decimal::new
    price: (i64, u32),
    category: &'static str,
    best_seller: bool,
    sizes: &'static [(&'static str, i32)],
    colors: &'static [(&'static str, &'static str)],
    images: &'static [&'static str],
}

const STANDARD_SIZES: &[(&str, i32)] = &[("S", 20), ("M", 30), ("L", 30), ("XL", 15)];

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Classic Crew Tee",
        description: "Midweight combed cotton tee with a ribbed crew neck.",
        price: (79_900, 2),
        category: "T-Shirts",
        best_seller: true,
        sizes: STANDARD_SIZES,
        colors: &[("Black", "#000000"), ("White", "#ffffff"), ("Olive", "#556b2f")],
        images: &["/images/classic-crew-front.jpg", "/images/classic-crew-back.jpg"],
    },
    SeedProduct {
        name: "Oversized Hoodie",
        description: "Heavy fleece hoodie with a dropped shoulder fit.",
        price: (189_900, 2),
        category: "Hoodies",
        best_seller: true,
        sizes: STANDARD_SIZES,
        colors: &[("Charcoal", "#36454f"), ("Sand", "#c2b280")],
        images: &["/images/oversized-hoodie.jpg"],
    },
    SeedProduct {
        name: "Relaxed Chinos",
        description: "Garment-dyed cotton twill with a tapered leg.",
        price: (159_900, 2),
        category: "Pants",
        best_seller: false,
        sizes: &[("30", 10), ("32", 18), ("34", 18), ("36", 8)],
        colors: &[("Khaki", "#c3b091"), ("Navy", "#000080")],
        images: &["/images/relaxed-chinos.jpg"],
    },
    SeedProduct {
        name: "Boxy Overshirt",
        description: "Brushed flannel overshirt with chest pockets.",
        price: (219_900, 2),
        category: "Shirts",
        best_seller: false,
        sizes: STANDARD_SIZES,
        colors: &[("Rust", "#b7410e")],
        images: &["/images/boxy-overshirt.jpg"],
    },
];

/// Insert the sample catalog.
///
/// Intended for a fresh database; re-running duplicates products.
///
/// # Errors
///
/// Returns `CommandError` if any insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    let mut tx = pool.begin().await?;
    for product in SEED_PRODUCTS {
        insert_product(&mut tx, product).await?;
    }
    tx.commit().await?;

    info!(count = SEED_PRODUCTS.len(), "Catalog seeded");
    pool.close().await;
    Ok(())
}

async fn insert_product(
    tx: &mut Transaction<'_, Postgres>,
    product: &SeedProduct,
) -> Result<(), CommandError> {
    let (mantissa, scale) = product.price;
    let (product_id,): (i32,) = sqlx::query_as(
        r"
        INSERT INTO products (name, description, price, category, best_seller)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        ",
    )
    .bind(product.name)
    .bind(product.description)
    .bind(Decimal::new(mantissa, scale))
    .bind(product.category)
    .bind(product.best_seller)
    .fetch_one(&mut **tx)
    .await?;

    for (size, stock) in product.sizes {
        sqlx::query("INSERT INTO product_sizes (product_id, size, stock) VALUES ($1, $2, $3)")
            .bind(product_id)
            .bind(size)
            .bind(stock)
            .execute(&mut **tx)
            .await?;
    }

    for (name, hex) in product.colors {
        sqlx::query("INSERT INTO product_colors (product_id, name, hex) VALUES ($1, $2, $3)")
            .bind(product_id)
            .bind(name)
            .bind(hex)
            .execute(&mut **tx)
            .await?;
    }

    for (position, url) in product.images.iter().enumerate() {
        sqlx::query(
            "INSERT INTO product_images (product_id, url, position) VALUES ($1, $2, $3)",
        )
        .bind(product_id)
        .bind(url)
        .bind(i32::try_from(position).unwrap_or(i32::MAX))
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
