use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductPage, Purchase};
use crate::query::{COLUMNS, ListFilter, build_list_query};
use crate::repository::ProductRepository;

/// PostgreSQL implementation of ProductRepository using SeaORM raw statements
#[derive(Clone)]
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i64,
    uid: Uuid,
    user_id: i64,
    name: String,
    price: i64,
    image_url: String,
    stock: i64,
    condition: String,
    tags: Vec<String>,
    is_purchasable: bool,
    purchase_count: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let condition = row.condition.parse().map_err(|_| {
            ProductError::Internal(format!("Unknown product condition: {}", row.condition))
        })?;

        Ok(Product {
            id: row.id,
            uid: row.uid,
            user_id: row.user_id,
            name: row.name,
            price: row.price,
            image_url: row.image_url,
            stock: row.stock,
            condition,
            tags: row.tags,
            is_purchasable: row.is_purchasable,
            purchase_count: row.purchase_count,
            created_at: row.created_at,
        })
    }
}

fn db_error(e: sea_orm::DbErr) -> ProductError {
    ProductError::Internal(format!("Database error: {}", e))
}

fn stmt(sql: impl Into<String>, values: impl IntoIterator<Item = sea_orm::Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

impl PostgresProductRepository {
    async fn fetch_one(&self, statement: Statement) -> ProductResult<Option<Product>> {
        ProductRow::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Product::try_from)
            .transpose()
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: NewProduct) -> ProductResult<Product> {
        let sql = format!(
            "INSERT INTO products (user_id, name, price, image_url, stock, condition, tags, is_purchasable) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
        );

        let statement = stmt(
            sql,
            [
                product.user_id.into(),
                product.name.into(),
                product.price.into(),
                product.image_url.into(),
                product.stock.into(),
                product.condition.to_string().into(),
                product.tags.into(),
                product.is_purchasable.into(),
            ],
        );

        self.fetch_one(statement)
            .await?
            .ok_or_else(|| ProductError::Internal("Failed to create product".into()))
    }

    async fn find_by_uid(&self, uid: Uuid) -> ProductResult<Option<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE products.uid = $1");
        self.fetch_one(stmt(sql, [uid.into()])).await
    }

    async fn list(&self, filter: &ListFilter) -> ProductResult<ProductPage> {
        let built = build_list_query(filter);
        let rows = self
            .db
            .query_all_raw(stmt(built.sql, built.values))
            .await
            .map_err(db_error)?;

        let mut total = rows.len() as u64;
        if built.paginated {
            total = match rows.first() {
                Some(row) => row
                    .try_get::<i64>("", "total_count")
                    .map_err(db_error)? as u64,
                None => 0,
            };
        }

        let products = rows
            .iter()
            .map(|row| {
                ProductRow::from_query_result(row, "")
                    .map_err(db_error)
                    .and_then(Product::try_from)
            })
            .collect::<ProductResult<Vec<_>>>()?;

        Ok(ProductPage { products, total })
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let sql = format!(
            "UPDATE products SET name = $1, price = $2, image_url = $3, condition = $4, tags = $5, \
             is_purchasable = $6 WHERE products.uid = $7 RETURNING {COLUMNS}"
        );

        let statement = stmt(
            sql,
            [
                product.name.into(),
                product.price.into(),
                product.image_url.into(),
                product.condition.to_string().into(),
                product.tags.into(),
                product.is_purchasable.into(),
                product.uid.into(),
            ],
        );

        self.fetch_one(statement)
            .await?
            .ok_or(ProductError::NotFound(product.uid))
    }

    async fn update_stock(&self, uid: Uuid, stock: i64) -> ProductResult<Product> {
        let sql =
            format!("UPDATE products SET stock = $1 WHERE products.uid = $2 RETURNING {COLUMNS}");

        self.fetch_one(stmt(sql, [stock.into(), uid.into()]))
            .await?
            .ok_or(ProductError::NotFound(uid))
    }

    async fn delete(&self, uid: Uuid) -> ProductResult<bool> {
        let result = self
            .db
            .execute_raw(stmt("DELETE FROM products WHERE uid = $1", [uid.into()]))
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn purchase(&self, purchase: Purchase) -> ProductResult<()> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // Row lock plus re-check of the stock predicate on the latest version.
        let reserved = txn
            .query_one_raw(stmt(
                "UPDATE products SET stock = stock - $1, purchase_count = purchase_count + $1 \
                 WHERE uid = $2 AND stock >= $1 RETURNING id",
                [purchase.quantity.into(), purchase.product_uid.into()],
            ))
            .await
            .map_err(db_error)?;

        let product_id: i64 = match reserved {
            Some(row) => row.try_get("", "id").map_err(db_error)?,
            None => {
                txn.rollback().await.map_err(db_error)?;
                warn!(product_id = %purchase.product_uid, "stock changed before purchase");
                return Err(ProductError::StockChanged {
                    requested: purchase.quantity,
                });
            }
        };

        txn.execute_raw(stmt(
            "INSERT INTO user_transactions (user_id, product_id, bank_account_id, image_url, quantity) \
             VALUES ($1, $2, $3, $4, $5)",
            [
                purchase.buyer_id.into(),
                product_id.into(),
                purchase.bank_account_id.into(),
                purchase.payment_proof_image_url.into(),
                purchase.quantity.into(),
            ],
        ))
        .await
        .map_err(db_error)?;

        let credited = txn
            .execute_raw(stmt(
                "UPDATE users SET product_sold_total = product_sold_total + $1 WHERE id = $2",
                [purchase.quantity.into(), purchase.seller_id.into()],
            ))
            .await
            .map_err(db_error)?;

        if credited.rows_affected() == 0 {
            txn.rollback().await.map_err(db_error)?;
            return Err(ProductError::Internal(format!(
                "Seller {} not found",
                purchase.seller_id
            )));
        }

        txn.commit().await.map_err(db_error)
    }
}
