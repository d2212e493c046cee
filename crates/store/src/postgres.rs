use std::time::Duration;

use async_trait::async_trait;
use common::{CartId, ItemId, OrderId, UserId};
use sqlx::{
    PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};

use crate::{
    CartRecord, ItemRecord, NewOrder, NewUser, OrderRecord, Result, StoreError, UserRecord,
    store::{CartStore, ItemStore, OrderStore, UserStore},
};

const USER_COLUMNS: &str = r#"
    SELECT u.id, u.username, u.password_hash, c.id AS cart_id
    FROM users u
    LEFT JOIN carts c ON c.user_id = u.id
"#;

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Runs the database migrations, including the catalog seed.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_user(row: PgRow) -> Result<UserRecord> {
        Ok(UserRecord {
            id: UserId::new(row.try_get("id")?),
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            cart_id: row.try_get::<Option<i64>, _>("cart_id")?.map(CartId::new),
        })
    }

    fn row_to_item(row: PgRow) -> Result<ItemRecord> {
        Ok(ItemRecord {
            id: ItemId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            price_cents: row.try_get("price_cents")?,
            description: row.try_get("description")?,
        })
    }

    async fn cart_items(&self, cart_id: CartId) -> Result<Vec<ItemRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.name, i.price_cents, i.description
            FROM cart_items ci
            JOIN items i ON i.id = ci.item_id
            WHERE ci.cart_id = $1
            ORDER BY ci.position ASC
            "#,
        )
        .bind(cart_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn order_items(&self, order_id: OrderId) -> Result<Vec<ItemRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT item_id AS id, name, price_cents, description
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("unique_username")
            {
                tracing::debug!(username = %user.username, "unique_username violated");
                return StoreError::DuplicateUsername(user.username.clone());
            }
            StoreError::Database(e)
        })?;

        Ok(UserRecord {
            id: UserId::new(row.try_get("id")?),
            username: user.username,
            password_hash: user.password_hash,
            cart_id: None,
        })
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>> {
        let row = sqlx::query(&format!("{USER_COLUMNS} WHERE u.id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(&format!("{USER_COLUMNS} WHERE u.username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl ItemStore for PostgresStore {
    async fn list_items(&self) -> Result<Vec<ItemRecord>> {
        let rows = sqlx::query("SELECT id, name, price_cents, description FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<ItemRecord>> {
        let row = sqlx::query("SELECT id, name, price_cents, description FROM items WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_item).transpose()
    }

    async fn find_items_by_name(&self, name: &str) -> Result<Vec<ItemRecord>> {
        let rows = sqlx::query(
            "SELECT id, name, price_cents, description FROM items WHERE name = $1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl CartStore for PostgresStore {
    async fn create_cart(&self, user_id: UserId) -> Result<CartRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO carts (user_id, total_cents)
            VALUES ($1, 0)
            RETURNING id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                match db_err.constraint() {
                    Some("unique_cart_user") => {
                        tracing::debug!(%user_id, "unique_cart_user violated");
                        return StoreError::CartAlreadyExists(user_id);
                    }
                    Some("carts_user_id_fkey") => {
                        tracing::warn!(%user_id, "cart created for a missing user");
                        return StoreError::UserNotFound(user_id);
                    }
                    _ => {}
                }
            }
            StoreError::Database(e)
        })?;

        Ok(CartRecord {
            id: CartId::new(row.try_get("id")?),
            user_id,
            items: Vec::new(),
            total_cents: 0,
        })
    }

    async fn find_cart(&self, id: CartId) -> Result<Option<CartRecord>> {
        let row = sqlx::query("SELECT id, user_id, total_cents FROM carts WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(CartRecord {
            id,
            user_id: UserId::new(row.try_get("user_id")?),
            items: self.cart_items(id).await?,
            total_cents: row.try_get("total_cents")?,
        }))
    }

    async fn save_cart(&self, cart: &CartRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE carts SET total_cents = $2 WHERE id = $1")
            .bind(cart.id.as_i64())
            .bind(cart.total_cents)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(StoreError::CartNotFound(cart.id));
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart.id.as_i64())
            .execute(&mut *tx)
            .await?;

        for (position, item) in cart.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cart_items (cart_id, position, item_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(cart.id.as_i64())
            .bind(position as i32)
            .bind(item.id.as_i64())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn insert_order(&self, order: NewOrder) -> Result<OrderRecord> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (user_id, total_cents)
            VALUES ($1, $2)
            RETURNING id, created_at
            "#,
        )
        .bind(order.user_id.as_i64())
        .bind(order.total_cents)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("orders_user_id_fkey")
            {
                tracing::warn!(user_id = %order.user_id, "order placed for a missing user");
                return StoreError::UserNotFound(order.user_id);
            }
            StoreError::Database(e)
        })?;
        let id = OrderId::new(row.try_get("id")?);

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, position, item_id, name, price_cents, description)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(id.as_i64())
            .bind(position as i32)
            .bind(item.id.as_i64())
            .bind(&item.name)
            .bind(item.price_cents)
            .bind(&item.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderRecord {
            id,
            user_id: order.user_id,
            items: order.items,
            total_cents: order.total_cents,
            created_at: row.try_get("created_at")?,
        })
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<OrderRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, total_cents, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let id = OrderId::new(row.try_get("id")?);
            orders.push(OrderRecord {
                id,
                user_id: UserId::new(row.try_get("user_id")?),
                items: self.order_items(id).await?,
                total_cents: row.try_get("total_cents")?,
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(orders)
    }
}
