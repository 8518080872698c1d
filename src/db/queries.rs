//! Every query the API runs.
//!
//! Arguments named `*_raw` (and all `&str` fragments) are spliced into the
//! SQL text exactly as received. Nothing is bound, quoted or escaped.

use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{LogAction, PROFILE_COLS, User};
use crate::util::format_number;

use super::rows::{JsonRow, query_one, query_rows};

fn first(mut rows: Vec<JsonRow>) -> Option<JsonRow> {
    if rows.is_empty() {
        None
    } else {
        Some(rows.swap_remove(0))
    }
}

fn count(conn: &Connection, sql: &str) -> Result<i64> {
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}

// ============ Users ============

pub fn insert_user(conn: &Connection, username: &str, email: &str, password_hash: &str) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO users (username, email, password) VALUES ('{}', '{}', '{}')",
            username, email, password_hash
        ),
        [],
    )?;
    Ok(())
}

pub fn find_user_id_by_username(conn: &Connection, username: &str) -> Result<Option<i64>> {
    conn.query_row(
        &format!("SELECT id FROM users WHERE username = '{}'", username),
        [],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

/// The login lookup. The query text is logged before it runs.
pub fn find_user_by_credentials(
    conn: &Connection,
    username: &str,
    password_hash: &str,
) -> Result<Option<User>> {
    let sql = format!(
        "SELECT * FROM users WHERE username = '{}' AND password = '{}'",
        username, password_hash
    );
    tracing::info!("[LOGIN QUERY] {}", sql);
    query_one(conn, &sql)
}

pub fn get_user_profile(conn: &Connection, id_raw: &str) -> Result<Option<JsonRow>> {
    query_rows(
        conn,
        &format!("SELECT {} FROM users WHERE id = {}", PROFILE_COLS, id_raw),
    )
    .map(first)
}

/// Apply `column = 'value'` pairs to a user. Values are wrapped in single
/// quotes and nothing else.
pub fn update_user_fields(conn: &Connection, id_raw: &str, fields: &[(&str, String)]) -> Result<usize> {
    let sets: Vec<String> = fields
        .iter()
        .map(|(col, value)| format!("{} = '{}'", col, value))
        .collect();
    let sql = format!("UPDATE users SET {} WHERE id = {}", sets.join(", "), id_raw);
    Ok(conn.execute(&sql, [])?)
}

pub fn get_updated_user(conn: &Connection, id_raw: &str) -> Result<Option<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT id, username, email, role, full_name, address, phone, avatar, bio FROM users WHERE id = {}",
            id_raw
        ),
    )
    .map(first)
}

pub fn reset_password(conn: &Connection, username: &str, password_hash: &str) -> Result<usize> {
    Ok(conn.execute(
        &format!(
            "UPDATE users SET password = '{}' WHERE username = '{}'",
            password_hash, username
        ),
        [],
    )?)
}

pub fn list_users(conn: &Connection) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        "SELECT id, username, email, role, full_name, phone, created_at FROM users",
    )
}

pub fn delete_user(conn: &Connection, id_raw: &str) -> Result<usize> {
    Ok(conn.execute(&format!("DELETE FROM users WHERE id = {}", id_raw), [])?)
}

/// Full user rows, password hashes included.
pub fn export_users(conn: &Connection) -> Result<Vec<JsonRow>> {
    query_rows(conn, "SELECT * FROM users")
}

pub fn dump_table(conn: &Connection, table_raw: &str) -> Result<Vec<JsonRow>> {
    query_rows(conn, &format!("SELECT * FROM {}", table_raw))
}

// ============ Wallets ============

pub fn create_wallet(conn: &Connection, user_id: i64, balance: f64) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO wallets (user_id, balance) VALUES ({}, {:.2})",
            user_id, balance
        ),
        [],
    )?;
    Ok(())
}

pub fn get_wallet(conn: &Connection, user_id_raw: &str) -> Result<Option<JsonRow>> {
    query_rows(
        conn,
        &format!("SELECT * FROM wallets WHERE user_id = {}", user_id_raw),
    )
    .map(first)
}

/// Balance of the first wallet row, `None` when there is none. A NULL
/// balance reads as 0.
pub fn get_balance(conn: &Connection, user_id_raw: &str) -> Result<Option<f64>> {
    conn.query_row(
        &format!("SELECT balance FROM wallets WHERE user_id = {}", user_id_raw),
        [],
        |row| row.get::<_, Option<f64>>(0),
    )
    .optional()
    .map(|balance| balance.map(Option::unwrap_or_default))
    .map_err(Into::into)
}

pub fn credit_wallet(conn: &Connection, user_id_raw: &str, amount: f64) -> Result<usize> {
    Ok(conn.execute(
        &format!(
            "UPDATE wallets SET balance = COALESCE(balance, 0) + {} WHERE user_id = {}",
            format_number(amount),
            user_id_raw
        ),
        [],
    )?)
}

pub fn debit_wallet(conn: &Connection, user_id_raw: &str, amount: f64) -> Result<usize> {
    Ok(conn.execute(
        &format!(
            "UPDATE wallets SET balance = balance - {} WHERE user_id = {}",
            format_number(amount),
            user_id_raw
        ),
        [],
    )?)
}

/// Charge an order total, clamping at zero. A negative total credits.
pub fn charge_wallet(conn: &Connection, user_id_raw: &str, total_raw: &str) -> Result<usize> {
    Ok(conn.execute(
        &format!(
            "UPDATE wallets SET balance = MAX(balance - {}, 0) WHERE user_id = {}",
            total_raw, user_id_raw
        ),
        [],
    )?)
}

// ============ Products ============

pub fn list_products(conn: &Connection) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        "SELECT p.*, u.username AS seller FROM products p LEFT JOIN users u ON p.user_id = u.id ORDER BY p.created_at DESC, p.id DESC",
    )
}

pub fn get_product(conn: &Connection, id_raw: &str) -> Result<Option<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT p.*, u.username AS seller FROM products p LEFT JOIN users u ON p.user_id = u.id WHERE p.id = {}",
            id_raw
        ),
    )
    .map(first)
}

pub struct NewProduct<'a> {
    pub owner_raw: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub price_raw: &'a str,
    pub image: &'a str,
    pub category: &'a str,
    pub stock_raw: &'a str,
}

pub fn create_product(conn: &Connection, input: &NewProduct) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO products (user_id, name, description, price, image, category, stock)
             VALUES ({}, '{}', '{}', {}, '{}', '{}', {})",
            input.owner_raw,
            input.name,
            input.description,
            input.price_raw,
            input.image,
            input.category,
            input.stock_raw
        ),
        [],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn search_products(conn: &Connection, term: &str) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT p.*, u.username AS seller FROM products p LEFT JOIN users u ON p.user_id = u.id WHERE p.name LIKE '%{}%'",
            term
        ),
    )
}

// ============ Reviews ============

pub fn insert_review(
    conn: &Connection,
    user_id_raw: &str,
    product_id_raw: &str,
    rating_raw: &str,
    comment: &str,
) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO reviews (user_id, product_id, rating, comment)
             VALUES ({}, {}, {}, '{}')",
            user_id_raw, product_id_raw, rating_raw, comment
        ),
        [],
    )?;
    Ok(())
}

pub fn list_reviews(conn: &Connection, product_id_raw: &str) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT r.*, u.username, u.avatar
             FROM reviews r LEFT JOIN users u ON r.user_id = u.id
             WHERE r.product_id = {}
             ORDER BY r.created_at DESC, r.id DESC",
            product_id_raw
        ),
    )
}

// ============ Discounts ============

pub fn list_discount_usages(
    conn: &Connection,
    user_id_raw: &str,
    product_id_raw: &str,
) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT * FROM discount_usages WHERE user_id = {} AND product_id = {}",
            user_id_raw, product_id_raw
        ),
    )
}

pub fn find_discount_usages(
    conn: &Connection,
    user_id_raw: &str,
    code: &str,
    product_id_raw: &str,
) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT * FROM discount_usages WHERE user_id = {} AND discount_code = '{}' AND product_id = {}",
            user_id_raw, code, product_id_raw
        ),
    )
}

pub fn insert_discount_usage(
    conn: &Connection,
    user_id_raw: &str,
    code: &str,
    product_id_raw: &str,
    percent: i64,
) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO discount_usages (user_id, discount_code, product_id, discount_percent) VALUES ({}, '{}', {}, {})",
            user_id_raw, code, product_id_raw, percent
        ),
        [],
    )?;
    Ok(())
}

pub fn count_discount_usages(
    conn: &Connection,
    user_id_raw: &str,
    code: &str,
    product_id_raw: &str,
) -> Result<i64> {
    count(
        conn,
        &format!(
            "SELECT COUNT(*) as count FROM discount_usages WHERE user_id = {} AND discount_code = '{}' AND product_id = {}",
            user_id_raw, code, product_id_raw
        ),
    )
}

pub fn delete_discount_usages(
    conn: &Connection,
    user_id_raw: &str,
    product_id_raw: &str,
) -> Result<usize> {
    Ok(conn.execute(
        &format!(
            "DELETE FROM discount_usages WHERE user_id = {} AND product_id = {}",
            user_id_raw, product_id_raw
        ),
        [],
    )?)
}

// ============ Orders ============

pub struct NewOrder<'a> {
    pub user_id_raw: &'a str,
    pub product_id_raw: &'a str,
    pub quantity_raw: &'a str,
    pub total_price_raw: &'a str,
    pub shipping_address: &'a str,
}

pub fn insert_order(conn: &Connection, input: &NewOrder) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO orders (user_id, product_id, quantity, total_price, status, shipping_address)
             VALUES ({}, {}, {}, {}, 'pending', '{}')",
            input.user_id_raw,
            input.product_id_raw,
            input.quantity_raw,
            input.total_price_raw,
            input.shipping_address
        ),
        [],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_orders(conn: &Connection, user_id_raw: &str) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT o.*, p.name AS product_name, p.image AS product_image
             FROM orders o LEFT JOIN products p ON o.product_id = p.id
             WHERE o.user_id = {}
             ORDER BY o.created_at DESC, o.id DESC",
            user_id_raw
        ),
    )
}

// ============ Logs ============

pub fn insert_log(conn: &Connection, action: LogAction, details: &str, ip: &str) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO logs (action, details, ip_address) VALUES ('{}', '{}', '{}')",
            action.as_ref(),
            details,
            ip
        ),
        [],
    )?;
    Ok(())
}

pub fn recent_logs(conn: &Connection, limit: u32) -> Result<Vec<JsonRow>> {
    query_rows(
        conn,
        &format!(
            "SELECT * FROM logs ORDER BY created_at DESC, id DESC LIMIT {}",
            limit
        ),
    )
}

// ============ Health ============

pub fn ping(conn: &Connection) -> Result<()> {
    conn.query_row("SELECT 1", [], |_| Ok(()))?;
    Ok(())
}
