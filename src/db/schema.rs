use rusqlite::{Connection, params};

use crate::crypto::hash_password;

/// Create every table. Safe to run on an existing database.
///
/// Foreign keys are declared for documentation only. Pooled connections
/// switch enforcement off, so rows may point at users or products that
/// do not exist.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password TEXT NOT NULL,               -- unsalted md5 hex
            role TEXT NOT NULL DEFAULT 'user',
            full_name TEXT,
            address TEXT,
            phone TEXT,
            avatar TEXT DEFAULT '/uploads/default-avatar.png',
            bio TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS wallets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            balance REAL DEFAULT 0,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS idx_wallets_user ON wallets(user_id);

        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES users(id),
            name TEXT,
            description TEXT,
            price REAL,
            image TEXT,
            category TEXT,
            stock INTEGER DEFAULT 10,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES users(id),
            product_id INTEGER REFERENCES products(id),
            rating INTEGER,
            comment TEXT,                         -- stored as submitted, rendered as HTML
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS idx_reviews_product ON reviews(product_id);

        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES users(id),
            product_id INTEGER REFERENCES products(id),
            quantity INTEGER,
            total_price REAL,                     -- as sent by the client
            status TEXT DEFAULT 'pending',
            shipping_address TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_id);

        -- No UNIQUE(user_id, discount_code, product_id): the apply handler
        -- checks in a separate SELECT, which is what makes stacking possible.
        CREATE TABLE IF NOT EXISTS discount_usages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            discount_code TEXT,
            product_id INTEGER,
            discount_percent REAL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            action TEXT,
            details TEXT,
            ip_address TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS idx_logs_created ON logs(created_at);
        "#,
    )
}

struct SeedUser {
    username: &'static str,
    email: &'static str,
    password: &'static str,
    role: &'static str,
    full_name: &'static str,
    address: &'static str,
    phone: &'static str,
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        username: "admin",
        email: "admin@ivm.local",
        password: "admin123",
        role: "admin",
        full_name: "Marketplace Administrator",
        address: "1 Server Room, Jakarta",
        phone: "+62-21-555-0100",
    },
    SeedUser {
        username: "alice",
        email: "alice@example.com",
        password: "password123",
        role: "user",
        full_name: "Alice Wijaya",
        address: "12 Jalan Merdeka, Bandung",
        phone: "+62-22-555-0111",
    },
    SeedUser {
        username: "bob",
        email: "bob@example.com",
        password: "qwerty",
        role: "user",
        full_name: "Bob Santoso",
        address: "7 Jalan Sudirman, Surabaya",
        phone: "+62-31-555-0122",
    },
];

/// (seller username, name, description, price, category, stock)
const SEED_PRODUCTS: &[(&str, &str, &str, f64, &str, i64)] = &[
    ("admin", "Mechanical Keyboard", "Hot-swappable, brown switches", 89.99, "Electronics", 25),
    ("admin", "USB-C Hub", "7-in-1 with HDMI and card reader", 39.5, "Electronics", 40),
    ("alice", "Batik Shirt", "Hand-stamped cotton, size M", 24.0, "Fashion", 12),
    ("alice", "Kopi Luwak 250g", "Single origin, medium roast", 59.0, "Food", 8),
    ("bob", "Web Hacking Handbook", "Second edition, lightly used", 18.75, "Books", 3),
    ("bob", "Lock Pick Set", "For training purposes only", 29.99, "Tools", 15),
];

/// Insert demo users, wallets, products and a review.
///
/// Does nothing when any user already exists. Returns true if data was inserted.
pub fn seed_demo_data(conn: &Connection) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(false);
    }

    for user in SEED_USERS {
        conn.execute(
            "INSERT INTO users (username, email, password, role, full_name, address, phone)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.username,
                user.email,
                hash_password(user.password),
                user.role,
                user.full_name,
                user.address,
                user.phone
            ],
        )?;
        let user_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO wallets (user_id, balance) VALUES (?1, 1000.00)",
            params![user_id],
        )?;
    }

    for (seller, name, description, price, category, stock) in SEED_PRODUCTS {
        conn.execute(
            "INSERT INTO products (user_id, name, description, price, image, category, stock)
             SELECT id, ?2, ?3, ?4, '/uploads/default-product.png', ?5, ?6
             FROM users WHERE username = ?1",
            params![seller, name, description, price, category, stock],
        )?;
    }

    conn.execute(
        "INSERT INTO reviews (user_id, product_id, rating, comment)
         SELECT u.id, p.id, 5, 'Great keyboard, <b>fast</b> shipping!'
         FROM users u, products p
         WHERE u.username = 'alice' AND p.name = 'Mechanical Keyboard'",
        [],
    )?;

    Ok(true)
}
