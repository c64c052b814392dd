//! Demo dataset
//!
//! A small catalog, a city's worth of bins, a demo user, and one
//! historical reward entry. Identities are stable constants so scan event
//! files and tests can reference records across runs.

use crate::core::directory::hash_password;
use crate::core::registry::placeholder_qr;
use crate::types::{
    Bin, BinLocation, Category, Product, RecordId, RecyclableType, Role, Transaction,
    TransactionMetadata, TransactionStatus, TransactionType, User,
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Demo shopper with a 35 starting balance
pub const DEMO_USER_ID: RecordId = Uuid::from_u128(0x674000000000000000000001);
/// Program administrator
pub const DEMO_ADMIN_ID: RecordId = Uuid::from_u128(0x674000000000000000000099);

/// "Eco Fresh Drink" (plastic, reward 5)
pub const DEMO_PRODUCT_ID: RecordId = Uuid::from_u128(0x675000000000000000000001);
/// "Glass Water Bottle" (glass, reward 10)
pub const DEMO_GLASS_PRODUCT_ID: RecordId = Uuid::from_u128(0x675000000000000000000002);
/// "Organic Juice Can" (metal, reward 6)
pub const DEMO_METAL_PRODUCT_ID: RecordId = Uuid::from_u128(0x675000000000000000000003);
/// "Eco Snack Box" (paper, reward 12)
pub const DEMO_PAPER_PRODUCT_ID: RecordId = Uuid::from_u128(0x675000000000000000000004);

/// BIN-DEL-001, accepts plastic + paper
pub const DEMO_BIN_DELHI_ID: RecordId = Uuid::from_u128(0x684000000000000000000001);
/// BIN-MUM-002, accepts plastic + glass + metal
pub const DEMO_BIN_MUMBAI_ID: RecordId = Uuid::from_u128(0x684000000000000000000002);
/// BIN-BLR-003, accepts metal + glass + plastic
pub const DEMO_BIN_BENGALURU_ID: RecordId = Uuid::from_u128(0x684000000000000000000003);
/// BIN-PUN-004, accepts paper + organic
pub const DEMO_BIN_PUNE_ID: RecordId = Uuid::from_u128(0x684000000000000000000004);

/// Everything `RewardsService::with_demo_data` seeds
pub struct DemoDataset {
    pub products: Vec<Product>,
    pub bins: Vec<Bin>,
    pub users: Vec<User>,
    pub transactions: Vec<Transaction>,
}

/// Build the demo dataset with fresh timestamps
pub fn demo_dataset() -> DemoDataset {
    let now = Utc::now();

    DemoDataset {
        products: demo_products(now),
        bins: demo_bins(now),
        users: demo_users(now),
        transactions: demo_transactions(now),
    }
}

fn product(
    id: RecordId,
    name: &str,
    description: &str,
    price: i64,
    reward: i64,
    // Percentage snapshots are seed data, carried as-is rather than
    // recomputed; they reflect what the catalog stored at creation time.
    percentage_hundredths: i64,
    category: Category,
    recyclable_type: RecyclableType,
    now: DateTime<Utc>,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(price, 0),
        reward_amount: Decimal::new(reward, 0),
        reward_percentage: Decimal::new(percentage_hundredths, 2),
        category,
        recyclable_type,
        image_url: None,
        active: true,
        created_at: now,
        updated_at: now,
    }
}

fn demo_products(now: DateTime<Utc>) -> Vec<Product> {
    vec![
        product(
            DEMO_PRODUCT_ID,
            "Eco Fresh Drink",
            "Refreshing beverage in a recyclable plastic bottle",
            95,
            5,
            526,
            Category::Beverage,
            RecyclableType::Plastic,
            now,
        ),
        product(
            DEMO_GLASS_PRODUCT_ID,
            "Glass Water Bottle",
            "Premium glass bottled water",
            120,
            10,
            833,
            Category::Beverage,
            RecyclableType::Glass,
            now,
        ),
        product(
            DEMO_METAL_PRODUCT_ID,
            "Organic Juice Can",
            "Aluminum can with organic juice",
            85,
            6,
            705,
            Category::Beverage,
            RecyclableType::Metal,
            now,
        ),
        product(
            DEMO_PAPER_PRODUCT_ID,
            "Eco Snack Box",
            "Biodegradable snack packaging",
            150,
            12,
            800,
            Category::Food,
            RecyclableType::Paper,
            now,
        ),
    ]
}

fn bin(
    id: RecordId,
    bin_id: &str,
    location_name: &str,
    address: &str,
    accepted_types: Vec<RecyclableType>,
    now: DateTime<Utc>,
) -> Bin {
    Bin {
        id,
        bin_id: bin_id.to_string(),
        location: BinLocation {
            name: location_name.to_string(),
            address: address.to_string(),
            coordinates: None,
        },
        accepted_types,
        qr_code: placeholder_qr(bin_id),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

fn demo_bins(now: DateTime<Utc>) -> Vec<Bin> {
    vec![
        bin(
            DEMO_BIN_DELHI_ID,
            "BIN-DEL-001",
            "Central Park, Delhi",
            "Gate 2, Connaught Place, New Delhi",
            vec![RecyclableType::Plastic, RecyclableType::Paper],
            now,
        ),
        bin(
            DEMO_BIN_MUMBAI_ID,
            "BIN-MUM-002",
            "Marine Drive Mall, Mumbai",
            "Level 3, South Wing",
            vec![
                RecyclableType::Plastic,
                RecyclableType::Glass,
                RecyclableType::Metal,
            ],
            now,
        ),
        bin(
            DEMO_BIN_BENGALURU_ID,
            "BIN-BLR-003",
            "Metro Station, Bengaluru",
            "MG Road Metro Exit",
            vec![
                RecyclableType::Metal,
                RecyclableType::Glass,
                RecyclableType::Plastic,
            ],
            now,
        ),
        bin(
            DEMO_BIN_PUNE_ID,
            "BIN-PUN-004",
            "University Campus, Pune",
            "Hostel Block Recycling Hub",
            vec![RecyclableType::Paper, RecyclableType::Organic],
            now,
        ),
    ]
}

fn demo_users(now: DateTime<Utc>) -> Vec<User> {
    let demo = User {
        id: DEMO_USER_ID,
        email: "eco.user@example.com".to_string(),
        password_hash: hash_password("password123"),
        name: "Eco Warrior".to_string(),
        phone: Some("+91 90000 00000".to_string()),
        wallet_balance: Decimal::new(35, 0),
        role: Role::User,
        created_at: now,
        updated_at: now,
    };

    let admin = User {
        id: DEMO_ADMIN_ID,
        email: "admin@ecorewards.app".to_string(),
        password_hash: hash_password("admin123"),
        name: "Program Admin".to_string(),
        phone: Some("+91 98888 88888".to_string()),
        wallet_balance: Decimal::ZERO,
        role: Role::Admin,
        created_at: now,
        updated_at: now,
    };

    vec![demo, admin]
}

fn demo_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    // One reward from yesterday so the demo wallet has history
    vec![Transaction {
        id: Uuid::from_u128(0x694000000000000000000001),
        user_id: DEMO_USER_ID,
        product_id: DEMO_PRODUCT_ID,
        bin_id: DEMO_BIN_DELHI_ID,
        tx_type: TransactionType::Reward,
        amount: Decimal::new(5, 0),
        description: "Reward for recycling Eco Fresh Drink".to_string(),
        status: TransactionStatus::Completed,
        metadata: TransactionMetadata {
            product_name: Some("Eco Fresh Drink".to_string()),
            bin_location: Some("Central Park, Delhi".to_string()),
            recyclable_type: Some(RecyclableType::Plastic),
        },
        created_at: now - Duration::days(1),
    }]
}
