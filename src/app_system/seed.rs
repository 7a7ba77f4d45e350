use crate::app_system::{MarketplaceSystem, SystemError};
use crate::domain::{
    CustomerCreate, OrderDraft, OrderStatus, PaymentStatus, ProductCreate, ProductStatus, VendorCreate,
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};

/// Ids of everything [`seed_demo`] created, in creation order.
#[derive(Debug, Clone, Default)]
pub struct SeedSummary {
    pub customer_ids: Vec<String>,
    pub vendor_ids: Vec<String>,
    pub product_ids: Vec<String>,
    pub order_ids: Vec<String>,
}

struct DemoOrder {
    customer: usize,
    items: &'static [(usize, u32)],
    days_ago: i64,
    payment: PaymentStatus,
    status: OrderStatus,
}

const CUSTOMERS: [(&str, &str); 3] = [
    ("Aline Uwase", "aline@example.com"),
    ("Jean Bosco", "jean@example.com"),
    ("Grace Mukamana", "grace@example.com"),
];

/// Name, days since registration, approved.
const VENDORS: [(&str, i64, bool); 4] = [
    ("Kigali Crafts", 120, true),
    ("Nyamirambo Coffee", 45, true),
    ("Kivu Textiles", 3, false),
    ("Huye Honey", 12, false),
];

/// Vendor index, name, price in RWF, stock, days since listing.
const PRODUCTS: [(usize, &str, i64, u32, i64); 4] = [
    (0, "Agaseke basket", 15_000, 40, 100),
    (0, "Sisal mat", 8_000, 25, 50),
    (1, "Bourbon coffee 500g", 6_500, 200, 40),
    (1, "Mountain tea 250g", 4_000, 150, 20),
];

const ORDERS: [DemoOrder; 7] = [
    DemoOrder { customer: 0, items: &[(0, 1), (2, 2)], days_ago: 2, payment: PaymentStatus::Paid, status: OrderStatus::Shipped },
    DemoOrder { customer: 1, items: &[(2, 4)], days_ago: 5, payment: PaymentStatus::Paid, status: OrderStatus::Delivered },
    DemoOrder { customer: 2, items: &[(1, 1), (3, 3)], days_ago: 9, payment: PaymentStatus::Paid, status: OrderStatus::Confirmed },
    DemoOrder { customer: 0, items: &[(3, 1)], days_ago: 1, payment: PaymentStatus::Pending, status: OrderStatus::Pending },
    DemoOrder { customer: 1, items: &[(0, 2)], days_ago: 14, payment: PaymentStatus::Failed, status: OrderStatus::Cancelled },
    DemoOrder { customer: 2, items: &[(0, 1)], days_ago: 38, payment: PaymentStatus::Paid, status: OrderStatus::Delivered },
    DemoOrder { customer: 0, items: &[(2, 2), (1, 1)], days_ago: 52, payment: PaymentStatus::Paid, status: OrderStatus::Delivered },
];

/// Loads a small, deterministic marketplace relative to `now`.
#[instrument(skip_all)]
pub async fn seed_demo(system: &MarketplaceSystem, now: DateTime<Utc>) -> Result<SeedSummary, SystemError> {
    let mut summary = SeedSummary::default();

    for (name, email) in CUSTOMERS {
        let joined = now - Duration::days(200);
        let id = system
            .customer_client
            .register_customer(CustomerCreate::new(name, email, joined))
            .await?;
        summary.customer_ids.push(id);
    }

    for (name, days_ago, approved) in VENDORS {
        let id = system
            .vendor_client
            .register_vendor(VendorCreate::new(name, now - Duration::days(days_ago)))
            .await?;
        if approved {
            system.vendor_client.approve_vendor(id.clone()).await?;
        }
        summary.vendor_ids.push(id);
    }

    for (vendor, name, price, inventory, days_ago) in PRODUCTS {
        let product = ProductCreate {
            vendor_id: summary.vendor_ids[vendor].clone(),
            name: name.to_string(),
            price: Decimal::from(price),
            inventory,
            status: ProductStatus::Active,
            created_at: now - Duration::days(days_ago),
        };
        let id = system.product_client.create_product(product).await?;
        summary.product_ids.push(id);
    }

    for demo in &ORDERS {
        let draft = demo.items.iter().fold(
            OrderDraft::new(summary.customer_ids[demo.customer].clone(), now - Duration::days(demo.days_ago)),
            |draft, (product, quantity)| draft.item(summary.product_ids[*product].clone(), *quantity),
        );
        let id = system.order_client.place_order(draft).await?;

        if demo.payment != PaymentStatus::Pending {
            system.order_client.record_payment(id.clone(), demo.payment).await?;
        }
        if demo.status != OrderStatus::Pending {
            system.order_client.update_status(id.clone(), demo.status).await?;
        }
        summary.order_ids.push(id);
    }

    info!(
        customers = summary.customer_ids.len(),
        vendors = summary.vendor_ids.len(),
        products = summary.product_ids.len(),
        orders = summary.order_ids.len(),
        "Demo marketplace seeded"
    );
    Ok(summary)
}
