//! Fixed catalog data the simulated sources draw from.

pub const PRODUCT_CATEGORIES: [&str; 7] = [
    "Electronics",
    "Clothing",
    "Home & Kitchen",
    "Beauty",
    "Books",
    "Sports",
    "Toys",
];

/// Brands sold within a category.
pub fn brands_for(category: &str) -> &'static [&'static str] {
    match category {
        "Electronics" => &[
            "Samsung", "Apple", "Sony", "LG", "Dell", "HP", "Lenovo", "Asus", "Microsoft", "Bose",
        ],
        "Clothing" => &[
            "Nike",
            "Adidas",
            "H&M",
            "Zara",
            "Levi's",
            "Gap",
            "Calvin Klein",
            "Gucci",
            "Puma",
            "Under Armour",
        ],
        "Home & Kitchen" => &[
            "Ikea",
            "Bosch",
            "Philips",
            "KitchenAid",
            "Dyson",
            "Cuisinart",
            "Crate & Barrel",
            "OXO",
            "Ninja",
            "Hamilton Beach",
        ],
        "Beauty" => &[
            "L'Oreal",
            "Maybelline",
            "MAC",
            "Estee Lauder",
            "Clinique",
            "Dove",
            "Neutrogena",
            "Nivea",
            "Olay",
            "Revlon",
        ],
        "Books" => &[
            "Penguin",
            "HarperCollins",
            "Simon & Schuster",
            "Hachette",
            "Macmillan",
            "Scholastic",
            "Wiley",
            "Oxford",
            "Pearson",
            "McGraw-Hill",
        ],
        "Sports" => &[
            "Nike",
            "Adidas",
            "Puma",
            "Under Armour",
            "Wilson",
            "Spalding",
            "Reebok",
            "New Balance",
            "Columbia",
            "The North Face",
        ],
        "Toys" => &[
            "Lego",
            "Hasbro",
            "Mattel",
            "Fisher-Price",
            "Disney",
            "Nerf",
            "Barbie",
            "Hot Wheels",
            "Play-Doh",
            "Nintendo",
        ],
        _ => &[],
    }
}

/// Every brand across all categories, in category order. Brands sold in more
/// than one category appear once per category, matching the weighting the
/// physical-store pre-filter expects.
pub fn all_brands() -> impl Iterator<Item = &'static str> {
    PRODUCT_CATEGORIES
        .iter()
        .flat_map(|category| brands_for(category).iter().copied())
}

pub const LOCATIONS: [&str; 15] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
    "Austin",
    "Seattle",
    "Boston",
    "Denver",
    "Atlanta",
];

pub const ONLINE_PAYMENTS: [&str; 4] = ["Credit Card", "PayPal", "Apple Pay", "Google Pay"];

pub const STORE_PAYMENTS: [&str; 4] = ["Cash", "Credit Card", "Debit Card", "Gift Card"];
