// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("product_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Levi's
pub const LEVI_BASE: &str = "https://www.levi.com";
pub const LEVI_LISTINGS: &[&str] = &[
    "https://www.levi.com/US/en_US/clothing/men/jeans/c/levi_clothing_men_jeans",
    "https://www.levi.com/US/en_US/clothing/women/jeans/c/levi_clothing_women_jeans",
];
pub const IMAGE_NOT_FOUND: &str = "Image not found";

// ShopDuer
pub const SHOPDUER_BASE: &str = "https://shopduer.com";
pub const SHOPDUER_LISTINGS: &[&str] = &[
    "https://shopduer.com/collections/mens-stretch-pants",
    "https://shopduer.com/collections/mens-stretch-jeans",
    "https://shopduer.com/collections/mens-joggers",
];

// G-Star; `{}` is the page number
pub const GSTAR_BASE: &str = "https://www.g-star.com";
pub const GSTAR_TEMPLATES: &[&str] = &[
    "https://www.g-star.com/en_us/shop/women/jeans?page={}",
    "https://www.g-star.com/en_us/shop/men/jeans?page={}",
];
pub const GSTAR_PAGE_LIMIT: usize = 5;
pub const GSTAR_PRODUCT_PATH: &str = r"^/en_us/shop/(men|women)/jeans/\w+-\w+-\w+$";
// Matches the product pattern but is a landing page
pub const GSTAR_EXCLUDED: &[&str] = &["/en_us/shop/women/jeans/g-star-shape"];
pub const GSTAR_IMAGE_EXT: &str = ".jpg";

// Sheets
pub const SHEET_LEVI: &str = "Levi";
pub const SHEET_SHOPDUER: &str = "Shopduder";
pub const SHEET_GSTAR: &str = "G-star-raw";
pub const SHEET_SKIPPED: &str = "Skipped";

// Longest string an xlsx cell accepts, in chars
pub const XLSX_CELL_MAX: usize = 32_767;

// Cell joiner for list-valued fields
pub const LIST_SEP: &str = "\n";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "product_details";

// Logs
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
