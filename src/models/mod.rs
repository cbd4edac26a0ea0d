pub mod store;
pub mod user;
pub mod user_profile;
pub mod product;
pub mod location;
pub mod product_location;
pub mod stock;
pub mod invoice;
pub mod invoice_item;
pub mod invoice_contact;
pub mod supplier;
pub mod purchase;
pub mod purchase_item;
