pub mod client;

mod carriers;
mod clients;
mod inventories;
mod managers;
mod movements;
mod orders;
mod products;
mod reports;
mod shipments;
mod suppliers;
mod warehouses;

pub use client::ApiClient;
