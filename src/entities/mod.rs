pub mod product;

pub use product::Entity as Product;
