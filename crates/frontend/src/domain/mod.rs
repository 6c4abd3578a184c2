pub mod a001_customer;
pub mod a002_supplier;
pub mod a003_product;
pub mod a004_invoice;
pub mod a005_payment;
pub mod a006_purchase_order;
pub mod a007_stock_item;
