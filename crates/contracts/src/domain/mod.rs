pub mod a101_manufacture_order;
pub mod a102_return_order;
pub mod a103_sales_record;
pub mod a104_customer;
pub mod a105_supplier;
pub mod a106_product;
pub mod common;
