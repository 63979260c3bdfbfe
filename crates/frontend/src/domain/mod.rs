pub mod a101_manufacture_order;
pub mod a102_return_order;
pub mod a103_sales_record;
