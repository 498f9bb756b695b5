pub mod carrier;
pub mod quote;
pub mod shipment;
