pub mod gateway_kinds;
pub mod payment_methods;
