pub mod enums;
pub mod payment_gateways;
pub mod payment_method_configs;
pub mod payment_methods;
pub mod validation;
