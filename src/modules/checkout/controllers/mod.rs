pub mod checkout_controller;

pub use checkout_controller::{
    configure, create_payment, fallback, preflight, CREATE_PAYMENT_PATH,
};
