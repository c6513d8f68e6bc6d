pub mod payment;

pub use payment::{
    Amount, ApiErrorBody, Confirmation, ConfirmationResponse, ConfirmationType,
    CreatePaymentRequest, CreatePaymentResponse, Customer, Receipt, ReceiptItem,
};
