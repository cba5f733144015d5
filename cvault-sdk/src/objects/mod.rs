pub mod inputs;
pub mod relay;

pub use inputs::{AmountInput, PaymentIdInput};
pub use relay::{
    ApprovePaymentRequest, BalanceResponse, BatchPaymentRequest, DepositRequest, ErrorResponse,
    HealthResponse, TransactionResponse,
};
