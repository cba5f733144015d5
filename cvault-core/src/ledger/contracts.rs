//! Solidity bindings for the contracts the relay calls.
//!
//! Only the functions the relay uses are declared.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface USDx {
        function balanceOf(address owner) external view returns (uint256);
        function mint(address to, uint256 amount) external;
        function approve(address spender, uint256 value) external returns (bool);
    }
}

sol! {
    #[sol(rpc)]
    interface CorporateVault {
        function depositUSDx(uint256 amount) external;
        function submitBatchPayment(address[] calldata recipients, uint256[] calldata amounts) external;
        function approvePayment(uint256 paymentId) external;
    }
}
