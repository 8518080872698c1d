use strum::AsRefStr;

/// Action names written to the `logs` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LogAction {
    UserRegister,
    UserLogin,
    PasswordReset,
    DiscountApplied,
    DiscountUsed,
    OrderCreated,
    WalletWithdraw,
}
