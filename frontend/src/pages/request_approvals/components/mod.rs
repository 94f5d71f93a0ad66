pub mod overtime_balance;

pub use overtime_balance::OvertimeBalanceDialog;
