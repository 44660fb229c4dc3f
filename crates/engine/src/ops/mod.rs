mod accounts;
mod ledger;
mod transfers;

pub use transfers::TransferOutcome;
