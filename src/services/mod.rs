pub mod labels;
pub mod ledger;
