pub mod ledger;
pub mod workbook;
