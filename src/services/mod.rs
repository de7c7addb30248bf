//! Service-layer components: the receipt engine, the spreadsheet client,
//! and text generation providers.

pub mod providers;
pub mod receipts;
pub mod sheet_client;

pub use sheet_client::SheetClient;
