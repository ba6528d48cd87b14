/// Transaction type tags as they appear on the wire and in logs.
pub const TRANSACTION_TYPE_BUY: &str = "BUY";
pub const TRANSACTION_TYPE_SELL: &str = "SELL";
pub const TRANSACTION_TYPE_TRANSFER: &str = "TRANSFER";
pub const TRANSACTION_TYPE_BONUS_SHARE: &str = "BONUS_SHARE";
pub const TRANSACTION_TYPE_SPLIT: &str = "SPLIT";
pub const TRANSACTION_TYPE_INPLIT: &str = "INPLIT";
pub const TRANSACTION_TYPE_DIVIDEND: &str = "DIVIDEND";
